use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::SqlType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// SQL type definitions for custom enums
// Note: These types use snake_case to match PostgreSQL type names
#[allow(non_camel_case_types)]
#[derive(SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(postgres_type(name = "post_status"))]
pub struct Post_status;

// PostStatus enum
/// Editorial status of a blog post. Only published posts are discoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Post_status)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Still being written; invisible outside the dashboard
    Draft,
    /// Live on the public blog
    Published,
    /// Pulled from the public blog but kept for history
    Archived,
}

impl ToSql<Post_status, Pg> for PostStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        };
        out.write_all(s.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Post_status, Pg> for PostStatus {
    fn from_sql(bytes: PgValue) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"draft" => Ok(PostStatus::Draft),
            b"published" => Ok(PostStatus::Published),
            b"archived" => Ok(PostStatus::Archived),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

// Row models. All tables are owned and mutated by the wider marketplace;
// this service only ever reads them.

/// A US state landing page row. Identity is the slug (unique, URL-safe).
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct State {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// A city row. `state_id` may be absent or dangling in upstream data;
/// resolution happens in [`resolve_city_states`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct City {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub state_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// A treatment (service) offered across the marketplace.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::treatments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Treatment {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// A clinic profile row. Duplicates are merge leftovers and never published.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::clinics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Clinic {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub is_duplicate: bool,
    pub description: Option<String>,
    pub city_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// A dentist profile row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::dentists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dentist {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub bio: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A blog post row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub status: PostStatus,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// An accepted insurance plan row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::insurance_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InsurancePlan {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// A city joined to its parent state, resolved exactly once after fetch.
///
/// Depending on where a city row comes from, its state reference may be
/// missing or point at a row that no longer exists. Downstream code only
/// ever sees this one shape: the city, plus `Some(state)` when the
/// reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWithState {
    pub city: City,
    pub state: Option<State>,
}

/// Joins cities to their states in memory.
///
/// Cities whose `state_id` is absent or does not match any fetched state
/// resolve to `None`. Activity of either side is NOT checked here; callers
/// own that policy.
pub fn resolve_city_states(cities: Vec<City>, states: &[State]) -> Vec<CityWithState> {
    let by_id: HashMap<Uuid, &State> = states.iter().map(|s| (s.id, s)).collect();

    cities
        .into_iter()
        .map(|city| {
            let state = city.state_id.and_then(|id| by_id.get(&id)).map(|s| (*s).clone());
            CityWithState { city, state }
        })
        .collect()
}
