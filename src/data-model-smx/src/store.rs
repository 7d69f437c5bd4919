//! Read-only access to the marketplace tables.
//!
//! Every sitemap section goes through [`SiteStore`], a per-request handle
//! passed explicitly into the pipeline. The production implementation is
//! [`PgStore`]; tests use the in-memory fixture store from `test_helpers`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{DbPool, PoolError};
use crate::models::{BlogPost, City, Clinic, Dentist, InsurancePlan, State, Treatment};
use crate::schema::{blog_posts, cities, clinics, dentists, insurance_plans, states, treatments};

/// Window size for paginated full-table reads. Single queries against the
/// managed store silently cap row counts; clinics and city rows can number
/// in the tens of thousands, so every read pages through the whole table.
pub const FETCH_PAGE_SIZE: i64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to check out a database connection: {0}")]
    Checkout(#[from] PoolError),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read interface over the marketplace tables.
///
/// Each method returns the full table contents. Inclusion policy (activity,
/// duplicates, publication status) lives in the section builders, not here,
/// so the same rows behave identically whether they come from Postgres or a
/// fixture store.
#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn states(&self) -> StoreResult<Vec<State>>;
    async fn cities(&self) -> StoreResult<Vec<City>>;
    async fn treatments(&self) -> StoreResult<Vec<Treatment>>;
    async fn clinics(&self) -> StoreResult<Vec<Clinic>>;
    async fn dentists(&self) -> StoreResult<Vec<Dentist>>;
    async fn blog_posts(&self) -> StoreResult<Vec<BlogPost>>;
    async fn insurance_plans(&self) -> StoreResult<Vec<InsurancePlan>>;
}

/// Postgres-backed [`SiteStore`] over the deadpool connection pool.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Reads all rows of a query through an offset/limit window.
///
/// Pages are fetched sequentially: window N+1 is only issued after window N
/// came back full. A query error mid-pagination stops the loop and returns
/// the rows read so far — a partial sitemap beats no sitemap. Ordering by
/// slug keeps windows stable across the loop.
macro_rules! fetch_paged {
    ($conn:expr, $query:expr, $table:literal) => {{
        let mut rows = Vec::new();
        let mut offset: i64 = 0;
        loop {
            let page = $query
                .offset(offset)
                .limit(FETCH_PAGE_SIZE)
                .load(&mut $conn)
                .await;
            match page {
                Ok(mut batch) => {
                    let full_page = batch.len() as i64 == FETCH_PAGE_SIZE;
                    offset += batch.len() as i64;
                    rows.append(&mut batch);
                    if !full_page {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        table = $table,
                        offset,
                        error = %e,
                        "query failed mid-pagination; serving partial rows",
                    );
                    break;
                }
            }
        }
        rows
    }};
}

#[async_trait]
impl SiteStore for PgStore {
    async fn states(&self) -> StoreResult<Vec<State>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            states::table.order(states::slug.asc()).select(State::as_select()),
            "states"
        ))
    }

    async fn cities(&self) -> StoreResult<Vec<City>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            cities::table.order(cities::slug.asc()).select(City::as_select()),
            "cities"
        ))
    }

    async fn treatments(&self) -> StoreResult<Vec<Treatment>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            treatments::table
                .order(treatments::slug.asc())
                .select(Treatment::as_select()),
            "treatments"
        ))
    }

    async fn clinics(&self) -> StoreResult<Vec<Clinic>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            clinics::table.order(clinics::slug.asc()).select(Clinic::as_select()),
            "clinics"
        ))
    }

    async fn dentists(&self) -> StoreResult<Vec<Dentist>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            dentists::table.order(dentists::slug.asc()).select(Dentist::as_select()),
            "dentists"
        ))
    }

    async fn blog_posts(&self) -> StoreResult<Vec<BlogPost>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            blog_posts::table
                .order(blog_posts::slug.asc())
                .select(BlogPost::as_select()),
            "blog_posts"
        ))
    }

    async fn insurance_plans(&self) -> StoreResult<Vec<InsurancePlan>> {
        let mut conn = self.pool.get().await?;
        Ok(fetch_paged!(
            conn,
            insurance_plans::table
                .order(insurance_plans::slug.asc())
                .select(InsurancePlan::as_select()),
            "insurance_plans"
        ))
    }
}
