//! Test utilities for the marketplace data model.
//!
//! Provides row constructors and an in-memory [`FixtureStore`] so the
//! sitemap pipeline and the API router can be exercised without a running
//! database. The store handle is injected per request, which is exactly
//! what makes this swap possible.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{BlogPost, City, Clinic, Dentist, InsurancePlan, PostStatus, State, Treatment};
use crate::store::{SiteStore, StoreError, StoreResult};

/// Fixed timestamp used by all fixture rows so lastmod assertions are stable.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn test_state(slug: &str, active: bool) -> State {
    State {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        updated_at: fixture_time(),
    }
}

pub fn test_city(slug: &str, active: bool, state_id: Option<Uuid>) -> City {
    City {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        state_id,
        updated_at: fixture_time(),
    }
}

pub fn test_treatment(slug: &str, active: bool) -> Treatment {
    Treatment {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        updated_at: fixture_time(),
    }
}

pub fn test_clinic(slug: &str, active: bool, duplicate: bool, description: Option<&str>) -> Clinic {
    Clinic {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        is_duplicate: duplicate,
        description: description.map(str::to_string),
        city_id: None,
        updated_at: fixture_time(),
    }
}

pub fn test_clinic_in_city(slug: &str, city_id: Uuid) -> Clinic {
    Clinic {
        city_id: Some(city_id),
        ..test_clinic(slug, true, false, Some("A full service dental clinic with a long description."))
    }
}

pub fn test_dentist(slug: &str, active: bool, bio: Option<&str>) -> Dentist {
    Dentist {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        bio: bio.map(str::to_string),
        updated_at: fixture_time(),
    }
}

pub fn test_post(slug: &str, status: PostStatus) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        status,
        updated_at: fixture_time(),
        published_at: match status {
            PostStatus::Published => Some(fixture_time()),
            PostStatus::Draft | PostStatus::Archived => None,
        },
    }
}

pub fn test_insurance(slug: &str, active: bool) -> InsurancePlan {
    InsurancePlan {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        is_active: active,
        updated_at: fixture_time(),
    }
}

/// In-memory [`SiteStore`] backed by plain `Vec`s. Never errors.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    pub states: Vec<State>,
    pub cities: Vec<City>,
    pub treatments: Vec<Treatment>,
    pub clinics: Vec<Clinic>,
    pub dentists: Vec<Dentist>,
    pub blog_posts: Vec<BlogPost>,
    pub insurance_plans: Vec<InsurancePlan>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states(mut self, states: Vec<State>) -> Self {
        self.states = states;
        self
    }

    pub fn with_cities(mut self, cities: Vec<City>) -> Self {
        self.cities = cities;
        self
    }

    pub fn with_treatments(mut self, treatments: Vec<Treatment>) -> Self {
        self.treatments = treatments;
        self
    }

    pub fn with_clinics(mut self, clinics: Vec<Clinic>) -> Self {
        self.clinics = clinics;
        self
    }

    pub fn with_dentists(mut self, dentists: Vec<Dentist>) -> Self {
        self.dentists = dentists;
        self
    }

    pub fn with_blog_posts(mut self, blog_posts: Vec<BlogPost>) -> Self {
        self.blog_posts = blog_posts;
        self
    }

    pub fn with_insurance_plans(mut self, insurance_plans: Vec<InsurancePlan>) -> Self {
        self.insurance_plans = insurance_plans;
        self
    }
}

#[async_trait]
impl SiteStore for FixtureStore {
    async fn states(&self) -> StoreResult<Vec<State>> {
        Ok(self.states.clone())
    }

    async fn cities(&self) -> StoreResult<Vec<City>> {
        Ok(self.cities.clone())
    }

    async fn treatments(&self) -> StoreResult<Vec<Treatment>> {
        Ok(self.treatments.clone())
    }

    async fn clinics(&self) -> StoreResult<Vec<Clinic>> {
        Ok(self.clinics.clone())
    }

    async fn dentists(&self) -> StoreResult<Vec<Dentist>> {
        Ok(self.dentists.clone())
    }

    async fn blog_posts(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(self.blog_posts.clone())
    }

    async fn insurance_plans(&self) -> StoreResult<Vec<InsurancePlan>> {
        Ok(self.insurance_plans.clone())
    }
}

/// [`SiteStore`] whose every read fails. Exercises the hard-error path
/// that surfaces as a 500 at the dispatch boundary.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

fn fixture_failure(table: &str) -> StoreError {
    StoreError::Unavailable(format!("fixture failure reading {table}"))
}

#[async_trait]
impl SiteStore for FailingStore {
    async fn states(&self) -> StoreResult<Vec<State>> {
        Err(fixture_failure("states"))
    }

    async fn cities(&self) -> StoreResult<Vec<City>> {
        Err(fixture_failure("cities"))
    }

    async fn treatments(&self) -> StoreResult<Vec<Treatment>> {
        Err(fixture_failure("treatments"))
    }

    async fn clinics(&self) -> StoreResult<Vec<Clinic>> {
        Err(fixture_failure("clinics"))
    }

    async fn dentists(&self) -> StoreResult<Vec<Dentist>> {
        Err(fixture_failure("dentists"))
    }

    async fn blog_posts(&self) -> StoreResult<Vec<BlogPost>> {
        Err(fixture_failure("blog_posts"))
    }

    async fn insurance_plans(&self) -> StoreResult<Vec<InsurancePlan>> {
        Err(fixture_failure("insurance_plans"))
    }
}

/// A small but complete marketplace: three states (one inactive), cities
/// across them (one dangling), services, clinics (duplicate + thin mixed
/// in), dentists, posts in all statuses, and insurance plans.
pub fn marketplace_fixtures() -> FixtureStore {
    let ca = test_state("california", true);
    let ny = test_state("new-york", true);
    let tx = test_state("texas", false);

    let la = test_city("los-angeles", true, Some(ca.id));
    let sf = test_city("san-francisco", true, Some(ca.id));
    let buffalo = test_city("buffalo", true, Some(ny.id));
    let austin = test_city("austin", true, Some(tx.id));
    let orphan = test_city("orphanville", true, None);

    let clinics = vec![
        test_clinic_in_city("smile-dental-la", la.id),
        test_clinic_in_city("bright-teeth-sf", sf.id),
        test_clinic("smile-dental", true, false, None),
        test_clinic("copy-of-smile-dental", true, true, Some("Duplicate row kept for history.")),
        test_clinic("closed-clinic", false, false, Some("No longer operating.")),
    ];

    FixtureStore::new()
        .with_states(vec![ca, ny, tx])
        .with_cities(vec![la, sf, buffalo, austin, orphan])
        .with_treatments(vec![
            test_treatment("dental-implants", true),
            test_treatment("teeth-whitening", true),
            test_treatment("discontinued-treatment", false),
        ])
        .with_clinics(clinics)
        .with_dentists(vec![
            test_dentist(
                "dr-jane-smith",
                true,
                Some("Dr. Smith has practiced cosmetic dentistry for over fifteen years."),
            ),
            test_dentist("dr-new-hire", true, Some("Short bio")),
            test_dentist("dr-retired", false, None),
        ])
        .with_blog_posts(vec![
            test_post("how-to-floss", PostStatus::Published),
            test_post("unfinished-draft", PostStatus::Draft),
            test_post("old-news", PostStatus::Archived),
        ])
        .with_insurance_plans(vec![
            test_insurance("delta-dental", true),
            test_insurance("defunct-plan", false),
        ])
}
