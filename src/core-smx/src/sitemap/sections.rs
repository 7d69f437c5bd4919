//! One pure builder per content type: rows in, [`UrlEntry`]s out.
//!
//! Builders own the inclusion policy completely. Rows with an empty or
//! whitespace slug never produce an entry, inactive rows are skipped, and
//! thin profile content lowers priority without affecting inclusion. No
//! builder touches the store; assembly in [`super::build`] hands them
//! already-fetched rows.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use data_model_smx::models::{BlogPost, CityWithState, Clinic, Dentist, InsurancePlan, PostStatus, State, Treatment};

use crate::sitemap::entry::{ChangeFreq, UrlEntry};
use crate::sitemap::policy::{
    CITY_PRIORITY, CLINIC_PRIORITY, CLINIC_THIN_PRIORITY, DENTIST_PRIORITY, DENTIST_THIN_PRIORITY,
    INSURANCE_PLAN_PRIORITY, INSURANCE_STATE_PRIORITY, LOCATIONS_MIN_CLINIC_COUNT, POST_PRIORITY, STATE_PRIORITY,
    STATIC_PAGES, SERVICE_LOCATION_PRIORITY, SERVICE_PRIORITY, SitemapConfig, THIN_CONTENT_MIN_LEN,
};
use crate::sitemap::url::absolute_url;

fn slug_ok(slug: &str) -> bool {
    !slug.trim().is_empty()
}

fn lastmod(updated_at: chrono::DateTime<chrono::Utc>) -> Option<NaiveDate> {
    Some(updated_at.date_naive())
}

/// The hand-curated static pages, straight from the policy table.
pub fn static_pages(config: &SitemapConfig) -> Vec<UrlEntry> {
    STATIC_PAGES
        .iter()
        .map(|page| UrlEntry {
            loc: absolute_url(&config.origin, page.path),
            lastmod: None,
            changefreq: page.changefreq,
            priority: page.priority,
        })
        .collect()
}

/// `/{state}/` for every active state.
pub fn state_entries(config: &SitemapConfig, states: &[State]) -> Vec<UrlEntry> {
    states
        .iter()
        .filter(|s| s.is_active && slug_ok(&s.slug))
        .map(|s| UrlEntry {
            loc: absolute_url(&config.origin, &format!("/{}/", s.slug)),
            lastmod: lastmod(s.updated_at),
            changefreq: ChangeFreq::Weekly,
            priority: STATE_PRIORITY,
        })
        .collect()
}

/// True when a resolved city should appear at all: city active with a real
/// slug, under a resolvable, active state with a real slug.
fn city_included(cw: &CityWithState) -> Option<&State> {
    if !cw.city.is_active || !slug_ok(&cw.city.slug) {
        return None;
    }
    cw.state
        .as_ref()
        .filter(|state| state.is_active && slug_ok(&state.slug))
}

/// `/{state}/{city}/` for every active city with a resolvable active state.
pub fn city_entries(config: &SitemapConfig, cities: &[CityWithState]) -> Vec<UrlEntry> {
    cities
        .iter()
        .filter_map(|cw| {
            let state = city_included(cw)?;
            Some(UrlEntry {
                loc: absolute_url(&config.origin, &format!("/{}/{}/", state.slug, cw.city.slug)),
                lastmod: lastmod(cw.city.updated_at),
                changefreq: ChangeFreq::Weekly,
                priority: CITY_PRIORITY,
            })
        })
        .collect()
}

/// Legacy `locations` section: the cities list, additionally restricted to
/// cities with at least [`LOCATIONS_MIN_CLINIC_COUNT`] published clinics.
/// Kept distinct from [`city_entries`] on purpose; an old consumer depends
/// on the stricter quality bar.
pub fn location_entries(config: &SitemapConfig, cities: &[CityWithState], clinics: &[Clinic]) -> Vec<UrlEntry> {
    let mut clinic_counts: HashMap<Uuid, usize> = HashMap::new();
    for clinic in clinics.iter().filter(|c| c.is_active && !c.is_duplicate) {
        if let Some(city_id) = clinic.city_id {
            *clinic_counts.entry(city_id).or_default() += 1;
        }
    }

    cities
        .iter()
        .filter_map(|cw| {
            let state = city_included(cw)?;
            let clinic_count = clinic_counts.get(&cw.city.id).copied().unwrap_or(0);
            if clinic_count < LOCATIONS_MIN_CLINIC_COUNT {
                return None;
            }
            Some(UrlEntry {
                loc: absolute_url(&config.origin, &format!("/{}/{}/", state.slug, cw.city.slug)),
                lastmod: lastmod(cw.city.updated_at),
                changefreq: ChangeFreq::Weekly,
                priority: CITY_PRIORITY,
            })
        })
        .collect()
}

/// `/services/{slug}/` for every active treatment.
pub fn service_entries(config: &SitemapConfig, treatments: &[Treatment]) -> Vec<UrlEntry> {
    treatments
        .iter()
        .filter(|t| t.is_active && slug_ok(&t.slug))
        .map(|t| UrlEntry {
            loc: absolute_url(&config.origin, &format!("/services/{}/", t.slug)),
            lastmod: lastmod(t.updated_at),
            changefreq: ChangeFreq::Weekly,
            priority: SERVICE_PRIORITY,
        })
        .collect()
}

/// The cartesian product: one `/services/{service}/{state}/{city}/` entry
/// per active service, for every includable city. Cities × services is the
/// dominant scale driver and the reason chunking exists at all.
pub fn service_location_entries(
    config: &SitemapConfig,
    treatments: &[Treatment],
    cities: &[CityWithState],
) -> Vec<UrlEntry> {
    let active_services: Vec<&Treatment> = treatments.iter().filter(|t| t.is_active && slug_ok(&t.slug)).collect();

    let mut entries = Vec::with_capacity(cities.len() * active_services.len());
    for cw in cities {
        let Some(state) = city_included(cw) else { continue };
        for service in &active_services {
            entries.push(UrlEntry {
                loc: absolute_url(
                    &config.origin,
                    &format!("/services/{}/{}/{}/", service.slug, state.slug, cw.city.slug),
                ),
                lastmod: lastmod(cw.city.updated_at),
                changefreq: ChangeFreq::Weekly,
                priority: SERVICE_LOCATION_PRIORITY,
            });
        }
    }
    entries
}

fn thin(content: &Option<String>) -> bool {
    match content {
        None => true,
        Some(text) => text.len() < THIN_CONTENT_MIN_LEN,
    }
}

/// `/clinic/{slug}/` for active, non-duplicate clinics. Thin descriptions
/// keep the page listed but drop its priority.
pub fn clinic_entries(config: &SitemapConfig, clinics: &[Clinic]) -> Vec<UrlEntry> {
    clinics
        .iter()
        .filter(|c| c.is_active && !c.is_duplicate && slug_ok(&c.slug))
        .map(|c| UrlEntry {
            loc: absolute_url(&config.origin, &format!("/clinic/{}/", c.slug)),
            lastmod: lastmod(c.updated_at),
            changefreq: ChangeFreq::Weekly,
            priority: if thin(&c.description) { CLINIC_THIN_PRIORITY } else { CLINIC_PRIORITY },
        })
        .collect()
}

/// `/dentist/{slug}/` for active dentists, with the same thin-bio rule.
pub fn dentist_entries(config: &SitemapConfig, dentists: &[Dentist]) -> Vec<UrlEntry> {
    dentists
        .iter()
        .filter(|d| d.is_active && slug_ok(&d.slug))
        .map(|d| UrlEntry {
            loc: absolute_url(&config.origin, &format!("/dentist/{}/", d.slug)),
            lastmod: lastmod(d.updated_at),
            changefreq: ChangeFreq::Weekly,
            priority: if thin(&d.bio) { DENTIST_THIN_PRIORITY } else { DENTIST_PRIORITY },
        })
        .collect()
}

/// `/blog/{slug}/` for published posts only. lastmod prefers the publish
/// date over the row's updated_at.
pub fn post_entries(config: &SitemapConfig, posts: &[BlogPost]) -> Vec<UrlEntry> {
    posts
        .iter()
        .filter(|p| p.status == PostStatus::Published && slug_ok(&p.slug))
        .map(|p| UrlEntry {
            loc: absolute_url(&config.origin, &format!("/blog/{}/", p.slug)),
            lastmod: lastmod(p.published_at.unwrap_or(p.updated_at)),
            changefreq: ChangeFreq::Monthly,
            priority: POST_PRIORITY,
        })
        .collect()
}

/// `/insurance/{plan}/` per active plan, plus one `/insurance/{plan}/{state}/`
/// entry per active state for each.
pub fn insurance_entries(config: &SitemapConfig, plans: &[InsurancePlan], states: &[State]) -> Vec<UrlEntry> {
    let active_states: Vec<&State> = states.iter().filter(|s| s.is_active && slug_ok(&s.slug)).collect();

    let mut entries = Vec::new();
    for plan in plans.iter().filter(|p| p.is_active && slug_ok(&p.slug)) {
        entries.push(UrlEntry {
            loc: absolute_url(&config.origin, &format!("/insurance/{}/", plan.slug)),
            lastmod: lastmod(plan.updated_at),
            changefreq: ChangeFreq::Weekly,
            priority: INSURANCE_PLAN_PRIORITY,
        });
        for state in &active_states {
            entries.push(UrlEntry {
                loc: absolute_url(&config.origin, &format!("/insurance/{}/{}/", plan.slug, state.slug)),
                lastmod: lastmod(plan.updated_at),
                changefreq: ChangeFreq::Weekly,
                priority: INSURANCE_STATE_PRIORITY,
            });
        }
    }
    entries
}
