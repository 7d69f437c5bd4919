//! Assembly: fetch the tables a section needs, hand them to the pure
//! builders, and drop anything that fails the URL validity check before it
//! can reach chunking.

use chrono::NaiveDate;

use data_model_smx::models::resolve_city_states;
use data_model_smx::store::{SiteStore, StoreError};

use crate::sitemap::chunk::{chunk, chunk_count};
use crate::sitemap::entry::UrlEntry;
use crate::sitemap::kind::SectionKind;
use crate::sitemap::policy::SitemapConfig;
use crate::sitemap::sections;
use crate::sitemap::url::is_valid_sitemap_url;
pub use crate::sitemap::xml::IndexChild;

/// Builds the full, validity-filtered entry list for one section.
///
/// Tables that don't depend on each other are fetched concurrently; the
/// per-table pagination inside the store stays sequential. The only hard
/// failure here is the store itself (pool checkout); data-quality problems
/// have all been filtered away by this point.
pub async fn build_section(
    store: &dyn SiteStore,
    config: &SitemapConfig,
    kind: SectionKind,
) -> Result<Vec<UrlEntry>, StoreError> {
    let mut entries = match kind {
        SectionKind::Static => sections::static_pages(config),
        SectionKind::States => sections::state_entries(config, &store.states().await?),
        SectionKind::Cities => {
            let (states, cities) = tokio::join!(store.states(), store.cities());
            let cities = resolve_city_states(cities?, &states?);
            sections::city_entries(config, &cities)
        }
        SectionKind::Locations => {
            let (states, cities, clinics) = tokio::join!(store.states(), store.cities(), store.clinics());
            let cities = resolve_city_states(cities?, &states?);
            sections::location_entries(config, &cities, &clinics?)
        }
        SectionKind::Services => sections::service_entries(config, &store.treatments().await?),
        SectionKind::ServiceLocations => {
            let (states, cities, treatments) = tokio::join!(store.states(), store.cities(), store.treatments());
            let cities = resolve_city_states(cities?, &states?);
            sections::service_location_entries(config, &treatments?, &cities)
        }
        SectionKind::Profiles => sections::clinic_entries(config, &store.clinics().await?),
        SectionKind::Dentists => sections::dentist_entries(config, &store.dentists().await?),
        SectionKind::Posts => sections::post_entries(config, &store.blog_posts().await?),
        SectionKind::Insurance => {
            let (plans, states) = tokio::join!(store.insurance_plans(), store.states());
            sections::insurance_entries(config, &plans?, &states?)
        }
    };

    // Filter BEFORE chunking so dropped entries never shift chunk boundaries.
    entries.retain(|e| is_valid_sitemap_url(&e.loc));
    Ok(entries)
}

/// Applies the `chunk` query parameter for chunkable sections; everything
/// else serves its full list.
///
/// Also the operational alert for the index's static estimates: whenever a
/// chunkable section's live chunk count exceeds what the index advertises,
/// crawlers can't discover the tail chunks, so warn loudly.
pub fn select_chunk<'a>(
    config: &SitemapConfig,
    kind: SectionKind,
    entries: &'a [UrlEntry],
    chunk_index: Option<usize>,
) -> &'a [UrlEntry] {
    if !kind.is_chunkable() {
        return entries;
    }

    let actual_chunks = chunk_count(entries.len(), config.chunk_size);
    let advertised = match kind {
        SectionKind::Cities => config.estimates.cities,
        SectionKind::ServiceLocations => config.estimates.service_locations,
        SectionKind::Profiles => config.estimates.profiles,
        _ => unreachable!("only chunkable kinds reach here"),
    };
    if actual_chunks > advertised {
        tracing::warn!(
            kind = kind.query_value(),
            actual_chunks,
            advertised,
            "live chunk count exceeds the index estimate; raise the SITEMAP_EST_* setting or tail chunks stay undiscovered",
        );
    }

    match chunk_index {
        Some(index) => chunk(entries, index, config.chunk_size),
        None => entries,
    }
}

/// The sitemap-index children, in the fixed order crawlers see:
/// static, states, cities chunks, services, service-location chunks,
/// profile chunks, dentists, posts, insurance.
///
/// Chunk counts come from the pre-declared estimates, not live table
/// counts — the index is polled constantly and must not fan out into
/// full-table reads.
pub fn build_index(config: &SitemapConfig, today: NaiveDate) -> Vec<IndexChild> {
    let mut children = Vec::new();
    let mut push = |kind: SectionKind, chunk: Option<usize>| {
        let loc = match chunk {
            Some(i) => format!("{}/sitemap.xml?type={}&chunk={}", config.origin, kind.query_value(), i),
            None => format!("{}/sitemap.xml?type={}", config.origin, kind.query_value()),
        };
        children.push(IndexChild { loc, lastmod: today });
    };

    push(SectionKind::Static, None);
    push(SectionKind::States, None);
    for i in 1..=config.estimates.cities {
        push(SectionKind::Cities, Some(i));
    }
    push(SectionKind::Services, None);
    for i in 1..=config.estimates.service_locations {
        push(SectionKind::ServiceLocations, Some(i));
    }
    for i in 1..=config.estimates.profiles {
        push(SectionKind::Profiles, Some(i));
    }
    push(SectionKind::Dentists, None);
    push(SectionKind::Posts, None);
    push(SectionKind::Insurance, None);

    children
}
