//! Product policy for the sitemap: priorities, change frequencies,
//! inclusion thresholds, chunking, and the static page list. Everything a
//! product decision touches lives here as a named constant.

use crate::common::site_origin::site_origin;
use crate::sitemap::entry::ChangeFreq;

/// Maximum URL entries per served chunk. Stays well under the sitemap
/// protocol's 50k-URL ceiling while keeping documents light.
pub const CHUNK_SIZE: usize = 2500;

/// Clinic descriptions / dentist bios shorter than this count as thin
/// content and get the reduced priority.
pub const THIN_CONTENT_MIN_LEN: usize = 50;

/// The legacy `locations` section only lists cities with at least this many
/// published clinics.
pub const LOCATIONS_MIN_CLINIC_COUNT: usize = 1;

pub const STATE_PRIORITY: f32 = 0.9;
pub const CITY_PRIORITY: f32 = 0.85;
pub const SERVICE_PRIORITY: f32 = 0.8;
pub const SERVICE_LOCATION_PRIORITY: f32 = 0.7;
pub const CLINIC_PRIORITY: f32 = 0.7;
pub const CLINIC_THIN_PRIORITY: f32 = 0.5;
pub const DENTIST_PRIORITY: f32 = 0.6;
pub const DENTIST_THIN_PRIORITY: f32 = 0.4;
pub const POST_PRIORITY: f32 = 0.6;
pub const INSURANCE_PLAN_PRIORITY: f32 = 0.7;
pub const INSURANCE_STATE_PRIORITY: f32 = 0.6;

/// A hand-curated page outside the database-driven sections.
#[derive(Debug, Clone, Copy)]
pub struct StaticPage {
    pub path: &'static str,
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

/// The fixed list of static marketplace pages, most important first.
pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage { path: "/", priority: 1.0, changefreq: ChangeFreq::Daily },
    StaticPage { path: "/search/", priority: 0.9, changefreq: ChangeFreq::Daily },
    StaticPage { path: "/services/", priority: 0.8, changefreq: ChangeFreq::Weekly },
    StaticPage { path: "/insurance/", priority: 0.7, changefreq: ChangeFreq::Weekly },
    StaticPage { path: "/blog/", priority: 0.7, changefreq: ChangeFreq::Daily },
    StaticPage { path: "/for-dentists/", priority: 0.6, changefreq: ChangeFreq::Monthly },
    StaticPage { path: "/about/", priority: 0.5, changefreq: ChangeFreq::Monthly },
    StaticPage { path: "/contact/", priority: 0.5, changefreq: ChangeFreq::Monthly },
    StaticPage { path: "/faq/", priority: 0.4, changefreq: ChangeFreq::Monthly },
    StaticPage { path: "/privacy-policy/", priority: 0.3, changefreq: ChangeFreq::Yearly },
    StaticPage { path: "/terms-of-service/", priority: 0.3, changefreq: ChangeFreq::Yearly },
];

/// Pre-declared chunk counts the sitemap-index advertises for the chunkable
/// sections.
///
/// The index is polled far more often than any chunk, and exact counts
/// would mean fetching every table on every index request. These are
/// deliberate overestimates instead: an out-of-range chunk serves an empty,
/// harmless document, while an UNDER-estimate hides tail chunks from
/// crawlers. `build::select_chunk` warns whenever a live count exceeds its
/// estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEstimates {
    pub cities: usize,
    pub service_locations: usize,
    pub profiles: usize,
}

impl Default for ChunkEstimates {
    fn default() -> Self {
        Self {
            cities: 4,
            service_locations: 40,
            profiles: 8,
        }
    }
}

impl ChunkEstimates {
    /// Reads SITEMAP_EST_CITIES / SITEMAP_EST_SERVICE_LOCATIONS /
    /// SITEMAP_EST_PROFILES, keeping the defaults for anything unset or
    /// unparseable.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            cities: env_estimate("SITEMAP_EST_CITIES").unwrap_or(default.cities),
            service_locations: env_estimate("SITEMAP_EST_SERVICE_LOCATIONS").unwrap_or(default.service_locations),
            profiles: env_estimate("SITEMAP_EST_PROFILES").unwrap_or(default.profiles),
        }
    }
}

fn env_estimate(var: &str) -> Option<usize> {
    std::env::var(var).ok()?.parse().ok()
}

/// Everything the pipeline needs to know that isn't a row: where URLs are
/// rooted, how big a chunk is, and what the index advertises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapConfig {
    pub origin: String,
    pub chunk_size: usize,
    pub estimates: ChunkEstimates,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            origin: crate::common::site_origin::DEFAULT_SITE_ORIGIN.to_string(),
            chunk_size: CHUNK_SIZE,
            estimates: ChunkEstimates::default(),
        }
    }
}

impl SitemapConfig {
    pub fn from_env() -> Self {
        Self {
            origin: site_origin(),
            chunk_size: CHUNK_SIZE,
            estimates: ChunkEstimates::from_env(),
        }
    }
}
