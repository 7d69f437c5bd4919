//! Integration tests for the sitemap API routes
//!
//! Drives the full router over the in-memory fixture store:
//! - GET /sitemap.xml                      - sitemap-index document
//! - GET /sitemap.xml?type=<section>       - URL-set documents per section
//! - GET /sitemap.xml?type=...&chunk=<n>   - chunked sections
//! - GET /health                           - liveness

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use api_smx::{AppState, routes::router};
use core_smx::sitemap::{ChunkEstimates, SitemapConfig};
use data_model_smx::store::SiteStore;
use data_model_smx::test_helpers::{FailingStore, FixtureStore, marketplace_fixtures, test_clinic};

/// Router over the canned marketplace fixtures and default config.
fn test_app() -> axum::Router {
    app_with(Arc::new(marketplace_fixtures()), SitemapConfig::default())
}

fn app_with(store: Arc<dyn SiteStore>, config: SitemapConfig) -> axum::Router {
    router().with_state(AppState::new(store, config))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn url_count(xml: &str) -> usize {
    xml.matches("<url>").count()
}

//
// Sitemap index (no `type`)
//

#[tokio::test]
async fn test_index_is_the_default_document() {
    let (status, headers, body) = get(test_app(), "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/xml; charset=utf-8"
    );
    assert!(body.contains("<sitemapindex"));
    assert!(body.contains("type=static"));
    // The & separating query params must arrive escaped
    assert!(body.contains("type=cities&amp;chunk=1"));
}

#[tokio::test]
async fn test_index_advertises_the_estimated_chunk_fanout() {
    let config = SitemapConfig {
        estimates: ChunkEstimates {
            cities: 2,
            service_locations: 3,
            profiles: 1,
        },
        ..SitemapConfig::default()
    };
    let (_, _, body) = get(app_with(Arc::new(marketplace_fixtures()), config), "/sitemap.xml").await;

    assert_eq!(body.matches("type=cities&amp;chunk=").count(), 2);
    assert_eq!(body.matches("type=service-locations&amp;chunk=").count(), 3);
    assert_eq!(body.matches("type=profiles&amp;chunk=").count(), 1);
    // index children carry a lastmod of today
    assert!(body.contains("<lastmod>"));
}

#[tokio::test]
async fn test_index_needs_no_store_reads() {
    // Even a store that fails every read can serve the index.
    let (status, _, body) = get(app_with(Arc::new(FailingStore), SitemapConfig::default()), "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<sitemapindex"));
}

//
// Section documents
//

#[tokio::test]
async fn test_cities_section_drops_inactive_and_orphan_states() {
    let (status, _, body) = get(test_app(), "/sitemap.xml?type=cities").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(url_count(&body), 3);
    assert!(body.contains("https://dentamap.com/california/los-angeles/"));
    assert!(!body.contains("texas"));
    assert!(!body.contains("orphanville"));
}

#[tokio::test]
async fn test_locations_is_the_stricter_legacy_alias() {
    let (_, _, cities) = get(test_app(), "/sitemap.xml?type=cities").await;
    let (_, _, locations) = get(test_app(), "/sitemap.xml?type=locations").await;

    // Only cities with published clinics survive the legacy filter.
    assert_eq!(url_count(&cities), 3);
    assert_eq!(url_count(&locations), 2);
}

#[tokio::test]
async fn test_profiles_and_clinics_serve_the_same_document() {
    let (_, _, profiles) = get(test_app(), "/sitemap.xml?type=profiles").await;
    let (_, _, clinics) = get(test_app(), "/sitemap.xml?type=clinics").await;

    assert_eq!(profiles, clinics);
    assert_eq!(url_count(&profiles), 3);
}

#[tokio::test]
async fn test_thin_clinic_description_gets_reduced_priority() {
    let store = FixtureStore::new().with_clinics(vec![test_clinic("smile-dental", true, false, None)]);
    let (_, _, body) = get(app_with(Arc::new(store), SitemapConfig::default()), "/sitemap.xml?type=profiles").await;

    assert_eq!(url_count(&body), 1);
    assert!(body.contains("<loc>https://dentamap.com/clinic/smile-dental/</loc>"));
    assert!(body.contains("<priority>0.5</priority>"));
    assert!(body.contains("<changefreq>weekly</changefreq>"));
}

#[tokio::test]
async fn test_posts_section_lists_only_published() {
    let (_, _, body) = get(test_app(), "/sitemap.xml?type=posts").await;

    assert_eq!(url_count(&body), 1);
    assert!(body.contains("/blog/how-to-floss/"));
    assert!(body.contains("<changefreq>monthly</changefreq>"));
}

#[tokio::test]
async fn test_insurance_section_emits_plan_and_state_combos() {
    // 1 active plan + 2 active states in the fixtures
    let (_, _, body) = get(test_app(), "/sitemap.xml?type=insurance").await;

    assert_eq!(url_count(&body), 3);
    assert!(body.contains("/insurance/delta-dental/"));
    assert!(body.contains("/insurance/delta-dental/california/"));
    assert!(!body.contains("defunct-plan"));
}

#[tokio::test]
async fn test_static_section_serves_the_fixed_page_list() {
    let (_, _, body) = get(test_app(), "/sitemap.xml?type=static").await;

    assert!(body.contains("<loc>https://dentamap.com/</loc>"));
    assert!(body.contains("<priority>1.0</priority>"));
    assert!(body.contains("/privacy-policy/"));
}

//
// Chunking
//

#[tokio::test]
async fn test_chunk_one_holds_everything_under_the_chunk_size() {
    // 3 includable cities x 2 active services = 6 combinations, far under
    // the default chunk size.
    let (_, _, body) = get(test_app(), "/sitemap.xml?type=service-locations&chunk=1").await;
    assert_eq!(url_count(&body), 6);
}

#[tokio::test]
async fn test_chunk_past_the_end_is_an_empty_document() {
    let (status, _, body) = get(test_app(), "/sitemap.xml?type=service-locations&chunk=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(url_count(&body), 0);
    assert!(body.contains("urlset"));
}

#[tokio::test]
async fn test_small_chunk_size_pages_the_section() {
    let config = SitemapConfig {
        chunk_size: 2,
        ..SitemapConfig::default()
    };
    let store: Arc<dyn SiteStore> = Arc::new(marketplace_fixtures());

    let (_, _, page1) = get(app_with(store.clone(), config.clone()), "/sitemap.xml?type=cities&chunk=1").await;
    let (_, _, page2) = get(app_with(store.clone(), config.clone()), "/sitemap.xml?type=cities&chunk=2").await;
    let (_, _, all) = get(app_with(store, config), "/sitemap.xml?type=cities").await;

    assert_eq!(url_count(&page1), 2);
    assert_eq!(url_count(&page2), 1);
    assert_eq!(url_count(&all), 3);
}

#[tokio::test]
async fn test_chunk_param_is_ignored_for_non_chunkable_sections() {
    let (_, _, with_chunk) = get(test_app(), "/sitemap.xml?type=states&chunk=7").await;
    let (_, _, without) = get(test_app(), "/sitemap.xml?type=states").await;

    assert_eq!(with_chunk, without);
    assert_eq!(url_count(&with_chunk), 2);
}

//
// Error surface
//

#[tokio::test]
async fn test_unknown_type_is_a_400_not_the_index() {
    let (status, _, body) = get(test_app(), "/sitemap.xml?type=everything").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "unknown_type");
    assert_eq!(error["details"], "everything");
}

#[tokio::test]
async fn test_store_failure_surfaces_as_500_json() {
    let (status, _, body) = get(app_with(Arc::new(FailingStore), SitemapConfig::default()), "/sitemap.xml?type=states").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "unknown");
}

//
// Headers
//

#[tokio::test]
async fn test_sitemap_responses_carry_cache_and_robots_headers() {
    let (_, headers, _) = get(test_app(), "/sitemap.xml?type=states").await;

    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=21600, s-maxage=21600"
    );
    assert_eq!(headers.get("x-robots-tag").unwrap(), "noindex");
}

#[tokio::test]
async fn test_cors_is_open() {
    let request = Request::builder()
        .uri("/sitemap.xml?type=states")
        .header(header::ORIGIN, "https://crawler.example")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("open CORS header"),
        "*"
    );
}

//
// Health
//

#[tokio::test]
async fn test_health_check() {
    let (status, _, body) = get(test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "healthy");
}
