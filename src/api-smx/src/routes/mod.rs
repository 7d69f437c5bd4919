use axum::{Router, middleware, routing::get};
use core_smx::health_check;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod logging_middleware;
pub mod sitemap;

//
// Router
//

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/sitemap.xml", get(sitemap::get_sitemap))
        // The sitemap is a public, unauthenticated discovery document
        .layer(CorsLayer::permissive())
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}
