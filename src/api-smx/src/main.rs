use std::sync::Arc;

use core_smx::sitemap::SitemapConfig;
use core_smx::{get_api_bind_addr, get_db_pool, setup_logging};
use data_model_smx::store::PgStore;

use api_smx::{AppState, routes};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_smx=debug,tower_http=debug");

    let pool = get_db_pool().await;
    let state = AppState::new(Arc::new(PgStore::new(pool)), SitemapConfig::from_env());
    let app = routes::router().with_state(state);

    let addr = get_api_bind_addr().expect("Invalid HOST or PORT");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to address {addr}: {e}"));
    axum::serve(listener, app).await.unwrap();
}
