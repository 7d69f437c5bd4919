use std::sync::Arc;

use core_smx::sitemap::SitemapConfig;
use data_model_smx::store::SiteStore;

pub mod routes;

/// Per-process state handed to every handler: the read-only store handle
/// and the sitemap policy config. The store is behind a trait object so
/// tests can swap in a fixture store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SiteStore>,
    pub config: SitemapConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>, config: SitemapConfig) -> Self {
        Self { store, config }
    }
}
