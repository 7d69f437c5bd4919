pub mod common;
pub mod sitemap;

pub use common::db_env::{get_database_url, get_db_pool};
pub use common::health::health_check;
pub use common::hostname::get_api_bind_addr;
pub use common::logging::setup_logging;
pub use common::site_origin::site_origin;
