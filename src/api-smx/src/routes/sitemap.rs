use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderName, StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use core_smx::sitemap::{
    SectionKind, UnknownSectionKind, XmlRenderError, build_index, build_section, render_sitemap_index,
    render_url_set, select_chunk,
};
use data_model_smx::store::StoreError;

use crate::AppState;

/// Query surface of the sitemap endpoint: `?type=<section>&chunk=<n>`.
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapQuery {
    /// Section selector; the sitemap-index document when omitted.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// 1-based page of a chunkable section.
    pub chunk: Option<usize>,
}

/// Error surface of the sitemap endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum SitemapError {
    /// The `type` query value names no known section
    #[serde(rename = "unknown_type")]
    UnknownType(String),
    /// Unknown error occurred
    #[serde(rename = "unknown")]
    Unknown(String),
}

impl IntoResponse for SitemapError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            SitemapError::UnknownType(_) => StatusCode::BAD_REQUEST,
            SitemapError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

macro_rules! from_error {
    ($lib_err:path, $err_type:tt) => {
        /// Converts a `$lib_err` into an `$err_type::Unknown`.
        impl From<$lib_err> for $err_type {
            fn from(e: $lib_err) -> Self {
                $err_type::Unknown(format!("{:?}", e))
            }
        }
    };
}

from_error!(StoreError, SitemapError);
from_error!(XmlRenderError, SitemapError);

impl From<UnknownSectionKind> for SitemapError {
    fn from(e: UnknownSectionKind) -> Self {
        SitemapError::UnknownType(e.0)
    }
}

/// Headers every sitemap response carries: XML content type, a multi-hour
/// shared cache lifetime, and a crawler directive keeping the sitemap file
/// itself out of search results.
fn sitemap_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
        (header::CACHE_CONTROL, "public, max-age=21600, s-maxage=21600"),
        (HeaderName::from_static("x-robots-tag"), "noindex"),
    ]
}

/// GET /sitemap.xml - Serve a sitemap document.
///
/// `?type=` selects the section; no `type` serves the sitemap-index built
/// from the pre-declared chunk estimates. An unrecognized `type` is an
/// explicit 400 rather than a silent fallback to the index.
pub async fn get_sitemap(
    State(state): State<AppState>,
    Query(query): Query<SitemapQuery>,
) -> Result<impl IntoResponse, SitemapError> {
    let xml = match query.kind.as_deref() {
        None => {
            let children = build_index(&state.config, chrono::Utc::now().date_naive());
            render_sitemap_index(&children)?
        }
        Some(raw) => {
            let kind: SectionKind = raw.parse()?;
            let entries = build_section(state.store.as_ref(), &state.config, kind).await?;
            let page = select_chunk(&state.config, kind, &entries, query.chunk);
            tracing::debug!(
                kind = kind.query_value(),
                total = entries.len(),
                served = page.len(),
                chunk = query.chunk,
                "serving sitemap section",
            );
            render_url_set(page)?
        }
    };

    Ok((StatusCode::OK, sitemap_headers(), xml))
}
