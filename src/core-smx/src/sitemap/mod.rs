//! The sitemap pipeline: rows in, XML documents out.
//!
//! A request names a [`SectionKind`] and optionally a chunk index. Assembly
//! ([`build`]) fetches the tables that section needs, the pure builders in
//! [`sections`] turn rows into [`UrlEntry`]s under the policy constants in
//! [`policy`], invalid URLs are dropped, [`chunk`] slices the requested
//! page, and [`xml`] renders the final document.

pub mod build;
pub mod chunk;
pub mod entry;
pub mod kind;
pub mod policy;
pub mod sections;
pub mod url;
pub mod xml;

pub use build::{IndexChild, build_index, build_section, select_chunk};
pub use chunk::{chunk, chunk_count};
pub use entry::{ChangeFreq, UrlEntry};
pub use kind::{SectionKind, UnknownSectionKind};
pub use policy::{ChunkEstimates, SitemapConfig};
pub use xml::{XmlRenderError, render_sitemap_index, render_url_set};
