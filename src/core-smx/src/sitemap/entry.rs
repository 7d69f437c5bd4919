use chrono::NaiveDate;

/// How often a page is expected to change, in sitemap-protocol vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

/// One `<url>` element of a URL-set document.
///
/// Constructed fresh per request and discarded with the response; nothing
/// here is ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Absolute location under the configured origin.
    pub loc: String,
    /// Date-only last modification, when the source row carries one.
    pub lastmod: Option<NaiveDate>,
    pub changefreq: ChangeFreq,
    /// Crawl priority in [0.0, 1.0].
    pub priority: f32,
}

impl UrlEntry {
    /// Priority as sitemap text: `1.0`, `0.85`, `0.7`, ...
    pub fn priority_label(&self) -> String {
        let label = format!("{}", self.priority);
        if label.contains('.') { label } else { format!("{label}.0") }
    }
}
