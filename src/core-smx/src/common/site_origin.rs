/// Canonical public origin used when no SITE_ORIGIN env var is set.
pub const DEFAULT_SITE_ORIGIN: &str = "https://dentamap.com";

/// Gets the public origin all sitemap URLs are rooted under, from the env
/// var SITE_ORIGIN. Any trailing slash is trimmed so path joining stays
/// double-slash free.
pub fn site_origin() -> String {
    let origin = std::env::var("SITE_ORIGIN").unwrap_or_else(|_| DEFAULT_SITE_ORIGIN.to_string());
    origin.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin_has_no_trailing_slash() {
        assert!(!DEFAULT_SITE_ORIGIN.ends_with('/'));
    }
}
