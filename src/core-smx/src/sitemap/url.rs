//! URL normalization and validity rules for emitted sitemap locations.

use url::Url;

/// Anything shorter than this cannot be a real absolute page URL.
const MIN_URL_LEN: usize = 12;

/// Canonicalizes a path: single leading slash, no doubled slashes, and a
/// trailing slash (the root path stays `/`).
///
/// Idempotent: normalizing an already-normalized path is a no-op.
///
/// # Examples
///
/// ```
/// # use core_smx::sitemap::url::normalize_path;
/// assert_eq!(normalize_path("clinic/smile-dental"), "/clinic/smile-dental/");
/// assert_eq!(normalize_path("//services//implants"), "/services/implants/");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('/');

    let mut prev_slash = true;
    for ch in path.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }

    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Joins a normalized path onto the fixed origin.
pub fn absolute_url(origin: &str, path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), normalize_path(path))
}

/// Checks whether a candidate location is fit to emit.
///
/// Rejects URLs that are too short to be real, contain `//` anywhere after
/// the scheme, end in `//`, or fail to parse at all. Invalid locations are
/// dropped from the document, never raised as errors — one malformed row
/// must not take the whole sitemap down.
///
/// # Examples
///
/// ```
/// # use core_smx::sitemap::url::is_valid_sitemap_url;
/// assert!(is_valid_sitemap_url("https://dentamap.com/clinic/smile-dental/"));
/// assert!(!is_valid_sitemap_url("https://dentamap.com/clinic//smile-dental/"));
/// assert!(!is_valid_sitemap_url("/clinic/smile-dental/"));
/// ```
pub fn is_valid_sitemap_url(url: &str) -> bool {
    if url.len() < MIN_URL_LEN || url.ends_with("//") {
        return false;
    }

    let after_scheme = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => return false,
    };
    if after_scheme.contains("//") {
        return false;
    }

    Url::parse(url).is_ok()
}
