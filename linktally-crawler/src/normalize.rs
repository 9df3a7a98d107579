use crate::error::{CrawlError, Result};
use url::Url;

/// Reduce a URL to the canonical key used for deduplication: lowercase
/// `hostname + path`, no scheme, no query, no trailing slash. All spellings
/// of the same page (`https://Example.com/`, `http://example.com`) collapse
/// to one key (`example.com`).
///
/// Note that the whole path is lowercased, so two server routes that differ
/// only by case share a key. That matches the documented dedup semantics;
/// servers with case-sensitive routes will see them merged.
pub fn normalize_url(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", url, e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| CrawlError::InvalidUrl(format!("{} has no hostname", url)))?;

    let mut key = format!("{}{}", host, parsed.path()).to_lowercase();
    // Strip every trailing slash, not just one, so keys never end in '/'.
    while key.ends_with('/') {
        key.pop();
    }
    Ok(key)
}
