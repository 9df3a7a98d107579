use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Pull every anchor href out of an HTML document, in document order,
/// resolved to absolute URL strings.
///
/// Slash-prefixed hrefs are joined onto the base URL's origin; anything else
/// must already parse as an absolute URL. An href that resolves to neither is
/// logged and skipped; one bad anchor never aborts the rest of the page.
/// Duplicates are kept; deduplication is the traversal engine's job.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(resolved) = resolve_href(base_url, href)
        {
            links.push(resolved);
        }
    }
    links
}

fn resolve_href(base: &Url, href: &str) -> Option<String> {
    // Skip non-navigational hrefs outright.
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let resolved = if href.starts_with('/') {
        base.join(href)
    } else {
        Url::parse(href)
    };

    match resolved {
        Ok(url) => {
            debug!("Resolved href {:?} to {}", href, url);
            Some(url.to_string())
        }
        Err(e) => {
            warn!("Skipping unresolvable href {:?}: {}", href, e);
            None
        }
    }
}
