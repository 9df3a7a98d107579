use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What kept a visited page from being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Network-level failure while fetching the page.
    FetchFailed,
    /// The server answered with an error status (>= 400).
    HttpStatus,
    /// The response was not an HTML document.
    NonHtml,
    /// A discovered link could not be turned into a page key.
    BadLink,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueKind::FetchFailed => "fetch failed",
            IssueKind::HttpStatus => "http status",
            IssueKind::NonHtml => "non-html",
            IssueKind::BadLink => "bad link",
        };
        write!(f, "{}", label)
    }
}

/// One recoverable problem encountered during a crawl. The crawl itself
/// carries on; these exist so callers and tests can see what was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlIssue {
    pub url: String,
    pub kind: IssueKind,
    pub detail: String,
}

impl CrawlIssue {
    pub fn new(url: impl Into<String>, kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            detail: detail.into(),
        }
    }
}

/// Final product of a crawl: how many times each normalized page key was
/// referenced, plus everything that was skipped along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// Normalized page key -> reference count. Every key present has
    /// a count of at least 1.
    pub pages: HashMap<String, u64>,
    pub issues: Vec<CrawlIssue>,
}

impl CrawlOutcome {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn total_links(&self) -> u64 {
        self.pages.values().sum()
    }

    /// Pages ordered by descending count; equal counts order by key so the
    /// result is deterministic.
    pub fn sorted_pages(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .pages
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_pages_orders_by_count_then_key() {
        let outcome = CrawlOutcome {
            pages: HashMap::from([
                ("example.com".to_string(), 1),
                ("example.com/b".to_string(), 3),
                ("example.com/a".to_string(), 3),
            ]),
            issues: Vec::new(),
        };

        assert_eq!(
            outcome.sorted_pages(),
            vec![
                ("example.com/a".to_string(), 3),
                ("example.com/b".to_string(), 3),
                ("example.com".to_string(), 1),
            ]
        );
        assert_eq!(outcome.total_pages(), 3);
        assert_eq!(outcome.total_links(), 7);
    }
}
