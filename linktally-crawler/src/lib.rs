pub mod crawler;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod result;

pub use crawler::{Crawler, ProgressCallback};
pub use error::CrawlError;
pub use extract::extract_links;
pub use normalize::normalize_url;
pub use result::{CrawlIssue, CrawlOutcome, IssueKind};
