use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl PartialEq for CrawlError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidUrl(a), Self::InvalidUrl(b)) => a == b,
            (Self::Other(a), Self::Other(b)) => a == b,
            (Self::HttpError(a), Self::HttpError(b)) => a.to_string() == b.to_string(),
            (Self::JoinError(a), Self::JoinError(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
