use thiserror::Error;

use crate::config::ConfigError;
use crate::scheduler::SchedulerError;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NewsdeskError>;

/// Failure scoped to a single feed within a poll cycle.
///
/// These never abort the cycle; they are logged and reported per feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),
}
