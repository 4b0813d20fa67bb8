pub mod http_fetcher;
pub mod parallel;

pub use http_fetcher::HttpFetcher;
pub use parallel::{Fetched, InFlight, SharedFetcher};

use async_trait::async_trait;

use crate::app::FeedError;

/// Raw response of one feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves a feed document, bypassing intermediate caches.
///
/// Only transport-level failures are errors; any HTTP status, including
/// 5xx, is returned as a [`FetchResponse`].
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FeedError>;
}
