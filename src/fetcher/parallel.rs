use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::app::FeedError;
use crate::domain::FeedSource;
use crate::fetcher::{FetchResponse, Fetcher};

pub type SharedFetcher = Arc<dyn Fetcher + Send + Sync>;

/// A settled fetch, tagged with whatever the dispatcher attached to it.
#[derive(Debug)]
pub struct Fetched<T> {
    pub tag: T,
    pub source: FeedSource,
    pub result: Result<FetchResponse, FeedError>,
}

/// Fetches that have been issued but not yet consumed.
///
/// All pending requests progress concurrently while the owner awaits
/// [`InFlight::next`]; results come back in completion order. Nothing is
/// spawned, so the owner processes every result on its own task.
pub struct InFlight<T> {
    fetcher: SharedFetcher,
    pending: FuturesUnordered<BoxFuture<'static, Fetched<T>>>,
}

impl<T: Clone + Send + 'static> InFlight<T> {
    pub fn new(fetcher: SharedFetcher) -> Self {
        Self {
            fetcher,
            pending: FuturesUnordered::new(),
        }
    }

    /// Issue one request per source, all tagged with `tag`.
    pub fn dispatch_all(&mut self, tag: T, sources: &[FeedSource]) {
        for source in sources {
            self.dispatch(tag.clone(), source.clone());
        }
    }

    pub fn dispatch(&mut self, tag: T, source: FeedSource) {
        let fetcher = self.fetcher.clone();
        tracing::debug!(feed = %source.name, url = %source.url, "fetching feed");

        self.pending.push(Box::pin(async move {
            let result = fetcher.fetch(&source.url).await;
            Fetched {
                tag,
                source,
                result,
            }
        }));
    }

    /// Next settled fetch, or `None` when nothing is pending.
    pub async fn next(&mut self) -> Option<Fetched<T>> {
        self.pending.next().await
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    struct DelayedFetcher;

    #[async_trait]
    impl Fetcher for DelayedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse, FeedError> {
            match url {
                "https://slow.example/feed" => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(FetchResponse::new(200, "slow"))
                }
                "https://down.example/feed" => Err(FeedError::Fetch("connection refused".into())),
                _ => Ok(FetchResponse::new(200, "fast")),
            }
        }
    }

    #[tokio::test]
    async fn test_results_arrive_in_completion_order() {
        let mut in_flight = InFlight::new(Arc::new(DelayedFetcher));
        in_flight.dispatch_all(
            7u64,
            &[
                FeedSource::new("Slow", "https://slow.example/feed"),
                FeedSource::new("Down", "https://down.example/feed"),
                FeedSource::new("Fast", "https://fast.example/feed"),
            ],
        );
        assert_eq!(in_flight.len(), 3);

        let mut order = Vec::new();
        while let Some(fetched) = in_flight.next().await {
            assert_eq!(fetched.tag, 7);
            order.push((fetched.source.name, fetched.result.is_ok()));
        }

        assert!(in_flight.is_empty());
        assert_eq!(order.len(), 3);
        assert_eq!(order.last(), Some(&("Slow".to_string(), true)));
        assert!(order.contains(&("Down".to_string(), false)));
    }
}
