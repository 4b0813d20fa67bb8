use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::{default_sources, FeedSource};
use crate::fetcher::{HttpFetcher, SharedFetcher};
use crate::pipeline::Aggregator;
use crate::render::RenderSink;
use crate::scheduler::{PollScheduler, SchedulerHandle};

pub struct AppContext {
    pub config: Config,
    pub sources: Vec<FeedSource>,
    pub fetcher: SharedFetcher,
}

impl AppContext {
    /// Context over the built-in feed list, fetching over HTTP.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: SharedFetcher =
            Arc::new(HttpFetcher::with_timeout(config.poll.request_timeout())?);
        Self::with_fetcher(config, default_sources(), fetcher)
    }

    pub fn with_fetcher(
        config: Config,
        sources: Vec<FeedSource>,
        fetcher: SharedFetcher,
    ) -> Result<Self> {
        for source in &sources {
            source.validate()?;
        }

        Ok(Self {
            config,
            sources,
            fetcher,
        })
    }

    /// Fresh session state rendering into `sink`.
    pub fn aggregator<K: RenderSink>(&self, sink: K) -> Aggregator<K> {
        Aggregator::with_parts(
            self.sources.clone(),
            sink,
            self.config.dedup.build_index(),
            self.config.render.build_buffer(),
        )
    }

    pub fn scheduler<K: RenderSink + Send + 'static>(
        &self,
        sink: K,
    ) -> (PollScheduler<K>, SchedulerHandle) {
        PollScheduler::new(
            self.aggregator(sink),
            self.fetcher.clone(),
            self.config.poll.interval,
            self.config.poll.update_on_start,
        )
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::app::{FeedError, NewsdeskError};
    use crate::fetcher::{FetchResponse, Fetcher};
    use crate::render::ListSink;

    struct NoFetcher;

    #[async_trait]
    impl Fetcher for NoFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<FetchResponse, FeedError> {
            Err(FeedError::Fetch("offline".into()))
        }
    }

    #[test]
    fn test_rejects_invalid_source_url() {
        let result = AppContext::with_fetcher(
            Config::default(),
            vec![FeedSource::new("Broken", "not a url")],
            Arc::new(NoFetcher),
        );
        assert!(matches!(result, Err(NewsdeskError::InvalidUrl(_))));
    }

    #[test]
    fn test_aggregator_uses_render_config() {
        let mut config = Config::default();
        config.render.capacity = 5;
        let ctx = AppContext::with_fetcher(config, default_sources(), Arc::new(NoFetcher)).unwrap();

        let aggregator = ctx.aggregator(ListSink::new());
        assert_eq!(aggregator.buffer().capacity(), 5);
        assert_eq!(aggregator.sources().len(), 3);
    }
}
