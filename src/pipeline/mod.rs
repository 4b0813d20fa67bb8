//! Per-feed ingestion: parse, de-duplicate, buffer, render.

pub mod buffer;
pub mod dedup;

pub use buffer::{Placement, RenderBuffer, RenderOrder, DEFAULT_CAPACITY};
pub use dedup::DedupIndex;

use crate::app::FeedError;
use crate::domain::{FeedItem, FeedSource};
use crate::fetcher::FetchResponse;
use crate::normalizer::FeedParser;
use crate::render::RenderSink;

/// How a single feed fared in a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Ok,
    /// The document parsed but produced no identifiable items.
    Empty,
    Failed(FeedError),
}

#[derive(Debug, Clone)]
pub struct FeedReport {
    pub source: String,
    /// Identifiable items the feed produced, seen or not.
    pub yielded: usize,
    pub admitted: usize,
    pub status: FeedStatus,
}

impl FeedReport {
    fn failed(source: &FeedSource, error: FeedError) -> Self {
        Self {
            source: source.name.clone(),
            yielded: 0,
            admitted: 0,
            status: FeedStatus::Failed(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, FeedStatus::Failed(_))
    }
}

/// Session state of the aggregation pipeline.
///
/// Owns the seen-identity set, the visible buffer and the sink mirroring
/// it. Everything here is mutated from a single task, one feed result at a
/// time.
pub struct Aggregator<K> {
    sources: Vec<FeedSource>,
    parser: FeedParser,
    seen: DedupIndex,
    buffer: RenderBuffer,
    sink: K,
}

impl<K: RenderSink> Aggregator<K> {
    pub fn new(sources: Vec<FeedSource>, sink: K) -> Self {
        Self::with_parts(sources, sink, DedupIndex::new(), RenderBuffer::default())
    }

    pub fn with_parts(
        sources: Vec<FeedSource>,
        sink: K,
        seen: DedupIndex,
        buffer: RenderBuffer,
    ) -> Self {
        Self {
            sources,
            parser: FeedParser::new(),
            seen,
            buffer,
            sink,
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn buffer(&self) -> &RenderBuffer {
        &self.buffer
    }

    pub fn seen(&self) -> &DedupIndex {
        &self.seen
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Handle one settled fetch. Failures are logged, surfaced as a sink
    /// notice and returned in the report; they never propagate.
    pub fn ingest(
        &mut self,
        source: &FeedSource,
        fetched: Result<FetchResponse, FeedError>,
    ) -> FeedReport {
        let report = self.process(source, fetched);

        match &report.status {
            FeedStatus::Ok => tracing::info!(
                feed = %report.source,
                yielded = report.yielded,
                admitted = report.admitted,
                "feed processed"
            ),
            FeedStatus::Empty => {
                tracing::warn!(feed = %report.source, "feed yielded no entries")
            }
            FeedStatus::Failed(error) => {
                tracing::error!(feed = %report.source, url = %source.url, error = %error, "feed failed");
                self.sink
                    .notice(&format!("{}: {}", report.source, error));
            }
        }

        report
    }

    fn process(
        &mut self,
        source: &FeedSource,
        fetched: Result<FetchResponse, FeedError>,
    ) -> FeedReport {
        let response = match fetched {
            Ok(response) => response,
            Err(error) => return FeedReport::failed(source, error),
        };

        if !response.is_success() {
            return FeedReport::failed(source, FeedError::HttpStatus(response.status));
        }

        let parsed = match self.parser.parse(&response.body, &source.name) {
            Ok(parsed) => parsed,
            Err(error) => return FeedReport::failed(source, error),
        };

        let mut yielded = 0;
        let mut admitted = 0;
        for item in parsed.items() {
            yielded += 1;
            if self.seen.admit(&item.id) {
                self.render(item);
                admitted += 1;
            }
        }

        FeedReport {
            source: source.name.clone(),
            yielded,
            admitted,
            status: if yielded == 0 {
                FeedStatus::Empty
            } else {
                FeedStatus::Ok
            },
        }
    }

    fn render(&mut self, item: FeedItem) {
        tracing::debug!(id = %item.id, feed = %item.source_name, "rendering item");
        let placement = self.buffer.insert(item);

        if let Some(shown) = self.buffer.get(placement.index) {
            self.sink.insert_at(placement.index, shown);
        } else if let Some(evicted) = &placement.evicted {
            // Landed past the last slot and was evicted straight away
            self.sink.insert_at(placement.index, evicted);
        }
        if placement.evicted.is_some() {
            self.sink.remove_last();
        }
    }

    /// Forget every seen identity so the next cycle re-admits current items.
    pub fn reset_seen(&mut self) {
        tracing::info!(forgotten = self.seen.len(), "resetting seen identities");
        self.seen.reset();
    }
}
