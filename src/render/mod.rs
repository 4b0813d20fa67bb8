//! Render sinks: the visible side of the [`RenderBuffer`](crate::pipeline::RenderBuffer).
//!
//! A sink mirrors every buffer mutation, so after any call sequence its
//! contents match the buffer.

pub mod list;
pub mod stdout;

pub use list::ListSink;
pub use stdout::{format_card, StdoutSink};

use crate::domain::FeedItem;

pub trait RenderSink {
    /// Show `item` at `index` (0 is the most recent position).
    fn insert_at(&mut self, index: usize, item: &FeedItem);

    /// Drop the oldest (last) visible item.
    fn remove_last(&mut self);

    fn count(&self) -> usize;

    fn prepend(&mut self, item: &FeedItem) {
        self.insert_at(0, item);
    }

    /// Busy indicator, toggled around manual refreshes only.
    fn set_busy(&mut self, _busy: bool) {}

    /// Transient status text, e.g. a feed failure.
    fn notice(&mut self, _message: &str) {}
}
