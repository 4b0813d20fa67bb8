use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::FeedItem;
use crate::render::RenderSink;

/// Mutation of the visible list, applied by the TUI on its next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Insert { index: usize, item: FeedItem },
    RemoveLast,
    Busy(bool),
    Notice(String),
}

/// Render sink that forwards every mutation to the TUI loop.
pub struct ChannelSink {
    tx: UnboundedSender<ViewEvent>,
    count: usize,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<ViewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, count: 0 }, rx)
    }

    fn send(&self, event: ViewEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("view closed, dropping render event");
        }
    }
}

impl RenderSink for ChannelSink {
    fn insert_at(&mut self, index: usize, item: &FeedItem) {
        self.count += 1;
        self.send(ViewEvent::Insert {
            index,
            item: item.clone(),
        });
    }

    fn remove_last(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.send(ViewEvent::RemoveLast);
    }

    fn count(&self) -> usize {
        self.count
    }

    fn set_busy(&mut self, busy: bool) {
        self.send(ViewEvent::Busy(busy));
    }

    fn notice(&mut self, message: &str) {
        self.send(ViewEvent::Notice(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Published;

    #[test]
    fn test_forwards_mutations_in_order() {
        let (mut sink, mut rx) = ChannelSink::new();
        let item = FeedItem {
            id: "a1".into(),
            title: "A".into(),
            link: "#".into(),
            published_at: Published::Invalid,
            summary: String::new(),
            source_name: "Feed".into(),
        };

        sink.set_busy(true);
        sink.prepend(&item);
        sink.remove_last();
        sink.set_busy(false);

        assert_eq!(sink.count(), 0);
        assert_eq!(rx.try_recv().unwrap(), ViewEvent::Busy(true));
        assert_eq!(
            rx.try_recv().unwrap(),
            ViewEvent::Insert { index: 0, item }
        );
        assert_eq!(rx.try_recv().unwrap(), ViewEvent::RemoveLast);
        assert_eq!(rx.try_recv().unwrap(), ViewEvent::Busy(false));
    }

    #[test]
    fn test_closed_view_does_not_panic() {
        let (mut sink, rx) = ChannelSink::new();
        drop(rx);
        sink.notice("feed down");
        sink.remove_last();
        assert_eq!(sink.count(), 0);
    }
}
