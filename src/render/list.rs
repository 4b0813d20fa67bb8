use std::collections::VecDeque;

use crate::domain::FeedItem;

use super::RenderSink;

/// In-memory sink holding the visible list, newest first.
#[derive(Debug, Default)]
pub struct ListSink {
    items: VecDeque<FeedItem>,
    busy: bool,
    notices: Vec<String>,
}

impl ListSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl RenderSink for ListSink {
    fn insert_at(&mut self, index: usize, item: &FeedItem) {
        let index = index.min(self.items.len());
        self.items.insert(index, item.clone());
    }

    fn remove_last(&mut self) {
        self.items.pop_back();
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
