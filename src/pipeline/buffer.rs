use std::collections::VecDeque;

use serde::Deserialize;

use crate::domain::FeedItem;

pub const DEFAULT_CAPACITY: usize = 100;

/// How the buffer positions a newly inserted item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderOrder {
    /// Most recently inserted first, regardless of publication time.
    #[default]
    Arrival,
    /// Newest publication time first. Invalid timestamps count as the
    /// oldest; on a tie the later insertion goes first.
    Published,
}

/// Where an insert landed and what, if anything, fell off the back.
#[derive(Debug)]
pub struct Placement {
    pub index: usize,
    pub evicted: Option<FeedItem>,
}

/// Bounded visible list, newest first.
#[derive(Debug)]
pub struct RenderBuffer {
    items: VecDeque<FeedItem>,
    capacity: usize,
    order: RenderOrder,
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, RenderOrder::Arrival)
    }
}

impl RenderBuffer {
    pub fn new(capacity: usize, order: RenderOrder) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
            order,
        }
    }

    /// Insert `item`; if the list then exceeds capacity exactly one item is
    /// removed from the back.
    pub fn insert(&mut self, item: FeedItem) -> Placement {
        let index = match self.order {
            RenderOrder::Arrival => 0,
            RenderOrder::Published => self
                .items
                .iter()
                .position(|existing| existing.published_at <= item.published_at)
                .unwrap_or(self.items.len()),
        };

        self.items.insert(index, item);

        let evicted = if self.items.len() > self.capacity {
            self.items.pop_back()
        } else {
            None
        };

        Placement { index, evicted }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FeedItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Published;

    fn item(id: &str, published: &str) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: id.to_string(),
            link: "#".to_string(),
            published_at: Published::parse(Some(published)),
            summary: String::new(),
            source_name: "Test".to_string(),
        }
    }

    #[test]
    fn test_insert_prepends() {
        let mut buffer = RenderBuffer::default();
        buffer.insert(item("first", ""));
        let placement = buffer.insert(item("second", ""));

        assert_eq!(placement.index, 0);
        assert!(placement.evicted.is_none());
        let ids: Vec<&str> = buffer.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn test_evicts_exactly_one_after_capacity() {
        let mut buffer = RenderBuffer::default();
        let mut last = None;
        for i in 0..101 {
            last = Some(buffer.insert(item(&format!("item-{}", i), "")));
        }

        assert_eq!(buffer.len(), 100);
        let evicted = last.and_then(|p| p.evicted).unwrap();
        assert_eq!(evicted.id, "item-0");

        let ids: Vec<String> = buffer.iter().map(|i| i.id.clone()).collect();
        let expected: Vec<String> = (1..101).rev().map(|i| format!("item-{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_arrival_ignores_publication_time() {
        let mut buffer = RenderBuffer::default();
        buffer.insert(item("newer", "2024-06-01T00:00:00Z"));
        buffer.insert(item("older", "2020-01-01T00:00:00Z"));

        assert_eq!(buffer.get(0).unwrap().id, "older");
    }

    #[test]
    fn test_published_order_sorts_newest_first() {
        let mut buffer = RenderBuffer::new(10, RenderOrder::Published);
        buffer.insert(item("mid", "2022-01-01T00:00:00Z"));
        buffer.insert(item("invalid", "garbage"));
        buffer.insert(item("new", "2024-01-01T00:00:00Z"));
        let placement = buffer.insert(item("old", "2020-01-01T00:00:00Z"));

        assert_eq!(placement.index, 2);
        let ids: Vec<&str> = buffer.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "invalid"]);
    }

    #[test]
    fn test_published_order_tie_puts_later_insert_first() {
        let mut buffer = RenderBuffer::new(10, RenderOrder::Published);
        buffer.insert(item("a", "2024-01-01T00:00:00Z"));
        buffer.insert(item("b", "2024-01-01T00:00:00Z"));
        buffer.insert(item("x", ""));
        buffer.insert(item("y", ""));

        let ids: Vec<&str> = buffer.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "y", "x"]);
    }

    #[test]
    fn test_published_order_evicts_oldest() {
        let mut buffer = RenderBuffer::new(2, RenderOrder::Published);
        buffer.insert(item("new", "2024-01-01T00:00:00Z"));
        buffer.insert(item("mid", "2022-01-01T00:00:00Z"));
        let placement = buffer.insert(item("invalid", "???"));

        assert_eq!(placement.index, 2);
        assert_eq!(placement.evicted.unwrap().id, "invalid");
        assert_eq!(buffer.len(), 2);
    }
}
