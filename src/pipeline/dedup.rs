use std::collections::{HashSet, VecDeque};

/// Identities of every item already shown this session.
///
/// Unbounded by default: identities never expire, so an item that keeps
/// appearing in a feed is rendered exactly once. [`DedupIndex::bounded`]
/// trades that guarantee for a memory cap by forgetting the oldest
/// admissions first.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<String>,
    order: VecDeque<String>,
    limit: Option<usize>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    /// Record `id` and return `true` if it was unseen; otherwise leave the
    /// index untouched and return `false`.
    pub fn admit(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }

        self.seen.insert(id.to_string());
        if let Some(limit) = self.limit {
            self.order.push_back(id.to_string());
            while self.order.len() > limit {
                if let Some(oldest) = self.order.pop_front() {
                    self.seen.remove(&oldest);
                }
            }
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget every identity. Manual recovery only.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}
