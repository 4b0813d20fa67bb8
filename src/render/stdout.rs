use std::io::{self, Write};

use crate::domain::FeedItem;

use super::RenderSink;

/// Streams each rendered item to stdout as it is admitted.
///
/// The terminal cannot retract printed lines, so eviction only adjusts the
/// visible count.
#[derive(Debug, Default)]
pub struct StdoutSink {
    count: usize,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Card layout shared by the streaming and one-shot outputs.
pub fn format_card(item: &FeedItem) -> String {
    let mut card = format!("{}\n  {}\n", item.display_title(), item.meta_line());
    if item.has_link() {
        card.push_str(&format!("  {}\n", item.link));
    }
    if !item.summary.is_empty() {
        card.push_str(&format!("  {}\n", item.summary));
    }
    card
}

impl RenderSink for StdoutSink {
    fn insert_at(&mut self, _index: usize, item: &FeedItem) {
        self.count += 1;
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", format_card(item)) {
            tracing::warn!(error = %e, "failed to write item to stdout");
        }
    }

    fn remove_last(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    fn count(&self) -> usize {
        self.count
    }

    fn notice(&mut self, message: &str) {
        eprintln!("! {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Published;

    #[test]
    fn test_format_card_skips_placeholder_link_and_empty_summary() {
        let item = FeedItem {
            id: "a1".into(),
            title: "Headline".into(),
            link: "#".into(),
            published_at: Published::Invalid,
            summary: String::new(),
            source_name: "BBC World".into(),
        };
        assert_eq!(format_card(&item), "Headline\n  BBC World • Invalid Date\n");
    }

    #[test]
    fn test_format_card_full() {
        let item = FeedItem {
            id: "a1".into(),
            title: "Headline".into(),
            link: "https://example.com/a".into(),
            published_at: Published::Invalid,
            summary: "Body".into(),
            source_name: "BBC World".into(),
        };
        let card = format_card(&item);
        assert!(card.contains("  https://example.com/a\n"));
        assert!(card.ends_with("  Body\n"));
    }
}
