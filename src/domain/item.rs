use serde::Serialize;

use super::Published;

/// Maximum summary length, in characters.
pub const SUMMARY_MAX_CHARS: usize = 280;

/// Link used when an entry carries neither link text nor an `href`.
pub const PLACEHOLDER_LINK: &str = "#";

/// A feed entry normalized from either RSS or Atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    /// Identity used for de-duplication: trimmed guid, id or link.
    pub id: String,
    pub title: String,
    pub link: String,
    pub published_at: Published,
    pub summary: String,
    pub source_name: String,
}

impl FeedItem {
    /// `"{source} • {local time}"`, shown under the headline.
    pub fn meta_line(&self) -> String {
        format!("{} • {}", self.source_name, self.published_at.localized())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn has_link(&self) -> bool {
        self.link != PLACEHOLDER_LINK
    }
}
