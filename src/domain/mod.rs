pub mod item;
pub mod published;
pub mod source;

pub use item::{FeedItem, PLACEHOLDER_LINK, SUMMARY_MAX_CHARS};
pub use published::Published;
pub use source::{default_sources, FeedSource};
