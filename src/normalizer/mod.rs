pub mod parser;

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;
use roxmltree::Node;

use crate::domain::{FeedItem, Published, PLACEHOLDER_LINK, SUMMARY_MAX_CHARS};

pub use parser::{FeedParser, ParsedFeed};

const IDENTITY_FIELDS: &[&str] = &["guid", "id", "link"];
const DATE_FIELDS: &[&str] = &["pubDate", "updated", "published", "date"];
const SUMMARY_FIELDS: &[&str] = &["description", "summary", "content"];

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
/// Tag-shaped markup only, so decoded comparisons like `1 < 2 > 0` survive.
static DECODED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").unwrap());

/// A raw RSS `item` or Atom `entry` element.
///
/// Fields are looked up among the element's direct children by local name,
/// so namespaced Atom documents match the same way as plain RSS.
#[derive(Debug, Clone, Copy)]
pub struct RawEntry<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> RawEntry<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// First element child with the given local name.
    pub fn child(&self, name: &str) -> Option<Node<'a, 'input>> {
        self.node
            .children()
            .find(|child| child.is_element() && child.tag_name().name() == name)
    }

    /// Concatenated text content of the named child, if the child exists.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(text_content)
    }

    fn first_present(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.child_text(name))
    }
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Map one raw entry to a [`FeedItem`].
    ///
    /// Returns `None` when the entry has no usable guid, id or link; such
    /// entries cannot be de-duplicated and are dropped by the caller.
    pub fn normalize(&self, entry: RawEntry<'_, '_>, source_name: &str) -> Option<FeedItem> {
        let id = identity(&entry)?;

        let title = entry
            .child_text("title")
            .map(|t| decode_html_entities(t.trim()).into_owned())
            .unwrap_or_default();

        let published_at = Published::parse(entry.first_present(DATE_FIELDS).as_deref());

        let summary = entry
            .first_present(SUMMARY_FIELDS)
            .map(|body| summarize(&body))
            .unwrap_or_default();

        Some(FeedItem {
            id,
            title,
            link: link(&entry),
            published_at,
            summary,
            source_name: source_name.to_string(),
        })
    }
}

fn identity(entry: &RawEntry<'_, '_>) -> Option<String> {
    IDENTITY_FIELDS.iter().find_map(|name| {
        entry
            .child_text(name)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    })
}

fn link(entry: &RawEntry<'_, '_>) -> String {
    let Some(node) = entry.child("link") else {
        return PLACEHOLDER_LINK.to_string();
    };

    let text = text_content(node);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    node.attribute("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .unwrap_or(PLACEHOLDER_LINK)
        .to_string()
}

/// Plain-text summary: markup removed, entities decoded, capped at
/// [`SUMMARY_MAX_CHARS`] characters.
///
/// Double-escaped bodies only turn into markup once decoded, so tags are
/// stripped again afterwards.
pub fn summarize(body: &str) -> String {
    let stripped = strip_tags(body);
    let decoded = decode_html_entities(&stripped);
    let plain = DECODED_TAG.replace_all(&decoded, "");
    truncate_chars(&plain, SUMMARY_MAX_CHARS)
}

pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
