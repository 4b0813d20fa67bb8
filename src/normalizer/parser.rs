use roxmltree::{Document, Node, ParsingOptions};

use crate::app::FeedError;
use crate::domain::FeedItem;

use super::{Normalizer, RawEntry};

/// Marker element some relays forward when an upstream parser failed.
const PARSER_ERROR_TAG: &str = "parsererror";

#[derive(Clone, Default)]
pub struct FeedParser {
    normalizer: Normalizer,
}

impl FeedParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one feed document.
    ///
    /// Structural failures are reported once for the whole feed; individual
    /// entries are never an error.
    pub fn parse<'input>(
        &self,
        text: &'input str,
        source_name: &str,
    ) -> Result<ParsedFeed<'input>, FeedError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)
            .map_err(|e| FeedError::MalformedXml(e.to_string()))?;

        if doc.descendants().any(|n| n.has_tag_name(PARSER_ERROR_TAG)) {
            return Err(FeedError::MalformedXml(format!(
                "document contains a <{}> element",
                PARSER_ERROR_TAG
            )));
        }

        Ok(ParsedFeed {
            doc,
            source_name: source_name.to_string(),
            normalizer: self.normalizer.clone(),
        })
    }
}

/// A parsed feed document, not yet normalized.
pub struct ParsedFeed<'input> {
    doc: Document<'input>,
    source_name: String,
    normalizer: Normalizer,
}

impl<'input> ParsedFeed<'input> {
    /// Lazily normalize every RSS `item` and Atom `entry`, at any depth, in
    /// document order. Unidentifiable entries are skipped.
    pub fn items<'a>(&'a self) -> Box<dyn Iterator<Item = FeedItem> + 'a> {
        Box::new(
            self.doc
                .descendants()
                .filter(is_entry)
                .filter_map(move |node| {
                    self.normalizer
                        .normalize(RawEntry::new(node), &self.source_name)
                }),
        )
    }

    /// Number of `item`/`entry` elements, identifiable or not.
    pub fn entry_count(&self) -> usize {
        self.doc.descendants().filter(is_entry).count()
    }
}

fn is_entry(node: &Node<'_, '_>) -> bool {
    node.is_element() && matches!(node.tag_name().name(), "item" | "entry")
}
