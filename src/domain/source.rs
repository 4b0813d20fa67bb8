use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;

/// A syndicated feed the aggregator polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn validate(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }
}

/// The fixed feed list shown by the viewer.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("BBC World", "https://feeds.bbci.co.uk/news/world/rss.xml"),
        FeedSource::new("Reuters Top", "https://feeds.reuters.com/reuters/topNews"),
        FeedSource::new("TechCrunch", "https://techcrunch.com/feed/"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_are_valid_urls() {
        let sources = default_sources();
        assert_eq!(sources.len(), 3);
        for source in &sources {
            assert!(source.validate().is_ok(), "{} should be valid", source.url);
        }
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let source = FeedSource::new("Broken", "/feed.xml");
        assert!(source.validate().is_err());
    }
}
