//! Feed sources: the fetch contract and its RSS/Atom implementation.

mod rss;

pub use rss::{parse_feed_entries, RssFeedFetcher};

use async_trait::async_trait;

use crate::error::SentimentError;

/// One headline as returned by a feed, before translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
}

impl RawEntry {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Turns a feed URL into raw headline entries, in feed order.
///
/// An empty `Vec` means the feed had nothing to offer and is not an error.
/// Errors are reported by the pipeline and handled the same way as an empty
/// feed.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SentimentError>;
}
