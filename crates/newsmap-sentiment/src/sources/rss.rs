//! RSS/Atom feed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{FeedFetcher, RawEntry};
use crate::error::SentimentError;

/// Fetches a feed over HTTP and parses it with `feed-rs`.
///
/// Handles RSS 0.9/1.0/2.0, Atom and JSON Feed bodies.
pub struct RssFeedFetcher {
    client: Client,
}

impl RssFeedFetcher {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for RssFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SentimentError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_feed_entries(&body)
    }
}

/// Parse a feed body into entries, keeping feed order.
///
/// Titles have whitespace collapsed; titles the feed marks as HTML also have
/// their tags stripped. Plain-text titles are already entity-decoded, so a
/// literal `<` in them is kept. Entries with no title, or a title that is
/// empty after cleanup, are skipped.
///
/// # Errors
///
/// Returns [`SentimentError::Feed`] if the body is not a recognised feed.
pub fn parse_feed_entries(body: &[u8]) -> Result<Vec<RawEntry>, SentimentError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| SentimentError::Feed(e.to_string()))?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title)
        .map(|title| {
            if title.content_type.essence().to_string() == "text/html" {
                strip_html(&title.content)
            } else {
                collapse_whitespace(&title.content)
            }
        })
        .filter(|title| !title.is_empty())
        .map(RawEntry::new)
        .collect())
}

/// Strip HTML tags from a string and normalize whitespace.
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
