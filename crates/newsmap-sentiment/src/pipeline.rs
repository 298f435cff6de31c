//! Per-feed orchestration: fetch → translate → score → tag.

use std::fmt;
use std::time::Duration;

use newsmap_core::{ArticleRecord, FeedSource, TARGET_LANG};

use crate::error::SentimentError;
use crate::scorer::SentimentScorer;
use crate::sources::{FeedFetcher, RawEntry};
use crate::translate::Translator;

/// Per-call timeout applied to fetch and translate when none is configured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Which step an article failed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Translation,
    Scoring,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Translation => write!(f, "translation"),
            FailureKind::Scoring => write!(f, "scoring"),
        }
    }
}

/// An article that was fetched but could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    pub title: String,
    pub url: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Result of processing one fetched entry.
pub type ArticleOutcome = Result<ArticleRecord, ArticleFailure>;

/// Everything one feed produced.
#[derive(Debug, Clone)]
pub struct FeedRun {
    pub source: FeedSource,
    /// Set when the fetch itself failed; the feed then has no outcomes.
    pub fetch_error: Option<String>,
    /// One outcome per fetched entry, in feed order.
    pub outcomes: Vec<ArticleOutcome>,
}

impl FeedRun {
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs fetch → translate → score for one feed at a time.
///
/// Failures are isolated: a failed fetch yields an empty [`FeedRun`], and a
/// failed translate or score drops only that one entry.
pub struct ArticlePipeline<'a> {
    fetcher: &'a dyn FeedFetcher,
    translator: &'a dyn Translator,
    scorer: &'a dyn SentimentScorer,
    call_timeout: Duration,
}

impl<'a> ArticlePipeline<'a> {
    #[must_use]
    pub fn new(
        fetcher: &'a dyn FeedFetcher,
        translator: &'a dyn Translator,
        scorer: &'a dyn SentimentScorer,
    ) -> Self {
        Self {
            fetcher,
            translator,
            scorer,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bound every fetch and translate call by `timeout`.
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Process one feed. Never fails; problems are recorded in the returned run.
    pub async fn run_feed(&self, source: &FeedSource) -> FeedRun {
        let entries = match self.fetch(&source.url).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    country = %source.country,
                    region = %source.region,
                    url = %source.url,
                    error = %e,
                    "feed fetch failed; treating as empty"
                );
                return FeedRun {
                    source: source.clone(),
                    fetch_error: Some(e.to_string()),
                    outcomes: Vec::new(),
                };
            }
        };

        if entries.is_empty() {
            tracing::info!(
                country = %source.country,
                region = %source.region,
                url = %source.url,
                "feed returned no entries"
            );
        } else {
            tracing::info!(
                country = %source.country,
                region = %source.region,
                url = %source.url,
                count = entries.len(),
                "fetched feed"
            );
        }

        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            outcomes.push(self.process_entry(source, entry).await);
        }

        FeedRun {
            source: source.clone(),
            fetch_error: None,
            outcomes,
        }
    }

    /// Translate then score one entry as a single unit of work.
    async fn process_entry(&self, source: &FeedSource, entry: RawEntry) -> ArticleOutcome {
        let fail = |title: String, kind: FailureKind, error: &SentimentError| {
            tracing::warn!(
                country = %source.country,
                region = %source.region,
                url = %source.url,
                title = %title,
                stage = %kind,
                error = %error,
                "article skipped"
            );
            ArticleFailure {
                title,
                url: source.url.clone(),
                kind,
                reason: error.to_string(),
            }
        };

        let translated = match self.translate(&entry.title, &source.source_language).await {
            Ok(text) => text,
            Err(e) => return Err(fail(entry.title, FailureKind::Translation, &e)),
        };

        let sentiment = match self.scorer.score(&translated) {
            Ok(s) if s.is_in_range() => s,
            Ok(s) => {
                let e = SentimentError::ScoringFailed(format!(
                    "scorer returned out-of-range values: polarity={}, subjectivity={}",
                    s.polarity, s.subjectivity
                ));
                return Err(fail(entry.title, FailureKind::Scoring, &e));
            }
            Err(e) => return Err(fail(entry.title, FailureKind::Scoring, &e)),
        };

        tracing::debug!(
            region = %source.region,
            title = %translated,
            polarity = sentiment.polarity,
            subjectivity = sentiment.subjectivity,
            "article scored"
        );

        Ok(ArticleRecord::from_source(
            source,
            entry.title,
            translated,
            sentiment.polarity,
            sentiment.subjectivity,
        ))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SentimentError> {
        tokio::time::timeout(self.call_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| SentimentError::Timeout {
                stage: "fetch",
                after: self.call_timeout,
            })?
    }

    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, SentimentError> {
        tokio::time::timeout(
            self.call_timeout,
            self.translator.translate(text, source_lang, TARGET_LANG),
        )
        .await
        .map_err(|_| SentimentError::Timeout {
            stage: "translate",
            after: self.call_timeout,
        })?
    }
}
