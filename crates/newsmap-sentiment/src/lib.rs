//! News sentiment pipeline for newsmap.
//!
//! Fetches headlines from region-tagged feeds, translates them to English,
//! scores polarity and subjectivity, filters by polarity, aggregates across
//! feeds in feeds-file order, and exports geo-weighted heat points as an HTML
//! heatmap.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod heatmap;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod sources;
pub mod translate;

pub use aggregate::{Aggregate, RegionAggregator};
pub use error::SentimentError;
pub use filter::{filter_by_polarity, PolarityRange};
pub use heatmap::{heat_points, render_heatmap_html, ExportOutcome, HeatPoints, HeatmapExporter};
pub use pipeline::{ArticleFailure, ArticleOutcome, ArticlePipeline, FailureKind, FeedRun};
pub use report::RunReport;
pub use scorer::{lexicon_sentiment, LexiconScorer, Sentiment, SentimentScorer};
pub use sources::{parse_feed_entries, FeedFetcher, RawEntry, RssFeedFetcher};
pub use translate::{HttpTranslator, Translator};
