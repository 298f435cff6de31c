//! End-to-end aggregation tests using in-memory collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use newsmap_core::{parse_feeds, FeedSource, HeatPoint, StaticGeoIndex};
use newsmap_sentiment::{
    heat_points, ArticlePipeline, FailureKind, PolarityRange, RawEntry, RegionAggregator,
    Sentiment, SentimentError, SentimentScorer, Translator,
};

/// Serves fixed entries per URL, optionally after a delay. Unknown URLs stall.
#[derive(Default)]
struct FakeFetcher {
    feeds: HashMap<String, (Duration, Vec<&'static str>)>,
}

impl FakeFetcher {
    fn with_feed(mut self, url: &str, entries: Vec<&'static str>) -> Self {
        self.feeds.insert(url.to_string(), (Duration::ZERO, entries));
        self
    }

    fn with_slow_feed(mut self, url: &str, delay: Duration, entries: Vec<&'static str>) -> Self {
        self.feeds.insert(url.to_string(), (delay, entries));
        self
    }
}

#[async_trait]
impl newsmap_sentiment::FeedFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SentimentError> {
        let Some((delay, entries)) = self.feeds.get(url) else {
            return std::future::pending().await;
        };
        tokio::time::sleep(*delay).await;
        Ok(entries.iter().copied().map(RawEntry::new).collect())
    }
}

/// Returns the input unchanged; fails on titles starting with "!".
struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, SentimentError> {
        if text.starts_with('!') {
            Err(SentimentError::TranslationFailed(format!("cannot translate {text}")))
        } else {
            Ok(text.to_string())
        }
    }
}

/// Looks up a fixed polarity per text; unknown text fails.
struct FakeScorer(HashMap<&'static str, f64>);

impl SentimentScorer for FakeScorer {
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        self.0
            .get(text)
            .map(|&polarity| Sentiment {
                polarity,
                subjectivity: 0.5,
            })
            .ok_or_else(|| SentimentError::ScoringFailed(format!("no score for {text}")))
    }
}

fn scorer(pairs: &[(&'static str, f64)]) -> FakeScorer {
    FakeScorer(pairs.iter().copied().collect())
}

fn sources(json: &str) -> Vec<FeedSource> {
    parse_feeds(Path::new("rss_feeds.json"), json)
        .expect("valid feeds")
        .sources("da")
}

#[tokio::test]
async fn copenhagen_scenario_keeps_neutral_record_and_maps_it() {
    let fetcher = FakeFetcher::default().with_feed("https://feeds.example/url1", vec!["A", "B"]);
    let scorer = scorer(&[("A", 0.6), ("B", -0.1)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::new(-0.5, 0.5));

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {"Copenhagen": ["https://feeds.example/url1"]}}"#,
        ))
        .await;

    assert_eq!(aggregate.records.len(), 1);
    let record = &aggregate.records[0];
    assert_eq!(record.original_title, "B");
    assert_eq!(record.country, "Denmark");
    assert_eq!(record.region, "Copenhagen");
    assert_eq!(aggregate.report.articles_scored, 2);
    assert_eq!(aggregate.report.records_kept, 1);

    let out = heat_points(&aggregate.records, &StaticGeoIndex::builtin());
    assert_eq!(
        out.points,
        vec![HeatPoint {
            latitude: 55.6761,
            longitude: 12.5683,
            weight: -0.1
        }]
    );
}

#[tokio::test]
async fn unknown_region_keeps_record_but_yields_no_heat_point() {
    let fetcher = FakeFetcher::default().with_feed("https://feeds.example/url1", vec!["A", "B"]);
    let scorer = scorer(&[("A", 0.6), ("B", -0.1)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {"Odense": ["https://feeds.example/url1"]}}"#,
        ))
        .await;

    assert_eq!(aggregate.records.len(), 1);
    assert_eq!(aggregate.records[0].region, "Odense");

    let out = heat_points(&aggregate.records, &StaticGeoIndex::builtin());
    assert!(out.points.is_empty());
    assert_eq!(out.unmapped, vec![("Odense".to_string(), 1)]);
}

#[tokio::test]
async fn output_follows_feeds_file_order_even_when_feeds_finish_out_of_order() {
    let fetcher = FakeFetcher::default()
        .with_slow_feed("https://se.example/1", Duration::from_millis(80), vec!["s1", "s2"])
        .with_slow_feed("https://dk.example/r", Duration::from_millis(40), vec!["r1"])
        .with_feed("https://dk.example/a", vec!["a1", "a2"]);
    let scorer = scorer(&[("s1", 0.1), ("s2", 0.2), ("r1", 0.3), ("a1", -0.1), ("a2", -0.2)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator =
        RegionAggregator::new(pipeline, PolarityRange::default()).with_max_concurrent_feeds(3);

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{
                "Sweden": { "Stockholm": ["https://se.example/1"] },
                "Denmark": {
                    "Roskilde": ["https://dk.example/r"],
                    "Aarhus": ["https://dk.example/a"]
                }
            }"#,
        ))
        .await;

    let titles: Vec<&str> = aggregate
        .records
        .iter()
        .map(|r| r.original_title.as_str())
        .collect();
    assert_eq!(titles, vec!["s1", "s2", "r1", "a1", "a2"]);
    let regions: Vec<&str> = aggregate.records.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(
        regions,
        vec!["Stockholm", "Stockholm", "Roskilde", "Aarhus", "Aarhus"]
    );
}

#[tokio::test]
async fn failures_are_isolated_to_single_articles() {
    let fetcher = FakeFetcher::default()
        .with_feed("https://feeds.example/1", vec!["a", "!broken", "b"])
        .with_feed("https://feeds.example/2", vec!["unscored", "c"]);
    let scorer = scorer(&[("a", 0.1), ("b", 0.2), ("c", 0.3)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {
                "Copenhagen": ["https://feeds.example/1"],
                "Aarhus": ["https://feeds.example/2"]
            }}"#,
        ))
        .await;

    let titles: Vec<&str> = aggregate
        .records
        .iter()
        .map(|r| r.original_title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);

    let kinds: Vec<FailureKind> = aggregate.failures.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FailureKind::Translation, FailureKind::Scoring]);
    assert_eq!(aggregate.report.articles_fetched, 5);
    assert_eq!(aggregate.report.articles_scored, 3);
    assert_eq!(aggregate.report.articles_failed, 2);
}

#[tokio::test]
async fn scored_count_is_sum_over_feeds_before_filtering() {
    let fetcher = FakeFetcher::default()
        .with_feed("https://feeds.example/1", vec!["hot", "calm"])
        .with_feed("https://feeds.example/2", vec!["cold", "!x", "mild"])
        .with_feed("https://feeds.example/3", vec![]);
    let scorer = scorer(&[("hot", 0.9), ("calm", 0.0), ("cold", -0.9), ("mild", 0.2)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {
                "Copenhagen": ["https://feeds.example/1", "https://feeds.example/2"],
                "Aalborg": ["https://feeds.example/3"]
            }}"#,
        ))
        .await;

    assert_eq!(aggregate.report.feeds_visited, 3);
    assert_eq!(aggregate.report.feeds_empty, 1);
    assert_eq!(aggregate.report.articles_scored, 2 + 2);
    assert_eq!(aggregate.report.records_kept, 2);
    assert!(!aggregate.cancelled);
}

#[tokio::test]
async fn equal_bounds_produce_empty_aggregate() {
    let fetcher = FakeFetcher::default().with_feed("https://feeds.example/1", vec!["a", "b"]);
    let scorer = scorer(&[("a", 0.0), ("b", 0.1)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::new(0.0, 0.0));

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {"Copenhagen": ["https://feeds.example/1"]}}"#,
        ))
        .await;

    assert!(aggregate.records.is_empty());
    assert_eq!(aggregate.report.articles_scored, 2);
}

#[tokio::test]
async fn no_feeds_produce_empty_aggregate() {
    let fetcher = FakeFetcher::default();
    let scorer = scorer(&[]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer);
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator.aggregate(&[]).await;
    assert!(aggregate.records.is_empty());
    assert_eq!(aggregate.report.feeds_visited, 0);
}

#[tokio::test]
async fn cancellation_keeps_records_already_aggregated() {
    // The second URL is unknown to the fake and never completes.
    let fetcher = FakeFetcher::default().with_feed("https://feeds.example/fast", vec!["a"]);
    let scorer = scorer(&[("a", 0.1)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer)
        .with_call_timeout(Duration::from_secs(60));
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator
        .aggregate_until(
            &sources(
                r#"{"Denmark": {
                    "Copenhagen": ["https://feeds.example/fast"],
                    "Aarhus": ["https://feeds.example/stalled"]
                }}"#,
            ),
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;

    assert!(aggregate.cancelled);
    assert_eq!(aggregate.records.len(), 1);
    assert_eq!(aggregate.records[0].original_title, "a");
    assert_eq!(aggregate.report.feeds_visited, 1);
}

#[tokio::test]
async fn stalled_feed_times_out_and_run_continues() {
    let fetcher = FakeFetcher::default().with_feed("https://feeds.example/after", vec!["a"]);
    let scorer = scorer(&[("a", 0.1)]);
    let pipeline = ArticlePipeline::new(&fetcher, &EchoTranslator, &scorer)
        .with_call_timeout(Duration::from_millis(50));
    let aggregator = RegionAggregator::new(pipeline, PolarityRange::default());

    let aggregate = aggregator
        .aggregate(&sources(
            r#"{"Denmark": {
                "Copenhagen": ["https://feeds.example/stalled", "https://feeds.example/after"]
            }}"#,
        ))
        .await;

    assert_eq!(aggregate.report.feeds_failed, 1);
    assert_eq!(aggregate.records.len(), 1);
    assert!(!aggregate.cancelled);
}
