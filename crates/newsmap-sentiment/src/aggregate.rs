//! Cross-feed aggregation in feeds-file order.

use std::future::Future;

use futures::stream::{self, StreamExt};
use newsmap_core::{ArticleRecord, FeedSource};

use crate::filter::{filter_by_polarity, PolarityRange};
use crate::pipeline::{ArticleFailure, ArticlePipeline, FeedRun};
use crate::report::RunReport;

/// Flat, ordered result of running every feed.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Filtered records in country → region → URL → entry order.
    pub records: Vec<ArticleRecord>,
    pub failures: Vec<ArticleFailure>,
    pub report: RunReport,
    /// `true` if the run was stopped before every feed finished.
    pub cancelled: bool,
}

impl Aggregate {
    /// Append one feed's output: failures are recorded, successes are
    /// filtered by `range` and appended.
    fn absorb(&mut self, run: FeedRun, range: PolarityRange) {
        self.report.feeds_visited += 1;
        if run.fetch_error.is_some() {
            self.report.feeds_failed += 1;
        } else if run.outcomes.is_empty() {
            self.report.feeds_empty += 1;
        }
        self.report.articles_fetched += run.entry_count();

        let mut scored = Vec::with_capacity(run.outcomes.len());
        for outcome in run.outcomes {
            match outcome {
                Ok(record) => scored.push(record),
                Err(failure) => self.failures.push(failure),
            }
        }
        self.report.articles_scored += scored.len();
        self.report.articles_failed = self.failures.len();

        let kept = filter_by_polarity(scored, range);
        tracing::debug!(
            country = %run.source.country,
            region = %run.source.region,
            url = %run.source.url,
            kept = kept.len(),
            "feed aggregated"
        );
        self.records.extend(kept);
        self.report.records_kept = self.records.len();
    }
}

/// Runs [`ArticlePipeline`] over every feed and concatenates the filtered
/// output.
pub struct RegionAggregator<'a> {
    pipeline: ArticlePipeline<'a>,
    range: PolarityRange,
    max_concurrent_feeds: usize,
}

impl<'a> RegionAggregator<'a> {
    #[must_use]
    pub fn new(pipeline: ArticlePipeline<'a>, range: PolarityRange) -> Self {
        Self {
            pipeline,
            range,
            max_concurrent_feeds: 1,
        }
    }

    /// Process up to `n` feeds at once. Output order is unchanged.
    #[must_use]
    pub fn with_max_concurrent_feeds(mut self, n: usize) -> Self {
        self.max_concurrent_feeds = n.max(1);
        self
    }

    /// Run every feed to completion.
    pub async fn aggregate(&self, sources: &[FeedSource]) -> Aggregate {
        self.aggregate_until(sources, std::future::pending()).await
    }

    /// Run feeds until all are done or `shutdown` resolves.
    ///
    /// On shutdown, feeds still in flight are dropped and the records already
    /// appended are returned with `cancelled` set.
    pub async fn aggregate_until<S>(&self, sources: &[FeedSource], shutdown: S) -> Aggregate
    where
        S: Future<Output = ()>,
    {
        let mut aggregate = Aggregate::default();

        // `buffered` yields in input order regardless of completion order.
        let runs = stream::iter(sources)
            .map(|source| self.pipeline.run_feed(source))
            .buffered(self.max_concurrent_feeds);
        tokio::pin!(runs);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::warn!(
                        completed = aggregate.report.feeds_visited,
                        total = sources.len(),
                        "run cancelled; keeping records aggregated so far"
                    );
                    aggregate.cancelled = true;
                    break;
                }
                next = runs.next() => match next {
                    Some(run) => aggregate.absorb(run, self.range),
                    None => break,
                },
            }
        }

        tracing::info!(
            feeds = aggregate.report.feeds_visited,
            scored = aggregate.report.articles_scored,
            failed = aggregate.report.articles_failed,
            kept = aggregate.records.len(),
            "aggregation finished"
        );
        if aggregate.records.is_empty() {
            tracing::warn!("no records survived aggregation");
        }

        aggregate
    }
}
