//! Run counters reported at the end of a run.

use crate::heatmap::ExportOutcome;

/// Counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub feeds_visited: usize,
    pub feeds_failed: usize,
    pub feeds_empty: usize,
    pub articles_fetched: usize,
    /// Articles that were translated and scored (before filtering).
    pub articles_scored: usize,
    pub articles_failed: usize,
    /// Records that survived the polarity filter.
    pub records_kept: usize,
    pub records_unmapped: usize,
    pub heat_points: usize,
}

impl RunReport {
    pub fn record_export(&mut self, outcome: &ExportOutcome) {
        self.records_unmapped = outcome.unmapped_records();
        self.heat_points = outcome.points.len();
    }

    pub fn log_summary(&self) {
        tracing::info!(
            feeds_visited = self.feeds_visited,
            feeds_failed = self.feeds_failed,
            feeds_empty = self.feeds_empty,
            articles_fetched = self.articles_fetched,
            articles_scored = self.articles_scored,
            articles_failed = self.articles_failed,
            records_kept = self.records_kept,
            records_unmapped = self.records_unmapped,
            heat_points = self.heat_points,
            "run complete"
        );
    }
}
