//! Polarity range filtering.

use newsmap_core::ArticleRecord;

/// Exclusive polarity bounds: a value is inside iff `min < p < max`.
///
/// When `min >= max` nothing is inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityRange {
    pub min: f64,
    pub max: f64,
}

impl PolarityRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, polarity: f64) -> bool {
        self.min < polarity && polarity < self.max
    }
}

impl Default for PolarityRange {
    fn default() -> Self {
        Self::new(-0.5, 0.5)
    }
}

/// Keep the records whose polarity lies strictly inside `range`, in input order.
#[must_use]
pub fn filter_by_polarity<I>(records: I, range: PolarityRange) -> Vec<ArticleRecord>
where
    I: IntoIterator<Item = ArticleRecord>,
{
    records
        .into_iter()
        .filter(|record| range.contains(record.polarity))
        .collect()
}
