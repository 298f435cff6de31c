use serde::Serialize;

/// One feed URL flattened out of the feeds file, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSource {
    pub country: String,
    pub region: String,
    pub url: String,
    /// Language code headlines are translated from (e.g. `da`).
    pub source_language: String,
}

/// A headline that was translated and scored successfully.
///
/// Country and region are always copied from the [`FeedSource`] the headline
/// came from; use [`ArticleRecord::from_source`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    pub original_title: String,
    pub translated_title: String,
    /// Signed sentiment in `[-1.0, 1.0]`.
    pub polarity: f64,
    /// Opinion vs. fact in `[0.0, 1.0]`.
    pub subjectivity: f64,
    pub country: String,
    pub region: String,
}

impl ArticleRecord {
    #[must_use]
    pub fn from_source(
        source: &FeedSource,
        original_title: String,
        translated_title: String,
        polarity: f64,
        subjectivity: f64,
    ) -> Self {
        Self {
            original_title,
            translated_title,
            polarity,
            subjectivity,
            country: source.country.clone(),
            region: source.region.clone(),
        }
    }
}

/// A weighted coordinate consumed by the heatmap renderer.
///
/// `weight` is the polarity of the record the point was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: f64,
}
