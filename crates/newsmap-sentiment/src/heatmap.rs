//! Heat point export and HTML heatmap rendering.

use std::path::{Path, PathBuf};

use newsmap_core::{ArticleRecord, GeoIndex, HeatPoint};

use crate::error::SentimentError;

/// Heat points derived from an aggregate, plus the regions that did not resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatPoints {
    pub points: Vec<HeatPoint>,
    /// `(region, record count)` for each unresolved region, in first-seen order.
    pub unmapped: Vec<(String, usize)>,
}

/// What [`HeatmapExporter::export`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub points: Vec<HeatPoint>,
    pub unmapped: Vec<(String, usize)>,
    /// Where the artifact was written; `None` when there was nothing to render.
    pub written: Option<PathBuf>,
}

impl ExportOutcome {
    #[must_use]
    pub fn unmapped_records(&self) -> usize {
        self.unmapped.iter().map(|(_, n)| n).sum()
    }
}

/// Map each record's region through `geo`, one point per resolvable record.
///
/// Unresolved regions are logged once each and counted; their records are
/// left out of the points only.
pub fn heat_points(records: &[ArticleRecord], geo: &dyn GeoIndex) -> HeatPoints {
    let mut out = HeatPoints::default();

    for record in records {
        match geo.resolve(&record.region) {
            Some((latitude, longitude)) => out.points.push(HeatPoint {
                latitude,
                longitude,
                weight: record.polarity,
            }),
            None => match out.unmapped.iter_mut().find(|(r, _)| *r == record.region) {
                Some((_, count)) => *count += 1,
                None => out.unmapped.push((record.region.clone(), 1)),
            },
        }
    }

    for (region, count) in &out.unmapped {
        tracing::warn!(
            region = %region,
            records = count,
            "region not in geo index; excluded from heatmap"
        );
    }

    out
}

/// Writes the heatmap artifact to a fixed path.
#[derive(Debug, Clone)]
pub struct HeatmapExporter {
    output_path: PathBuf,
}

impl HeatmapExporter {
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Resolve `records` to heat points and write the rendered heatmap.
    ///
    /// With zero heat points nothing is written and a warning is logged; the
    /// outcome then has `written: None`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Render`] if the points cannot be serialized
    /// and [`SentimentError::Io`] if the file cannot be written.
    pub fn export(
        &self,
        records: &[ArticleRecord],
        geo: &dyn GeoIndex,
    ) -> Result<ExportOutcome, SentimentError> {
        let HeatPoints { points, unmapped } = heat_points(records, geo);

        if points.is_empty() {
            tracing::warn!(
                records = records.len(),
                path = %self.output_path.display(),
                "no heat points to render; heatmap not written"
            );
            return Ok(ExportOutcome {
                points,
                unmapped,
                written: None,
            });
        }

        let html = render_heatmap_html(&points)?;
        std::fs::write(&self.output_path, html)?;
        tracing::info!(
            path = %self.output_path.display(),
            points = points.len(),
            "heatmap written"
        );

        Ok(ExportOutcome {
            points,
            unmapped,
            written: Some(self.output_path.clone()),
        })
    }
}

const LEAFLET_VERSION: &str = "1.9.4";
const LEAFLET_HEAT_VERSION: &str = "0.2.0";

/// Render a self-contained Leaflet heatmap page for `points`.
///
/// Intensity is the absolute polarity, so strongly negative and strongly
/// positive news both show as hot. The signed weight is kept in the data.
///
/// # Errors
///
/// Returns [`SentimentError::Render`] if the points cannot be serialized.
#[allow(clippy::cast_precision_loss)]
pub fn render_heatmap_html(points: &[HeatPoint]) -> Result<String, SentimentError> {
    let (center_lat, center_lon) = if points.is_empty() {
        (0.0, 0.0)
    } else {
        let n = points.len() as f64;
        (
            points.iter().map(|p| p.latitude).sum::<f64>() / n,
            points.iter().map(|p| p.longitude).sum::<f64>() / n,
        )
    };

    let data: Vec<[f64; 3]> = points
        .iter()
        .map(|p| [p.latitude, p.longitude, p.weight])
        .collect();
    let data_json = serde_json::to_string(&data)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>News sentiment heatmap</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.heat@{LEAFLET_HEAT_VERSION}/dist/leaflet-heat.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const points = {data_json};
const map = L.map("map").setView([{center_lat}, {center_lon}], 6);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 18,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
L.heatLayer(points.map(p => [p[0], p[1], Math.abs(p[2])]), {{
  radius: 25, blur: 15, max: 1.0
}}).addTo(map);
</script>
</body>
</html>
"#
    ))
}
