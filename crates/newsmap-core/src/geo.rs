//! Region name → coordinate lookup used when exporting heat points.

use std::collections::HashMap;

/// Resolves a region name to `(latitude, longitude)`.
///
/// Lookups are exact-match on the region string. A miss is `None`, never an
/// error or a default coordinate.
pub trait GeoIndex: Send + Sync {
    fn resolve(&self, region: &str) -> Option<(f64, f64)>;
}

/// Built-in regions. Exact names, no case folding.
const BUILTIN_REGIONS: &[(&str, f64, f64)] = &[
    ("Copenhagen", 55.6761, 12.5683),
    ("Aarhus", 56.1629, 10.2039),
    ("Aalborg", 57.0488, 9.9217),
    ("Esbjerg", 55.4765, 8.4594),
    ("Roskilde", 55.6415, 12.0803),
    // Administrative regions
    ("Hovedstaden", 55.8114, 12.3558),
    ("Sjælland", 55.4300, 11.7900),
    ("Syddanmark", 55.4000, 9.3800),
    ("Midtjylland", 56.2300, 9.4500),
    ("Nordjylland", 57.0500, 9.9200),
];

/// In-memory [`GeoIndex`] backed by a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticGeoIndex {
    regions: HashMap<String, (f64, f64)>,
}

impl StaticGeoIndex {
    /// An index with no regions.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An index pre-populated with the built-in region table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_REGIONS
            .iter()
            .fold(Self::empty(), |index, &(name, lat, lon)| {
                index.with_region(name, lat, lon)
            })
    }

    /// Add or replace a region.
    #[must_use]
    pub fn with_region(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        self.regions.insert(name.to_string(), (latitude, longitude));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl GeoIndex for StaticGeoIndex {
    fn resolve(&self, region: &str) -> Option<(f64, f64)> {
        self.regions.get(region).copied()
    }
}
