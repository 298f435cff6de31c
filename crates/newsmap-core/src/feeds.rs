use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::types::FeedSource;
use crate::ConfigError;

/// Feed topology loaded from the feeds file: country → region → feed URLs.
///
/// All three levels keep the order they were written in, which is also the
/// order the pipeline visits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedsConfig {
    pub countries: Vec<CountryFeeds>,
}

/// One country's regions, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFeeds {
    pub name: String,
    pub regions: Vec<RegionFeeds>,
}

/// One region's feed URLs, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFeeds {
    pub name: String,
    pub urls: Vec<String>,
}

impl FeedsConfig {
    /// Flatten into one [`FeedSource`] per URL, in country → region → URL order.
    #[must_use]
    pub fn sources(&self, source_language: &str) -> Vec<FeedSource> {
        self.countries
            .iter()
            .flat_map(|country| {
                country.regions.iter().flat_map(move |region| {
                    region.urls.iter().map(move |url| FeedSource {
                        country: country.name.clone(),
                        region: region.name.clone(),
                        url: url.clone(),
                        source_language: source_language.to_string(),
                    })
                })
            })
            .collect()
    }

    /// Restrict to a single country. An unknown country yields an empty config.
    #[must_use]
    pub fn for_country(&self, country: &str) -> Self {
        Self {
            countries: self
                .countries
                .iter()
                .filter(|c| c.name == country)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn feed_count(&self) -> usize {
        self.countries
            .iter()
            .flat_map(|c| &c.regions)
            .map(|r| r.urls.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feed_count() == 0
    }
}

/// Map that keeps entries in document order and lets duplicates through so
/// validation can report them.
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

type RawFeeds = OrderedMap<OrderedMap<Vec<String>>>;

/// Load and validate the feeds file.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file cannot be read and
/// [`ConfigError::Malformed`] if it is not UTF-8, does not parse, or fails
/// validation.
pub fn load_feeds(path: &Path) -> Result<FeedsConfig, ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| ConfigError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason: format!("not valid UTF-8: {e}"),
    })?;

    parse_feeds(path, &content)
}

/// Parse and validate feeds-file content. `path` picks the format and labels errors.
///
/// # Errors
///
/// Returns [`ConfigError::Malformed`] if the content is not a
/// country → region → URL list mapping or fails validation.
pub fn parse_feeds(path: &Path, content: &str) -> Result<FeedsConfig, ConfigError> {
    let malformed = |reason: String| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let raw: RawFeeds = if is_yaml(path) {
        serde_yaml::from_str(content).map_err(|e| malformed(e.to_string()))?
    } else {
        serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?
    };

    validate_feeds(raw).map_err(malformed)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn validate_feeds(raw: RawFeeds) -> Result<FeedsConfig, String> {
    let mut seen_countries = HashSet::new();
    let mut countries = Vec::with_capacity(raw.0.len());

    for (country, regions) in raw.0 {
        if country.trim().is_empty() {
            return Err("country name must be non-empty".to_string());
        }
        if !seen_countries.insert(country.clone()) {
            return Err(format!("duplicate country: '{country}'"));
        }

        let mut seen_regions = HashSet::new();
        let mut region_feeds = Vec::with_capacity(regions.0.len());

        for (region, urls) in regions.0 {
            if region.trim().is_empty() {
                return Err(format!("country '{country}' has an empty region name"));
            }
            if !seen_regions.insert(region.clone()) {
                return Err(format!(
                    "duplicate region '{region}' in country '{country}'"
                ));
            }

            let mut checked = Vec::with_capacity(urls.len());
            for url in urls {
                let url = url.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!(
                        "region '{region}' in country '{country}' has invalid feed URL '{url}'; \
                         must start with http:// or https://"
                    ));
                }
                checked.push(url.to_string());
            }

            region_feeds.push(RegionFeeds {
                name: region,
                urls: checked,
            });
        }

        countries.push(CountryFeeds {
            name: country,
            regions: region_feeds,
        });
    }

    Ok(FeedsConfig { countries })
}
