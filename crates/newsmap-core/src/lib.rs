//! Shared data model and configuration for newsmap.
//!
//! Holds the feeds-file loader, the env-driven run settings, the record types
//! that flow through the sentiment pipeline, and the region → coordinate index
//! used when exporting heat points.

pub mod app_config;
pub mod config;
pub mod feeds;
pub mod geo;
pub mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use app_config::{AppConfig, TARGET_LANG};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds::{load_feeds, parse_feeds, CountryFeeds, FeedsConfig, RegionFeeds};
pub use geo::{GeoIndex, StaticGeoIndex};
pub use types::{ArticleRecord, FeedSource, HeatPoint};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("feeds file not found or unreadable: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed feeds file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
