use std::path::PathBuf;

use crate::ConfigError;

/// Headlines are always translated into this language before scoring.
pub const TARGET_LANG: &str = "en";

/// Run settings for one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub feeds_path: PathBuf,
    pub output_path: PathBuf,
    pub source_lang: String,
    /// Exclusive lower polarity bound.
    pub min_polarity: f64,
    /// Exclusive upper polarity bound.
    pub max_polarity: f64,
    /// Restrict the run to one country from the feeds file.
    pub country: Option<String>,
    pub translate_url: String,
    pub request_timeout_secs: u64,
    pub run_timeout_secs: Option<u64>,
    pub max_concurrent_feeds: usize,
    pub user_agent: String,
    pub log_level: String,
}

impl AppConfig {
    /// Check the invariants every run relies on, wherever the values came from.
    ///
    /// Errors name the env var that sets the offending value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a polarity bound is not
    /// finite, the source language is blank, or a timeout or worker count is
    /// zero. A `min >= max` pair is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |var: &str, reason: String| {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason,
            })
        };

        for (var, value) in [
            ("NEWSMAP_MIN_POLARITY", self.min_polarity),
            ("NEWSMAP_MAX_POLARITY", self.max_polarity),
        ] {
            if !value.is_finite() {
                return invalid(var, format!("{value} is not a finite number"));
            }
        }
        if self.source_lang.trim().is_empty() {
            return invalid("NEWSMAP_SOURCE_LANG", "must be non-empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return invalid("NEWSMAP_REQUEST_TIMEOUT_SECS", "must be at least 1".to_string());
        }
        if self.max_concurrent_feeds == 0 {
            return invalid("NEWSMAP_MAX_CONCURRENT_FEEDS", "must be at least 1".to_string());
        }
        Ok(())
    }
}
