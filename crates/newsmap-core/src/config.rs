use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load run settings from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load run settings from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build run settings using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_polarity = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let feeds_path = PathBuf::from(or_default("NEWSMAP_FEEDS_PATH", "rss_feeds.json"));
    let output_path = PathBuf::from(or_default(
        "NEWSMAP_OUTPUT_PATH",
        "news_sentiment_heatmap.html",
    ));
    let source_lang = or_default("NEWSMAP_SOURCE_LANG", "da");

    let min_polarity = parse_polarity("NEWSMAP_MIN_POLARITY", "-0.5")?;
    let max_polarity = parse_polarity("NEWSMAP_MAX_POLARITY", "0.5")?;

    let country = lookup("NEWSMAP_COUNTRY")
        .ok()
        .filter(|c| !c.trim().is_empty());
    let translate_url = or_default("NEWSMAP_TRANSLATE_URL", "http://localhost:5000");

    let request_timeout_secs = parse_u64("NEWSMAP_REQUEST_TIMEOUT_SECS", "30")?;

    let run_timeout_secs = match lookup("NEWSMAP_RUN_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("NEWSMAP_RUN_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let max_concurrent_feeds = parse_usize("NEWSMAP_MAX_CONCURRENT_FEEDS", "1")?;

    let user_agent = or_default("NEWSMAP_USER_AGENT", "newsmap/0.1 (news-sentiment)");
    let log_level = or_default("NEWSMAP_LOG_LEVEL", "info");

    let config = AppConfig {
        feeds_path,
        output_path,
        source_lang,
        min_polarity,
        max_polarity,
        country,
        translate_url,
        request_timeout_secs,
        run_timeout_secs,
        max_concurrent_feeds,
        user_agent,
        log_level,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
