//! The `run` and `feeds` command handlers.

use std::time::Duration;

use newsmap_core::{load_feeds, AppConfig, FeedsConfig, StaticGeoIndex};
use newsmap_sentiment::{
    ArticlePipeline, HeatmapExporter, HttpTranslator, LexiconScorer, PolarityRange,
    RegionAggregator, RssFeedFetcher,
};
use tracing::Instrument;

use crate::output;

/// Load the feeds file and narrow it to the configured country, if any.
///
/// # Errors
///
/// Returns an error if the feeds file is missing or malformed.
fn load_topology(config: &AppConfig) -> anyhow::Result<FeedsConfig> {
    let feeds = load_feeds(&config.feeds_path)?;
    tracing::info!(
        path = %config.feeds_path.display(),
        countries = feeds.countries.len(),
        feeds = feeds.feed_count(),
        "feeds file loaded"
    );

    let Some(country) = config.country.as_deref() else {
        return Ok(feeds);
    };
    let narrowed = feeds.for_country(country);
    if narrowed.is_empty() {
        tracing::warn!(country, "no feeds configured for country");
    }
    Ok(narrowed)
}

/// Run the full pipeline once and write the heatmap.
///
/// Only a feeds-file problem or a failed artifact write aborts the run.
/// Feed, translation and scoring failures are logged and skipped.
///
/// # Errors
///
/// Returns an error if the feeds file cannot be loaded, an HTTP client cannot
/// be built, or the heatmap cannot be written.
pub(crate) async fn run_pipeline(config: &AppConfig) -> anyhow::Result<()> {
    let run_id = uuid::Uuid::new_v4();
    run_pipeline_inner(config)
        .instrument(tracing::info_span!("run", run_id = %run_id))
        .await
}

async fn run_pipeline_inner(config: &AppConfig) -> anyhow::Result<()> {
    let feeds = load_topology(config)?;
    let sources = feeds.sources(&config.source_lang);

    if config.min_polarity >= config.max_polarity {
        tracing::warn!(
            min = config.min_polarity,
            max = config.max_polarity,
            "polarity bounds leave no open interval; every record will be filtered out"
        );
    }

    let fetcher = RssFeedFetcher::new(config.request_timeout_secs, &config.user_agent)?;
    let translator = HttpTranslator::new(
        &config.translate_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let scorer = LexiconScorer;

    let pipeline = ArticlePipeline::new(&fetcher, &translator, &scorer)
        .with_call_timeout(Duration::from_secs(config.request_timeout_secs));
    let aggregator = RegionAggregator::new(
        pipeline,
        PolarityRange::new(config.min_polarity, config.max_polarity),
    )
    .with_max_concurrent_feeds(config.max_concurrent_feeds);

    let mut aggregate = aggregator
        .aggregate_until(&sources, shutdown_signal(config.run_timeout_secs))
        .await;

    print!("{}", output::format_records(&aggregate.records));

    let exporter = HeatmapExporter::new(&config.output_path);
    let outcome = exporter.export(&aggregate.records, &StaticGeoIndex::builtin())?;
    aggregate.report.record_export(&outcome);
    aggregate.report.log_summary();

    print!(
        "{}",
        output::format_summary(&aggregate.report, &outcome, aggregate.cancelled)
    );
    Ok(())
}

/// Print the feeds a run would visit.
///
/// # Errors
///
/// Returns an error if the feeds file is missing or malformed.
pub(crate) fn list_feeds(config: &AppConfig) -> anyhow::Result<()> {
    let feeds = load_topology(config)?;
    print!(
        "{}",
        output::format_sources(&feeds.sources(&config.source_lang))
    );
    Ok(())
}

/// Resolves on Ctrl-C or when the optional run deadline passes.
async fn shutdown_signal(run_timeout_secs: Option<u64>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::warn!("interrupt received");
    };

    let deadline = async {
        match run_timeout_secs {
            Some(secs) => {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                tracing::warn!(secs, "run deadline reached");
            }
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        () = ctrl_c => {},
        () = deadline => {},
    }
}
