mod output;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use newsmap_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsmap-cli")]
#[command(about = "Regional news sentiment heatmap")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, translate and score every feed, then write the heatmap (default)
    Run(RunArgs),
    /// List the feeds the next run would visit, without network access
    Feeds {
        /// Feeds file (overrides NEWSMAP_FEEDS_PATH)
        #[arg(long)]
        feeds: Option<PathBuf>,

        /// Only list feeds for this country
        #[arg(long)]
        country: Option<String>,
    },
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Feeds file (overrides NEWSMAP_FEEDS_PATH)
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Heatmap output path (overrides NEWSMAP_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only process feeds for this country
    #[arg(long)]
    country: Option<String>,

    /// Exclusive lower polarity bound
    #[arg(long, allow_negative_numbers = true)]
    min_polarity: Option<f64>,

    /// Exclusive upper polarity bound
    #[arg(long, allow_negative_numbers = true)]
    max_polarity: Option<f64>,

    /// Language the headlines are written in
    #[arg(long)]
    source_lang: Option<String>,
}

impl RunArgs {
    /// Layer the flags over `config` and re-check the result, since a flag
    /// can carry a value the env parser would have rejected.
    fn apply(self, mut config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(feeds) = self.feeds {
            config.feeds_path = feeds;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(country) = self.country {
            config.country = Some(country);
        }
        if let Some(min) = self.min_polarity {
            config.min_polarity = min;
        }
        if let Some(max) = self.max_polarity {
            config.max_polarity = max;
        }
        if let Some(lang) = self.source_lang {
            config.source_lang = lang;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match newsmap_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));
    let result = match command {
        Commands::Run(args) => match args.apply(config) {
            Ok(config) => run::run_pipeline(&config).await,
            Err(e) => Err(e.into()),
        },
        Commands::Feeds { feeds, country } => {
            let args = RunArgs {
                feeds,
                country,
                ..RunArgs::default()
            };
            args.apply(config)
                .map_err(anyhow::Error::from)
                .and_then(|config| run::list_feeds(&config))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "run aborted");
            ExitCode::FAILURE
        }
    }
}
