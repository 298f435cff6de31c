//! Plain-text rendering of run results for the terminal.

use std::fmt::Write as _;

use chrono::Utc;
use newsmap_core::{ArticleRecord, FeedSource};
use newsmap_sentiment::{ExportOutcome, RunReport};

const TITLE_WIDTH: usize = 38;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Format kept records as a fixed-width table, one row per record.
pub(crate) fn format_records(records: &[ArticleRecord]) -> String {
    if records.is_empty() {
        return "no articles within the polarity bounds\n".to_string();
    }

    let mut out = format!(
        "{:<40}{:<40}{:>9}{:>13}  {:<12}REGION\n",
        "ORIGINAL TITLE", "TRANSLATED TITLE", "POLARITY", "SUBJECTIVITY", "COUNTRY"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<40}{:<40}{:>9.3}{:>13.3}  {:<12}{}",
            truncate(&record.original_title, TITLE_WIDTH),
            truncate(&record.translated_title, TITLE_WIDTH),
            record.polarity,
            record.subjectivity,
            record.country,
            record.region,
        );
    }
    out
}

/// Format the end-of-run summary.
pub(crate) fn format_summary(report: &RunReport, outcome: &ExportOutcome, cancelled: bool) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Run finished: {now}");
    if cancelled {
        let _ = writeln!(out, "Run was interrupted; results are partial.");
    }
    let _ = writeln!(
        out,
        "Feeds: {} visited, {} failed, {} empty",
        report.feeds_visited, report.feeds_failed, report.feeds_empty
    );
    let _ = writeln!(
        out,
        "Articles: {} fetched, {} scored, {} failed, {} kept",
        report.articles_fetched, report.articles_scored, report.articles_failed, report.records_kept
    );

    for (region, count) in &outcome.unmapped {
        let _ = writeln!(out, "warning: region {region} has no coordinates ({count} records skipped)");
    }

    match &outcome.written {
        Some(path) => {
            let _ = writeln!(
                out,
                "Heatmap: {} points written to {}",
                outcome.points.len(),
                path.display()
            );
        }
        None => {
            let _ = writeln!(out, "Heatmap: nothing to render, no file written");
        }
    }
    out
}

/// Format the flattened feed list for the `feeds` command.
pub(crate) fn format_sources(sources: &[FeedSource]) -> String {
    if sources.is_empty() {
        return "no feeds configured\n".to_string();
    }

    let mut out = format!("{:<14}{:<16}{:<6}URL\n", "COUNTRY", "REGION", "LANG");
    for source in sources {
        let _ = writeln!(
            out,
            "{:<14}{:<16}{:<6}{}",
            source.country, source.region, source.source_language, source.url
        );
    }
    out
}
