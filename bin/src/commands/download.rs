//! Download command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use galvani_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::AppConfig;

/// Output format for downloaded data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Xlsx,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Xlsx => Self::Xlsx,
        }
    }
}

/// Download price data for a date range and write it to a file.
pub(crate) async fn download(
    config: &AppConfig,
    start_str: &str,
    end_str: Option<&str>,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid start date: {start_str}"))?;
    let end = match end_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid end date: {s}"))?,
        None => start,
    };
    let range = DateRange::new(start, end)?;
    let transport = config.transport()?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(format!("Fetching {} ({} days)", range, range.total_days()));
        pb
    };

    // One session, strictly sequential days; the blocking transport work
    // stays off the async executor.
    let aggregation = tokio::task::spawn_blocking(move || build(range, &transport)).await??;

    let skipped = aggregation.skipped_days().count();
    let finish_msg = if skipped > 0 {
        format!(
            "Fetched {} records ({} days skipped)",
            aggregation.records.len(),
            skipped
        )
    } else {
        format!("Fetched {} records", aggregation.records.len())
    };
    progress.finish_with_message(finish_msg);

    for day in aggregation.skipped_days() {
        if let DayOutcome::Skipped(reason) = day.outcome {
            tracing::info!(date = %day.date, %reason, "Day skipped");
        }
    }

    let encoded = encode(&aggregation.records, format.into(), range, &config.encode)?;
    if encoded.degraded {
        tracing::warn!(
            "Range exceeds the spreadsheet day limit; file contains delimited text"
        );
    }

    let path = output.unwrap_or_else(|| PathBuf::from(&encoded.file_name));
    std::fs::write(&path, &encoded.bytes)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    if quiet {
        println!("{}", path.display());
    } else {
        println!(
            "Wrote {} records to {}",
            aggregation.records.len(),
            path.display()
        );
    }

    Ok(())
}
