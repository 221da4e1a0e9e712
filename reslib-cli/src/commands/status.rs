//! `reslib status`: is the published page current?

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use reslib_core::LibraryConfig;
use reslib_publish::{
    hash_store,
    status::{check, format_datetime_age},
    PublishStatus,
};

use super::load_config;

/// Arguments for `reslib status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let report = build_report(&config)?;
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize status JSON")?
            );
            return Ok(());
        }
        print_table(report);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct StatusReport {
    output: String,
    metadata: String,
    status: &'static str,
    detail: String,
    last_publish_age: String,
    last_publish_at: Option<String>,
    #[serde(skip)]
    signal: PublishStatus,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "output")]
    output: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
    #[tabled(rename = "last publish")]
    last_publish: String,
}

fn build_report(config: &LibraryConfig) -> Result<StatusReport> {
    let signal = check(config)
        .with_context(|| format!("status check failed for '{}'", config.output.display()))?;
    let (last_publish_at, last_publish_age) = match signal {
        PublishStatus::NeverPublished => (None, "never".to_string()),
        _ => {
            let site_dir = hash_store::site_dir(&config.output);
            let store = hash_store::load_at(&site_dir).context("failed to load hash store")?;
            (
                Some(store.published_at.to_rfc3339()),
                format_datetime_age(store.published_at),
            )
        }
    };

    Ok(StatusReport {
        output: config.output.display().to_string(),
        metadata: config.metadata.clone(),
        status: signal_key(&signal),
        detail: signal_detail(&signal),
        last_publish_age,
        last_publish_at,
        signal,
    })
}

fn print_table(report: StatusReport) {
    println!(
        "reslib v{} | {} {}",
        env!("CARGO_PKG_VERSION"),
        signal_indicator(&report.signal),
        signal_label(&report.signal),
    );

    let row = StatusTableRow {
        output: report.output,
        status: signal_label(&report.signal).to_string(),
        detail: report.detail,
        last_publish: report.last_publish_age,
    };
    let mut table = Table::new(vec![row]);
    table.with(Style::rounded());
    println!("{table}");

    if report.signal != PublishStatus::Current {
        println!("Run 'reslib publish' to update the page.");
    }
}

fn signal_key(signal: &PublishStatus) -> &'static str {
    match signal {
        PublishStatus::NeverPublished => "never_published",
        PublishStatus::Missing => "missing",
        PublishStatus::Stale { .. } => "stale",
        PublishStatus::Modified => "modified",
        PublishStatus::Current => "current",
    }
}

fn signal_label(signal: &PublishStatus) -> &'static str {
    match signal {
        PublishStatus::NeverPublished => "NEVER PUBLISHED",
        PublishStatus::Missing => "MISSING",
        PublishStatus::Stale { .. } => "STALE",
        PublishStatus::Modified => "MODIFIED",
        PublishStatus::Current => "CURRENT",
    }
}

fn signal_indicator(signal: &PublishStatus) -> String {
    match signal {
        PublishStatus::NeverPublished => "■".bright_black().bold().to_string(),
        PublishStatus::Missing => "■".red().bold().to_string(),
        PublishStatus::Stale { .. } => "■".yellow().bold().to_string(),
        PublishStatus::Modified => "■".magenta().bold().to_string(),
        PublishStatus::Current => "■".green().bold().to_string(),
    }
}

fn signal_detail(signal: &PublishStatus) -> String {
    match signal {
        PublishStatus::NeverPublished => "no hash store entry".to_string(),
        PublishStatus::Missing => "output file deleted".to_string(),
        PublishStatus::Stale { reason } => reason.clone(),
        PublishStatus::Modified => "edited since last publish".to_string(),
        PublishStatus::Current => "up to date".to_string(),
    }
}
