//! `reslib publish`: render and write the page with hash-gated atomic writes.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use reslib_publish::{publish, PublishResult, WriteResult};

use super::load_config;

/// Arguments for `reslib publish`.
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Show what would be written without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let result = publish(&config, self.dry_run)
            .with_context(|| format!("publish failed for '{}'", config.output.display()))?;
        print_result(&result, self.dry_run);
        Ok(())
    }
}

fn print_result(result: &PublishResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let summary = &result.summary;
    let layout = if summary.tabbed { "tabbed" } else { "flat" };
    println!(
        "{prefix}✓ {} template(s), {} categor{} ({layout})",
        summary.cards,
        summary.categories,
        if summary.categories == 1 { "y" } else { "ies" },
    );

    match &result.write {
        WriteResult::Written { path } => println!("  ✎  {}", path.display()),
        WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
        WriteResult::Unchanged { path } => println!("  ·  {} (unchanged)", path.display()),
    }
}
