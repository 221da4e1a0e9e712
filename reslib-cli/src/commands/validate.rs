//! `reslib validate`: report structural problems in the metadata document.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use reslib_core::{group_by_category, validate};

use super::{load_config, load_metadata};

/// Arguments for `reslib validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let metadata = load_metadata(&config)?;
        let issues = validate(&metadata);

        if issues.is_empty() {
            let categories = group_by_category(&metadata).len();
            println!(
                "{} {} template(s) in {categories} categor{}, no issues",
                "✓".green().bold(),
                metadata.len(),
                if categories == 1 { "y" } else { "ies" },
            );
            return Ok(());
        }

        for issue in &issues {
            println!("{} {issue}", "✗".red().bold());
        }
        bail!("{} issue(s) found in {}", issues.len(), config.metadata)
    }
}
