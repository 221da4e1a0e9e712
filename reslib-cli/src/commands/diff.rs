//! `reslib diff`: show the unified diff of what publish would write.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use reslib_publish::diff_site;

use super::load_config;

/// Arguments for `reslib diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let diff = diff_site(&config)
            .with_context(|| format!("diff failed for '{}'", config.output.display()))?;

        let Some(diff) = diff else {
            println!("No differences for '{}'.", config.output.display());
            return Ok(());
        };

        print!("{}", diff.unified_diff);
        if !diff.unified_diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
