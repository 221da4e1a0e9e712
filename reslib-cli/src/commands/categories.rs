//! `reslib categories`: categories in tab order with their template counts.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use reslib_core::group_by_category;
use reslib_renderer::TabSet;

use super::{load_config, load_metadata};

/// Arguments for `reslib categories`.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    #[tabled(rename = "category")]
    category: String,
    #[tabled(rename = "tab")]
    slug: String,
    #[tabled(rename = "templates")]
    templates: usize,
}

impl CategoriesArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let metadata = load_metadata(&config)?;
        let groups = group_by_category(&metadata);
        let tabs = TabSet::new(groups.iter().map(|g| g.category));

        let rows: Vec<CategoryRow> = groups
            .iter()
            .zip(tabs.tabs())
            .map(|(group, tab)| CategoryRow {
                category: group.category.0.clone(),
                slug: tab.slug.clone(),
                templates: group.templates.len(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize categories")?
            );
            return Ok(());
        }

        if rows.is_empty() {
            println!("No templates in {}.", config.metadata);
            return Ok(());
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
