//! `reslib render`: render the gallery without touching the hash store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use reslib_publish::build_page;
use reslib_renderer::{TemplateEngine, TemplateRenderer};

use super::load_config;

/// Arguments for `reslib render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Metadata file path or http(s) URL; overrides the config.
    #[arg(long, value_name = "SRC")]
    pub metadata: Option<String>,

    /// Container id to render into; overrides the config.
    #[arg(long, value_name = "ID")]
    pub container: Option<String>,

    /// Tab slug to show as active (multi-category documents only).
    #[arg(long, value_name = "SLUG")]
    pub tab: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit only the container's inner HTML, not the full page.
    #[arg(long)]
    pub fragment: bool,
}

impl RenderArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let mut config = load_config(config_path)?;
        if let Some(metadata) = self.metadata {
            config.metadata = metadata;
        }
        if let Some(container) = self.container {
            config.container_id = container;
        }

        let engine = TemplateEngine::new(config.template_dir.as_deref())
            .context("failed to build template engine")?;
        let mut renderer =
            TemplateRenderer::with_engine(config.source(), engine).with_options(config.cards);
        renderer
            .load_metadata()
            .with_context(|| format!("failed to load metadata from {}", config.metadata))?;

        let mut page = build_page(&config);
        let summary = match self.tab.as_deref() {
            Some(slug) => renderer.activate_tab(&mut page, &config.container_id, slug),
            None => renderer.render_template_grid(&mut page, &config.container_id),
        }
        .context("failed to render template grid")?;

        let html = if self.fragment {
            page.inner_html(&config.container_id)
                .unwrap_or_default()
                .to_string()
        } else {
            renderer.render_page(&page).context("failed to render page")?
        };

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(&path, &html)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!(
                    "✓ rendered {} template(s) in {} categor{} → {}",
                    summary.cards,
                    summary.categories,
                    if summary.categories == 1 { "y" } else { "ies" },
                    path.display()
                );
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
