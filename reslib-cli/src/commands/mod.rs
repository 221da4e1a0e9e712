pub mod categories;
pub mod diff;
pub mod publish;
pub mod render;
pub mod status;
pub mod validate;

use std::path::Path;

use anyhow::{ensure, Context, Result};

use reslib_core::{config, LibraryConfig, Metadata};

/// Resolve configuration: an explicit `--config` file must exist, the
/// default `./reslib.yaml` is optional. `CRL_*` overrides apply to both.
pub fn load_config(path: Option<&Path>) -> Result<LibraryConfig> {
    let config = match path {
        None => config::load().context("failed to load reslib.yaml")?,
        Some(path) => {
            ensure!(path.exists(), "config file not found: {}", path.display());
            let mut config = LibraryConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            config
                .apply_env(std::env::vars_os())
                .context("invalid CRL_* environment override")?;
            config
        }
    };
    tracing::debug!(
        metadata = %config.metadata,
        container = %config.container_id,
        output = %config.output.display(),
        "resolved config"
    );
    Ok(config)
}

/// Fetch and parse the metadata document named by `config`.
pub fn load_metadata(config: &LibraryConfig) -> Result<Metadata> {
    let source = config.source();
    source
        .load()
        .with_context(|| format!("failed to load metadata from {source}"))
}
