//! Library configuration: `reslib.yaml` plus `CRL_*` environment overrides.
//!
//! # API pattern
//!
//! - `load_at(dir)` reads `<dir>/reslib.yaml`; used in tests with `TempDir`
//! - `load()` derives the directory from the process working directory
//!
//! A missing file yields [`LibraryConfig::default`].

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::source::MetadataSource;
use crate::types::CardOptions;

pub const CONFIG_FILE: &str = "reslib.yaml";
pub const ENV_PREFIX: &str = "CRL_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// File path or http(s) URL of the metadata document.
    pub metadata: String,
    /// Id of the page container the gallery is rendered into.
    pub container_id: String,
    pub page_title: String,
    /// `<meta name="description">` of the published page.
    pub description: Option<String>,
    /// Stylesheet hrefs linked from the page head.
    pub stylesheets: Vec<String>,
    /// Where `publish` writes the rendered page.
    pub output: PathBuf,
    /// Directory of `.tera` files overriding the embedded templates.
    pub template_dir: Option<PathBuf>,
    pub cards: CardOptions,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            metadata: "metadata.json".to_string(),
            container_id: "template-library".to_string(),
            page_title: "Resource Library".to_string(),
            description: None,
            stylesheets: Vec::new(),
            output: PathBuf::from("site").join("templates.html"),
            template_dir: None,
            cards: CardOptions::default(),
        }
    }
}

impl LibraryConfig {
    pub fn source(&self) -> MetadataSource {
        MetadataSource::parse(&self.metadata)
    }

    /// Read a specific YAML file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CRL_*` overrides from an iterator of `(name, value)` pairs.
    ///
    /// Unrelated variables are ignored, including any whose name is not
    /// valid Unicode. A `CRL_*` value that is not valid Unicode is an error.
    pub fn apply_env<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: Into<OsString>,
    {
        for (key, value) in vars {
            let Some(key) = key.as_ref().to_str() else {
                continue;
            };
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let raw: OsString = value.into();
            let value = raw.into_string().map_err(|raw| ConfigError::InvalidEnv {
                var: key.to_string(),
                value: raw.to_string_lossy().into_owned(),
                expected: "expected valid UTF-8",
            })?;
            match name {
                "METADATA" => self.metadata = value,
                "CONTAINER_ID" => self.container_id = value,
                "PAGE_TITLE" => self.page_title = value,
                "DESCRIPTION" => self.description = Some(value),
                "OUTPUT" => self.output = PathBuf::from(value),
                "TEMPLATE_DIR" => self.template_dir = Some(PathBuf::from(value)),
                "SHOW_BADGES" => self.cards.badges = parse_bool(key, value)?,
                "SHOW_PREVIEWS" => self.cards.previews = parse_bool(key, value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

fn parse_bool(var: &str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value,
            expected: "expected true or false",
        }),
    }
}

/// `<dir>/reslib.yaml`: pure, no I/O.
pub fn config_path_at(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Load `<dir>/reslib.yaml` and apply the process environment.
pub fn load_at(dir: &Path) -> Result<LibraryConfig, ConfigError> {
    let mut config = LibraryConfig::from_file(&config_path_at(dir))?;
    config.apply_env(std::env::vars_os())?;
    Ok(config)
}

/// `load_at` convenience wrapper rooted at the working directory.
pub fn load() -> Result<LibraryConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    load_at(&cwd)
}
