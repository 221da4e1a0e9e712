//! Where the metadata document comes from, and how it is loaded.
//!
//! `http://` and `https://` locations are fetched with a blocking GET;
//! anything else is read from disk.

use std::fmt;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::types::Metadata;

/// Location of the metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    File(PathBuf),
    Http(String),
}

impl MetadataSource {
    /// Classify a location string by its scheme.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            MetadataSource::Http(location.to_string())
        } else {
            MetadataSource::File(PathBuf::from(location))
        }
    }

    /// Retrieve and parse the document. No retries.
    pub fn load(&self) -> Result<Metadata, LoadError> {
        match self {
            MetadataSource::File(path) => {
                let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_metadata(&contents, &path.display().to_string())
            }
            MetadataSource::Http(url) => fetch(url),
        }
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataSource::File(path) => write!(f, "{}", path.display()),
            MetadataSource::Http(url) => f.write_str(url),
        }
    }
}

impl From<&str> for MetadataSource {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for MetadataSource {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PathBuf> for MetadataSource {
    fn from(p: PathBuf) -> Self {
        MetadataSource::File(p)
    }
}

/// Parse a metadata document; `origin` only labels errors.
pub fn parse_metadata(contents: &str, origin: &str) -> Result<Metadata, LoadError> {
    serde_json::from_str(contents).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn fetch(url: &str) -> Result<Metadata, LoadError> {
    tracing::debug!(url, "fetching metadata");
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            })
        }
        Err(err) => {
            return Err(LoadError::Transport {
                url: url.to_string(),
                source: Box::new(err),
            })
        }
    };
    serde_json::from_reader(response.into_reader()).map_err(|source| LoadError::Parse {
        origin: url.to_string(),
        source,
    })
}
