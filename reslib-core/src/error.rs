//! Error types for reslib-core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while retrieving or parsing the metadata document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The local metadata file could not be read.
    #[error("failed to read metadata at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error("metadata request to {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("metadata request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body was not a valid metadata document.
    #[error("failed to parse metadata from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while loading the library configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the offending file.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override carried a value of the wrong shape.
    #[error("invalid value for {var}: '{value}' ({expected})")]
    InvalidEnv {
        var: String,
        value: String,
        expected: &'static str,
    },
}
