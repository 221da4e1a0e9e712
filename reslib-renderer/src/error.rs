//! Error types for reslib-renderer.

use std::path::PathBuf;

use thiserror::Error;

use reslib_core::LoadError;

/// All errors that can arise from loading and rendering the gallery.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `render_template_grid` was called before metadata was loaded.
    #[error("metadata not loaded")]
    NotLoaded,

    /// The target page has no container with this id.
    #[error("container with id '{id}' not found")]
    ContainerNotFound { id: String },

    /// No tab in the rendered set carries this slug.
    #[error("no tab with slug '{slug}'")]
    UnknownTab { slug: String },

    /// Fetching or parsing the metadata document failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
