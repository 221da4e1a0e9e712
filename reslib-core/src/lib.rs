//! Resource library core: domain types, metadata loading, grouping,
//! validation, configuration, errors.
//!
//! Public API surface:
//! - [`types`]: metadata document, templates, categories, card options
//! - [`source`]: [`MetadataSource`] (file or http) and loading
//! - [`grouping`]: [`group_by_category`]
//! - [`validate`]: structural checks on a loaded document
//! - [`config`]: [`LibraryConfig`] from `reslib.yaml` + `CRL_*` env
//! - [`error`]: [`LoadError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod grouping;
pub mod source;
pub mod types;
pub mod validate;

pub use config::LibraryConfig;
pub use error::{ConfigError, LoadError};
pub use grouping::{group_by_category, CategoryGroup};
pub use source::{parse_metadata, MetadataSource};
pub use types::{
    is_preview_image, CardOptions, Category, Metadata, Template, TemplateId, DEFAULT_DESCRIPTION,
    DEFAULT_KEYWORDS, PREVIEW_EXTENSIONS,
};
pub use validate::{validate, ValidationIssue};
