//! # reslib-publish
//!
//! Renders the configured resource library page and writes it to disk with
//! a hash-gated atomic write.
//!
//! Call [`publish`] to render and write, [`diff_site`] to preview the change
//! a publish would make, or [`status::check`] to classify the published page.

pub mod diff;
pub mod error;
pub mod hash_store;
pub mod status;
pub mod writer;

pub use diff::{diff_site, FileDiff};
pub use error::PublishError;
pub use status::PublishStatus;
pub use writer::{build_page, publish, render_site, PublishResult, WriteResult};
