//! Unified diff between the published page and a fresh render, for
//! `reslib diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use reslib_core::LibraryConfig;

use crate::error::{io_err, PublishError};
use crate::hash_store;
use crate::writer::render_site;

/// Pending change to the published page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `publish` would write and compare it to the file on disk.
///
/// Returns `None` when the two match. A missing file diffs against empty
/// content. No files are written.
pub fn diff_site(config: &LibraryConfig) -> Result<Option<FileDiff>, PublishError> {
    let (rendered, _summary) = render_site(config)?;
    let rendered = normalize_line_endings(&rendered);
    let existing = read_existing_or_empty(&config.output)?;
    if existing == rendered {
        return Ok(None);
    }

    let site_dir = hash_store::site_dir(&config.output);
    let relative = config
        .output
        .strip_prefix(&site_dir)
        .unwrap_or(config.output.as_path());
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path: config.output.clone(),
        unified_diff: unified,
    }))
}

fn read_existing_or_empty(path: &Path) -> Result<String, PublishError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
