//! Hash store: SHA-256-based idempotency tracking for published files.
//!
//! Persists a `HashStoreFile` JSON document at
//! `<site_dir>/.reslib/hashes.json`, where `site_dir` is the directory the
//! page is published into. Writes use an atomic `.tmp` + rename.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{io_err, PublishError};

/// In-memory hash store: maps file path strings to their last published
/// SHA-256 hex digest.
pub type HashStore = HashMap<String, String>;

/// On-disk hash store payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashStoreFile {
    pub published_at: DateTime<Utc>,
    pub files: HashStore,
}

impl HashStoreFile {
    fn empty() -> Self {
        HashStoreFile {
            published_at: Utc::now(),
            files: HashMap::new(),
        }
    }
}

/// Directory the page lives in; the store sits beside it.
pub fn site_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `<site_dir>/.reslib/hashes.json`
pub fn store_path_at(site_dir: &Path) -> PathBuf {
    site_dir.join(".reslib").join("hashes.json")
}

/// Key under which `path` is tracked.
pub fn key_for(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// SHA-256 hex digest of `content` after CRLF → LF normalisation.
pub fn digest(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// Load the hash store for `site_dir`.
///
/// Returns an empty store if the file does not yet exist.
pub fn load_at(site_dir: &Path) -> Result<HashStoreFile, PublishError> {
    let path = store_path_at(site_dir);
    if !path.exists() {
        return Ok(HashStoreFile::empty());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save the hash store for `site_dir` atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`.
pub fn save_at(site_dir: &Path, store: &HashStoreFile) -> Result<(), PublishError> {
    let path = store_path_at(site_dir);
    let Some(dir) = path.parent() else {
        return Err(io_err(
            path,
            std::io::Error::other("invalid hash store path"),
        ));
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}
