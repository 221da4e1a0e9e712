//! Publish status of the rendered page.
//!
//! Signal precedence:
//! 1. `NeverPublished` (hash store missing or no entry for the output)
//! 2. `Missing` (output file deleted since the last publish)
//! 3. `Stale` (local metadata file changed after `published_at`)
//! 4. `Modified` (output edited by hand since the last publish)
//! 5. `Current`
//!
//! Remote metadata is never fetched here; use `diff` for a full comparison.

use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use reslib_core::{LibraryConfig, MetadataSource};

use crate::error::{io_err, PublishError};
use crate::hash_store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    NeverPublished,
    Missing,
    Stale { reason: String },
    Modified,
    Current,
}

/// Classify the page at `config.output`.
pub fn check(config: &LibraryConfig) -> Result<PublishStatus, PublishError> {
    let output = &config.output;
    let site_dir = hash_store::site_dir(output);
    let store = hash_store::load_at(&site_dir)?;
    let Some(expected_hash) = store.files.get(&hash_store::key_for(output)) else {
        return Ok(PublishStatus::NeverPublished);
    };

    let current = match std::fs::read_to_string(output) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(PublishStatus::Missing),
        Err(err) => return Err(io_err(output, err)),
    };

    if let MetadataSource::File(path) = config.source() {
        if let Some(modified) = modified_time(&path)? {
            if unix_duration(modified) > datetime_to_unix_duration(store.published_at) {
                return Ok(PublishStatus::Stale {
                    reason: format!("metadata changed {} ago", format_system_time_age(modified)),
                });
            }
        }
    }

    if &hash_store::digest(&current) != expected_hash {
        return Ok(PublishStatus::Modified);
    }

    Ok(PublishStatus::Current)
}

/// Last-modified time of `path`; `None` when it does not exist.
fn modified_time(path: &Path) -> Result<Option<SystemTime>, PublishError> {
    match std::fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some).map_err(|e| io_err(path, e)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Format age from a filesystem timestamp.
pub fn format_system_time_age(timestamp: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(timestamp)
        .unwrap_or_default();
    format_seconds(age.as_secs())
}

/// Format age from a chrono timestamp (hash store `published_at`).
pub fn format_datetime_age(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    format_seconds(age)
}

fn unix_duration(timestamp: SystemTime) -> Duration {
    timestamp.duration_since(UNIX_EPOCH).unwrap_or_default()
}

fn datetime_to_unix_duration(timestamp: DateTime<Utc>) -> Duration {
    let secs = timestamp.timestamp().max(0) as u64;
    Duration::new(secs, timestamp.timestamp_subsec_nanos())
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
