//! Atomic writer and publish orchestration.
//!
//! ## `atomic_write` protocol
//!
//! 1. Render the page (done by the caller).
//! 2. SHA-256 hash the LF-normalised content.
//! 3. Skip when both the stored hash and the file on disk match.
//! 4. Write to `<path>.reslib.tmp`.
//! 5. Rename to the final path (atomic on POSIX).
//! 6. Update the hash store entry; the caller saves the store.

use std::path::{Path, PathBuf};

use chrono::Utc;

use reslib_core::LibraryConfig;
use reslib_renderer::{GridSummary, Page, TemplateEngine, TemplateRenderer};

use crate::error::{io_err, PublishError};
use crate::hash_store;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of writing the published page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Rendered content matches the stored hash; nothing touched.
    Unchanged { path: PathBuf },
    /// `--dry-run`: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write `content` to `path`, gated on the stored hash.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    store: &mut hash_store::HashStore,
    dry_run: bool,
) -> Result<WriteResult, PublishError> {
    let tmp = PathBuf::from(format!("{}.reslib.tmp", path.display()));
    atomic_write_with_tmp(path, content, store, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    store: &mut hash_store::HashStore,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, PublishError> {
    let normalized = content.replace("\r\n", "\n");
    let digest = hash_store::digest(&normalized);

    let key = hash_store::key_for(path);
    if store.get(&key) == Some(&digest) && on_disk_digest(path)?.as_ref() == Some(&digest) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, &normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    store.insert(key, digest);

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Digest of the file currently at `path`; `None` when it does not exist.
fn on_disk_digest(path: &Path) -> Result<Option<String>, PublishError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(hash_store::digest(&content))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// render_site
// ---------------------------------------------------------------------------

/// Page shell described by `config`: title, description, stylesheets and
/// the single gallery container.
pub fn build_page(config: &LibraryConfig) -> Page {
    let mut page = Page::new(config.page_title.clone()).with_container(config.container_id.clone());
    if let Some(description) = &config.description {
        page = page.with_description(description.clone());
    }
    for href in &config.stylesheets {
        page = page.with_stylesheet(href.clone());
    }
    page
}

/// Load the metadata named by `config` and render the full page document.
///
/// Nothing is written.
pub fn render_site(config: &LibraryConfig) -> Result<(String, GridSummary), PublishError> {
    let engine = TemplateEngine::new(config.template_dir.as_deref())?;
    let mut renderer =
        TemplateRenderer::with_engine(config.source(), engine).with_options(config.cards);
    renderer.load_metadata()?;

    let mut page = build_page(config);
    let summary = renderer.render_template_grid(&mut page, &config.container_id)?;
    let html = renderer.render_page(&page)?;
    Ok((html, summary))
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

/// Outcome of a publish run.
#[derive(Debug)]
pub struct PublishResult {
    pub output: PathBuf,
    pub write: WriteResult,
    pub summary: GridSummary,
}

/// Render the page and write it to `config.output` with a hash-gated
/// atomic write.
///
/// `dry_run` leaves the filesystem untouched, hash store included.
pub fn publish(config: &LibraryConfig, dry_run: bool) -> Result<PublishResult, PublishError> {
    let started_at = Utc::now();
    let (html, summary) = render_site(config)?;

    let site_dir = hash_store::site_dir(&config.output);
    let mut store = hash_store::load_at(&site_dir)?;
    let write = atomic_write(&config.output, &html, &mut store.files, dry_run)?;

    if !dry_run {
        store.published_at = started_at;
        hash_store::save_at(&site_dir, &store)?;
    }

    Ok(PublishResult {
        output: config.output.clone(),
        write,
        summary,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
