//! Tera rendering engine: container markup and full pages.
//!
//! # Template names
//!
//! | Name                          | Renders                                   |
//! |-------------------------------|-------------------------------------------|
//! | `library/macros.html.tera`    | `card` and `grid` macros                  |
//! | `library/container.html.tera` | container content from a [`GridContext`]  |
//! | `page/page.html.tera`         | full HTML document from a [`Page`]        |
//!
//! Autoescaping is on for every `.html.tera` name, using Tera's own HTML
//! escaper. Pre-rendered container markup and the tab script are marked
//! `safe`; user overrides that interpolate them must do the same.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::Tera;

use crate::context::GridContext;
use crate::error::RenderError;
use crate::page::Page;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

pub const CONTAINER_TEMPLATE: &str = "library/container.html.tera";
pub const PAGE_TEMPLATE: &str = "page/page.html.tera";

const AUTOESCAPE_SUFFIX: &str = ".html.tera";

const TPLS: &[(&str, &str)] = &[
    (
        "library/macros.html.tera",
        include_str!("templates/library/macros.html.tera"),
    ),
    (
        CONTAINER_TEMPLATE,
        include_str!("templates/library/container.html.tera"),
    ),
    (PAGE_TEMPLATE, include_str!("templates/page/page.html.tera")),
];

/// Client-side shim that toggles the `active` class on tab click.
pub const TAB_SCRIPT: &str = include_str!("templates/tabs.js");

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "template override directory does not exist");
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!(template = %name, "loaded template override");
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![AUTOESCAPE_SUFFIX]);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Page context
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PageCtx<'a> {
    title: &'a str,
    description: Option<&'a str>,
    stylesheets: &'a [String],
    containers: Vec<ContainerCtx<'a>>,
    tab_script: Option<&'static str>,
    version: &'static str,
}

#[derive(Serialize)]
struct ContainerCtx<'a> {
    id: &'a str,
    html: &'a str,
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults.
/// Template names are normalised to lowercase and relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render container content (tab bar and/or grids) for `ctx`.
    pub fn render_grid(&self, ctx: &GridContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let html = self.tera.render(CONTAINER_TEMPLATE, &tera_ctx)?;
        Ok(normalize_line_endings(&html))
    }

    /// Render the full HTML document for `page`.
    ///
    /// The tab-switch script is emitted once, and only when a container
    /// holds a tab bar.
    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let ctx = PageCtx {
            title: &page.title,
            description: page.description.as_deref(),
            stylesheets: &page.stylesheets,
            containers: page
                .containers()
                .map(|(id, c)| ContainerCtx { id, html: c.html.trim() })
                .collect(),
            tab_script: page.has_tabs().then_some(TAB_SCRIPT.trim_end()),
            version: env!("CARGO_PKG_VERSION"),
        };
        let tera_ctx = tera::Context::from_serialize(&ctx)?;
        let html = self.tera.render(PAGE_TEMPLATE, &tera_ctx)?;
        Ok(normalize_line_endings(&html))
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
