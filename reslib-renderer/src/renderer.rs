//! [`TemplateRenderer`]: load a metadata document once, render it into
//! page containers any number of times.
//!
//! Every failure is logged and returned; a failed call never touches the
//! page.

use reslib_core::{CardOptions, Metadata, MetadataSource};

use crate::context::{GridContext, Layout};
use crate::engine::TemplateEngine;
use crate::error::RenderError;
use crate::page::Page;

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSummary {
    pub categories: usize,
    pub cards: usize,
    pub tabbed: bool,
    /// Slug of the visible panel in tabbed layout.
    pub active_tab: Option<String>,
}

/// Metadata-driven gallery renderer.
///
/// Lifecycle: [`new`](Self::new) → [`load_metadata`](Self::load_metadata)
/// → [`render_template_grid`](Self::render_template_grid), optionally repeated.
pub struct TemplateRenderer {
    source: MetadataSource,
    engine: TemplateEngine,
    options: CardOptions,
    metadata: Option<Metadata>,
}

impl TemplateRenderer {
    /// Store the metadata location and build the embedded engine. Does not fetch.
    pub fn new(source: impl Into<MetadataSource>) -> Result<Self, RenderError> {
        Ok(Self::with_engine(source, TemplateEngine::new(None)?))
    }

    /// Use a caller-built engine (e.g. one with template overrides).
    pub fn with_engine(source: impl Into<MetadataSource>, engine: TemplateEngine) -> Self {
        TemplateRenderer {
            source: source.into(),
            engine,
            options: CardOptions::default(),
            metadata: None,
        }
    }

    pub fn with_options(mut self, options: CardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &MetadataSource {
        &self.source
    }

    pub fn options(&self) -> CardOptions {
        self.options
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// The loaded document, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Install an already-parsed document without fetching.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    /// Retrieve and parse the document from the stored source.
    ///
    /// On failure the previously loaded document (if any) is kept.
    pub fn load_metadata(&mut self) -> Result<&Metadata, RenderError> {
        match self.source.load() {
            Ok(metadata) => {
                tracing::info!(
                    source = %self.source,
                    blocks = metadata.len(),
                    "loaded template metadata"
                );
                let loaded: &Metadata = self.metadata.insert(metadata);
                Ok(loaded)
            }
            Err(err) => {
                tracing::error!(source = %self.source, error = %err, "error loading template metadata");
                Err(err.into())
            }
        }
    }

    /// Replace the content of `container_id` with the template gallery.
    ///
    /// One category renders a single grid; several render a tab bar with
    /// the first category active.
    pub fn render_template_grid(
        &self,
        page: &mut Page,
        container_id: &str,
    ) -> Result<GridSummary, RenderError> {
        self.render_into(page, container_id, None)
    }

    /// Re-render `container_id` with the tab `slug` active.
    pub fn activate_tab(
        &self,
        page: &mut Page,
        container_id: &str,
        slug: &str,
    ) -> Result<GridSummary, RenderError> {
        self.render_into(page, container_id, Some(slug))
    }

    fn render_into(
        &self,
        page: &mut Page,
        container_id: &str,
        active_tab: Option<&str>,
    ) -> Result<GridSummary, RenderError> {
        let Some(metadata) = self.metadata.as_ref() else {
            tracing::error!(container_id, "metadata not loaded");
            return Err(RenderError::NotLoaded);
        };
        if !page.has_container(container_id) {
            tracing::error!(container_id, "container not found");
            return Err(RenderError::ContainerNotFound {
                id: container_id.to_string(),
            });
        }

        let ctx = GridContext::build(metadata, self.options, active_tab).inspect_err(|err| {
            tracing::warn!(container_id, error = %err, "cannot build grid context");
        })?;
        let html = self.engine.render_grid(&ctx)?;
        let tabbed = ctx.layout == Layout::Tabbed;
        page.replace_content(container_id, html, tabbed);

        let summary = GridSummary {
            categories: ctx.panels.len(),
            cards: ctx.card_count(),
            tabbed,
            active_tab: if tabbed {
                ctx.active_panel().map(|p| p.slug.clone())
            } else {
                None
            },
        };
        tracing::debug!(
            container_id,
            categories = summary.categories,
            cards = summary.cards,
            "rendered template grid"
        );
        Ok(summary)
    }

    /// Render the whole page document.
    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        self.engine.render_page(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reslib_core::parse_metadata;

    fn loaded(json: &str) -> TemplateRenderer {
        let mut renderer = TemplateRenderer::new("unused.json").unwrap();
        renderer.set_metadata(parse_metadata(json, "test").unwrap());
        renderer
    }

    #[test]
    fn renderer_new_does_not_fetch() {
        let renderer = TemplateRenderer::new("/does/not/exist.json").expect("construct");
        assert!(renderer.metadata().is_none());
    }

    #[test]
    fn failed_load_leaves_state_unset() {
        let mut renderer = TemplateRenderer::new("/does/not/exist.json").unwrap();
        let err = renderer.load_metadata().unwrap_err();
        assert!(matches!(err, RenderError::Load(_)));
        assert!(renderer.metadata().is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_document() {
        let mut renderer = loaded(r#"{"knowledge_blocks":{"a":{"id":1,"title":"A","category":"C"}}}"#);
        assert!(renderer.load_metadata().is_err());
        assert_eq!(renderer.metadata().map(Metadata::len), Some(1));
    }

    #[test]
    fn render_before_load_does_not_mutate() {
        let renderer = TemplateRenderer::new("x.json").unwrap();
        let mut page = Page::new("t").with_container("grid");
        let before = page.clone();
        let err = renderer.render_template_grid(&mut page, "grid").unwrap_err();
        assert!(matches!(err, RenderError::NotLoaded));
        assert_eq!(page, before);
    }

    #[test]
    fn missing_container_does_not_mutate() {
        let renderer = loaded(r#"{"knowledge_blocks":{"a":{"id":1,"title":"A","category":"C"}}}"#);
        let mut page = Page::new("t").with_container("grid");
        let before = page.clone();
        let err = renderer.render_template_grid(&mut page, "nope").unwrap_err();
        assert!(matches!(err, RenderError::ContainerNotFound { ref id } if id == "nope"));
        assert_eq!(page, before);
    }

    #[test]
    fn summary_reports_tabbed_layout() {
        let renderer = loaded(
            r#"{"knowledge_blocks":{
                "a":{"id":1,"title":"A","category":"One"},
                "b":{"id":2,"title":"B","category":"Two words"}
            }}"#,
        );
        let mut page = Page::new("t").with_container("grid");
        let summary = renderer.render_template_grid(&mut page, "grid").unwrap();
        assert_eq!(
            summary,
            GridSummary {
                categories: 2,
                cards: 2,
                tabbed: true,
                active_tab: Some("One".to_string()),
            }
        );
        assert!(page.container("grid").unwrap().tabbed);

        let switched = renderer.activate_tab(&mut page, "grid", "Two-words").unwrap();
        assert_eq!(switched.active_tab.as_deref(), Some("Two-words"));
    }

    #[test]
    fn unknown_tab_does_not_mutate() {
        let renderer = loaded(
            r#"{"knowledge_blocks":{
                "a":{"id":1,"title":"A","category":"One"},
                "b":{"id":2,"title":"B","category":"Two"}
            }}"#,
        );
        let mut page = Page::new("t").with_container("grid");
        renderer.render_template_grid(&mut page, "grid").unwrap();
        let before = page.clone();
        assert!(renderer.activate_tab(&mut page, "grid", "Three").is_err());
        assert_eq!(page, before);
    }
}
