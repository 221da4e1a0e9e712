//! Grid context: serializable rendering payload built from [`Metadata`].
//!
//! Building the context is pure: no page, no engine. Everything the
//! templates show (placeholders, download paths, badges, previews, which
//! tab is active) is decided here.

use serde::{Deserialize, Serialize};

use reslib_core::{group_by_category, CardOptions, Metadata, Template};

use crate::error::RenderError;
use crate::tabs::TabSet;

/// How the container content is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// No templates: the container is cleared.
    Empty,
    /// One category: a single unlabeled grid.
    Flat,
    /// Several categories: tab bar plus one panel per category.
    Tabbed,
}

/// Full payload for one container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridContext {
    pub layout: Layout,
    /// One panel per category, in first-seen order.
    pub panels: Vec<PanelCtx>,
}

/// A category panel (and, in tabbed layout, its tab button).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelCtx {
    pub category: String,
    pub slug: String,
    pub active: bool,
    pub cards: Vec<CardCtx>,
}

/// A single template card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCtx {
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub download_href: String,
    pub badges: Option<BadgesCtx>,
    pub previews: Vec<PreviewCtx>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesCtx {
    pub category: String,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewCtx {
    pub src: String,
    pub alt: String,
}

impl CardCtx {
    pub fn from_template(template: &Template, options: CardOptions) -> Self {
        let badges = options.badges.then(|| BadgesCtx {
            category: template.category.0.clone(),
            difficulty: template.difficulty.clone(),
        });
        let previews = if options.previews {
            template
                .preview_images()
                .map(|src| PreviewCtx {
                    src: src.to_string(),
                    alt: format!("Preview of {} template", template.title),
                })
                .collect()
        } else {
            Vec::new()
        };

        CardCtx {
            id: template.id.0.clone(),
            title: template.title.clone(),
            description: template.description().to_string(),
            keywords: template.keywords(),
            download_href: template.download_path(),
            badges,
            previews,
        }
    }
}

impl GridContext {
    /// Build the payload for `metadata`.
    ///
    /// `active_tab` selects the initially visible panel by slug; `None`
    /// means the first category. An unknown slug is an error.
    pub fn build(
        metadata: &Metadata,
        options: CardOptions,
        active_tab: Option<&str>,
    ) -> Result<Self, RenderError> {
        let groups = group_by_category(metadata);
        let mut tabs = TabSet::new(groups.iter().map(|g| g.category));
        if let Some(slug) = active_tab {
            tabs.activate(slug)?;
        }

        let panels = groups
            .iter()
            .zip(tabs.tabs())
            .enumerate()
            .map(|(index, (group, tab))| PanelCtx {
                category: tab.label.clone(),
                slug: tab.slug.clone(),
                active: index == tabs.active_index(),
                cards: group
                    .templates
                    .iter()
                    .map(|t| CardCtx::from_template(t, options))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let layout = match panels.len() {
            0 => Layout::Empty,
            1 => Layout::Flat,
            _ => Layout::Tabbed,
        };
        Ok(GridContext { layout, panels })
    }

    pub fn card_count(&self) -> usize {
        self.panels.iter().map(|p| p.cards.len()).sum()
    }

    pub fn active_panel(&self) -> Option<&PanelCtx> {
        self.panels.iter().find(|p| p.active)
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
