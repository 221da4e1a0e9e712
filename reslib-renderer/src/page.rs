//! In-memory render target: an HTML page made of containers keyed by id.

use indexmap::IndexMap;

/// A page container and its current inner HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub html: String,
    /// Set when the content carries a tab bar that needs the switch script.
    pub tabbed: bool,
}

/// Page shell with named containers, rendered by
/// [`TemplateEngine::render_page`](crate::TemplateEngine::render_page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub description: Option<String>,
    pub stylesheets: Vec<String>,
    containers: IndexMap<String, Container>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Page {
            title: title.into(),
            description: None,
            stylesheets: Vec::new(),
            containers: IndexMap::new(),
        }
    }

    /// Builder form of [`Page::add_container`].
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.add_container(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    /// Add an empty container. Returns `false` if the id already exists.
    pub fn add_container(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.containers.contains_key(&id) {
            return false;
        }
        self.containers.insert(id, Container::default());
        true
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(|c| c.html.as_str())
    }

    /// Containers in insertion order.
    pub fn containers(&self) -> impl Iterator<Item = (&str, &Container)> {
        self.containers.iter().map(|(id, c)| (id.as_str(), c))
    }

    /// `true` when any container needs the tab-switch script.
    pub fn has_tabs(&self) -> bool {
        self.containers.values().any(|c| c.tabbed)
    }

    /// Fully replace a container's content. Returns `false` if it does not exist.
    pub(crate) fn replace_content(&mut self, id: &str, html: String, tabbed: bool) -> bool {
        match self.containers.get_mut(id) {
            Some(container) => {
                container.html = html;
                container.tabbed = tabbed;
                true
            }
            None => false,
        }
    }
}
