//! Tab-set state for multi-category grids.
//!
//! Mirrors what the client-side shim does on click: every tab and panel is
//! deactivated, then exactly the chosen pair is activated.

use reslib_core::Category;

use crate::error::RenderError;

/// One tab button and its panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    /// Pairing key for `data-tab` / `data-tab-content`; unique within a set.
    pub slug: String,
}

/// Ordered tabs with exactly one active entry (when non-empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabSet {
    /// Build tabs in the given order; the first one starts active.
    ///
    /// Categories whose slugs collide get `-2`, `-3`, ... suffixes.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        let mut tabs: Vec<Tab> = Vec::new();
        for category in categories {
            let base = category.tab_slug();
            let mut slug = base.clone();
            let mut n = 2;
            while tabs.iter().any(|t| t.slug == slug) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            tabs.push(Tab {
                label: category.0.clone(),
                slug,
            });
        }
        TabSet { tabs, active: 0 }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The active tab, `None` only for an empty set.
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, slug: &str) -> bool {
        self.active().is_some_and(|t| t.slug == slug)
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.slug == slug)
    }

    /// Make `slug` the single active tab. Unknown slugs leave the state as is.
    pub fn activate(&mut self, slug: &str) -> Result<&Tab, RenderError> {
        let index = self.position(slug).ok_or_else(|| RenderError::UnknownTab {
            slug: slug.to_string(),
        })?;
        self.active = index;
        Ok(&self.tabs[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> TabSet {
        let categories: Vec<Category> = names.iter().map(|n| Category::from(*n)).collect();
        TabSet::new(categories.iter())
    }

    #[test]
    fn first_tab_starts_active() {
        let tabs = set(&["Marketing", "Finance"]);
        assert_eq!(tabs.active().map(|t| t.label.as_str()), Some("Marketing"));
        assert!(tabs.is_active("Marketing"));
        assert!(!tabs.is_active("Finance"));
    }

    #[test]
    fn activate_switches_exactly_one_tab() {
        let mut tabs = set(&["Marketing", "Human Resources", "Finance"]);
        tabs.activate("Human-Resources").expect("known slug");
        let active: Vec<_> = tabs
            .tabs()
            .iter()
            .filter(|t| tabs.is_active(&t.slug))
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(active, vec!["Human Resources"]);
    }

    #[test]
    fn unknown_slug_keeps_previous_state() {
        let mut tabs = set(&["A", "B"]);
        tabs.activate("B").unwrap();
        let err = tabs.activate("C").unwrap_err();
        assert!(matches!(err, RenderError::UnknownTab { .. }));
        assert!(tabs.is_active("B"));
    }

    #[test]
    fn colliding_slugs_are_made_unique() {
        let tabs = set(&["Data Science", "Data  Science", "Data\tScience"]);
        let slugs: Vec<_> = tabs.tabs().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["Data-Science", "Data-Science-2", "Data-Science-3"]);
    }

    #[test]
    fn empty_set_has_no_active_tab() {
        let tabs = set(&[]);
        assert!(tabs.is_empty());
        assert!(tabs.active().is_none());
    }
}
