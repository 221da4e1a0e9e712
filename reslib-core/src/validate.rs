//! Structural checks on a loaded metadata document.

use std::collections::HashMap;
use std::fmt;

use crate::types::Metadata;

/// A single problem found in the metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// `knowledge_blocks` is missing or empty.
    Empty,
    BlankTitle { key: String },
    BlankCategory { key: String },
    /// Two blocks share an id, so their download paths collide.
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Empty => write!(f, "document has no knowledge blocks"),
            ValidationIssue::BlankTitle { key } => write!(f, "block '{key}' has a blank title"),
            ValidationIssue::BlankCategory { key } => {
                write!(f, "block '{key}' has a blank category")
            }
            ValidationIssue::DuplicateId { id, first, second } => write!(
                f,
                "blocks '{first}' and '{second}' share id '{id}'"
            ),
        }
    }
}

/// Check every block; returns issues in document order.
pub fn validate(metadata: &Metadata) -> Vec<ValidationIssue> {
    if metadata.is_empty() {
        return vec![ValidationIssue::Empty];
    }

    let mut issues = Vec::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (key, template) in &metadata.knowledge_blocks {
        if template.title.trim().is_empty() {
            issues.push(ValidationIssue::BlankTitle { key: key.clone() });
        }
        if template.category.is_blank() {
            issues.push(ValidationIssue::BlankCategory { key: key.clone() });
        }
        if let Some(first) = seen.get(template.id.0.as_str()) {
            issues.push(ValidationIssue::DuplicateId {
                id: template.id.0.clone(),
                first: (*first).to_string(),
                second: key.clone(),
            });
        } else {
            seen.insert(template.id.0.as_str(), key.as_str());
        }
    }
    issues
}
