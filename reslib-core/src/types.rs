//! Domain types for the resource library.
//!
//! The metadata document keeps the insertion order of `knowledge_blocks`;
//! category order and card order are derived from it.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder shown when a template has no summary.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Placeholder shown when a template has no tags.
pub const DEFAULT_KEYWORDS: &str = "No keywords";

/// File extensions treated as preview images (compared case-insensitively).
pub const PREVIEW_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a template. Accepts JSON strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId(pub String);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<u64> for TemplateId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        };
        Ok(TemplateId(id))
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl TemplateId {
    /// Static asset path for the downloadable template body.
    pub fn download_path(&self) -> String {
        format!("/templates/{}/template.md", self.0)
    }
}

/// Grouping key controlling which tab a template appears under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Category {
    /// Category name with each whitespace run collapsed to a single `-`.
    ///
    /// Whitespace is Unicode `White_Space` plus U+FEFF (byte order mark),
    /// which browsers' `\s` also matches. Used as the `data-tab` /
    /// `data-tab-content` pairing key.
    pub fn tab_slug(&self) -> String {
        let mut slug = String::with_capacity(self.0.len());
        let mut in_space = false;
        for ch in self.0.chars() {
            if is_slug_space(ch) {
                if !in_space {
                    slug.push('-');
                }
                in_space = true;
            } else {
                slug.push(ch);
                in_space = false;
            }
        }
        slug
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

fn is_slug_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single knowledge block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_files: Option<Vec<String>>,
}

impl Template {
    /// Summary text, or [`DEFAULT_DESCRIPTION`] when absent or empty.
    pub fn description(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_DESCRIPTION,
        }
    }

    /// Comma-joined tags, or [`DEFAULT_KEYWORDS`] when absent.
    ///
    /// An empty list yields an empty string.
    pub fn keywords(&self) -> String {
        match self.tags.as_deref() {
            Some(tags) => tags.join(", "),
            None => DEFAULT_KEYWORDS.to_string(),
        }
    }

    pub fn download_path(&self) -> String {
        self.id.download_path()
    }

    /// `content_files` entries that look like images, in document order.
    pub fn preview_images(&self) -> impl Iterator<Item = &str> {
        self.content_files
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|f| is_preview_image(f))
    }
}

/// `true` when `file` ends in one of [`PREVIEW_EXTENSIONS`], ignoring case.
pub fn is_preview_image(file: &str) -> bool {
    match file.rsplit_once('.') {
        Some((_, ext)) => PREVIEW_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

/// Root of the metadata document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub knowledge_blocks: IndexMap<String, Template>,
}

impl Metadata {
    pub fn len(&self) -> usize {
        self.knowledge_blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knowledge_blocks.is_empty()
    }

    /// Templates in document order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.knowledge_blocks.values()
    }
}

/// Which optional card features are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    /// Inline category and difficulty badges.
    pub badges: bool,
    /// Lazy-loaded preview images for image-like `content_files`.
    pub previews: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            badges: true,
            previews: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
