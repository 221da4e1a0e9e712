//! # reslib-renderer
//!
//! Renders a resource-library metadata document into HTML: template cards
//! grouped by category, as a single grid or a tabbed set of grids, placed
//! into a named container of a [`Page`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reslib_renderer::{Page, TemplateRenderer};
//!
//! fn build() -> Result<String, reslib_renderer::RenderError> {
//!     let mut renderer = TemplateRenderer::new("metadata.json")?;
//!     renderer.load_metadata()?;
//!     let mut page = Page::new("Resource Library").with_container("template-library");
//!     renderer.render_template_grid(&mut page, "template-library")?;
//!     renderer.render_page(&page)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod page;
pub mod renderer;
pub mod tabs;

pub use context::{GridContext, Layout};
pub use engine::{TemplateEngine, TAB_SCRIPT};
pub use error::RenderError;
pub use page::{Container, Page};
pub use renderer::{GridSummary, TemplateRenderer};
pub use tabs::{Tab, TabSet};
