//! Layout extraction: flattens a rendered snapshot into visual elements.
//!
//! The walk runs in fixed stages (background, containers, tables, images,
//! icon glyphs, semantic text, residual text). A [`Consumed`] set threaded
//! through the stages keeps any node from producing the same kind of
//! element twice.

pub mod classify;
pub mod consumed;
mod stages;
pub mod view;

pub use classify::{ClassifyContext, Classification, classify};
pub use consumed::Consumed;
pub use stages::extract_elements;
pub use view::StyleView;

/// Tags whose boxes may become shapes, badges or triangles.
pub const CONTAINER_TAGS: [&str; 6] = ["div", "section", "aside", "header", "footer", "span"];

/// Text containers whose whole text is emitted as one element.
pub const SEMANTIC_TAGS: [&str; 13] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "button", "a", "label", "td", "th",
];

/// Semantic containers that suppress nested badges and gradient text.
pub const INLINE_SEMANTIC_TAGS: [&str; 11] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "button", "a", "label",
];

/// Block-level tags; a node containing one is not a single text run.
pub const BLOCK_TAGS: [&str; 11] = [
    "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol",
];

/// Elements that never render text of their own.
pub const NON_RENDERED_TAGS: [&str; 7] =
    ["head", "script", "style", "title", "meta", "link", "noscript"];

/// Knobs for turning computed styles into text runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Multiplier from CSS pixels to points for font sizes.
    pub px_to_pt: f32,
    /// Family used when a node reports none.
    pub default_font_family: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            px_to_pt: 0.75,
            default_font_family: "Arial".to_owned(),
        }
    }
}
