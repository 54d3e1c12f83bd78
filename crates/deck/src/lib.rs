//! Rendered HTML slides to slide documents.
//!
//! Each slide goes through the same two steps: the extractor flattens the
//! rendered snapshot into visual elements, and the compositor draws those
//! onto a [`DocumentSink`](deck_compositor::DocumentSink). Slides are
//! converted one after another into one growing document.

pub mod config;
pub mod pipeline;

pub use config::DeckConfig;
pub use pipeline::{DeckReport, SlideOutcome, SlideReport, convert_deck, convert_slide};
