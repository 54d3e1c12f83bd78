//! Rendered document snapshots.
//!
//! A snapshot is the laid-out node tree reported by an external renderer:
//! every element with its box on the virtual canvas, its computed style as
//! raw strings, and its text nodes with their rendered bounds. The pipeline
//! only reads it.

pub mod builder;
pub mod node;
pub mod provider;
pub mod tree;

pub use builder::{ElementBuilder, TreeBuilder};
pub use node::{ImageInfo, NodeChild, NodeId, Pseudo, RawStyle, SnapshotNode, TextFragment};
pub use provider::{CanvasSize, JsonSnapshotProvider, SnapshotProvider};
pub use tree::{SnapshotDocument, SnapshotTree};
