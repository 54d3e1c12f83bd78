//! Snapshot provider seam.

use crate::tree::{SnapshotDocument, SnapshotTree};
use anyhow::{Context as _, Result as AnyResult};
use log::warn;
use std::fs;
use std::path::PathBuf;

/// Size of the virtual canvas documents are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width_px: f32,
    pub height_px: f32,
}

impl CanvasSize {
    #[inline]
    #[must_use]
    pub const fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Renders a source document and reports its laid-out node tree.
///
/// Implementations own a rendering session and are called once per slide,
/// in order. They must freeze animations and wait for resources before
/// reading styles.
pub trait SnapshotProvider {
    /// Render `document` on a canvas of `canvas` size.
    ///
    /// # Errors
    /// Returns an error if the document cannot be loaded or rendered.
    fn snapshot(&mut self, document: &str, canvas: CanvasSize) -> AnyResult<SnapshotTree>;
}

/// Reads snapshots that an external renderer already wrote to disk as
/// JSON. `document` is a path, relative to `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct JsonSnapshotProvider {
    base_dir: Option<PathBuf>,
}

impl JsonSnapshotProvider {
    #[must_use]
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, document: &str) -> PathBuf {
        self.base_dir
            .as_ref()
            .map_or_else(|| PathBuf::from(document), |base| base.join(document))
    }
}

impl SnapshotProvider for JsonSnapshotProvider {
    fn snapshot(&mut self, document: &str, canvas: CanvasSize) -> AnyResult<SnapshotTree> {
        let path = self.resolve(document);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let parsed: SnapshotDocument = serde_json::from_str(&json)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        let mismatch = parsed.canvas.filter(|(width, height)| {
            *width != canvas.width_px || *height != canvas.height_px
        });
        if let Some((width, height)) = mismatch {
            warn!(
                "snapshot {} was laid out on {width}x{height}, expected {}x{}",
                path.display(),
                canvas.width_px,
                canvas.height_px
            );
        }
        SnapshotTree::from_nodes(parsed.nodes)
    }
}
