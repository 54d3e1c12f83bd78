//! Extraction stages, run in priority order over one snapshot.

mod background;
mod containers;
mod icons;
mod images;
mod tables;
mod text;

use crate::ExtractOptions;
use crate::consumed::Consumed;
use deck_core::VisualElement;
use deck_snapshot::{SnapshotNode, SnapshotTree};
use log::{debug, trace};
use tracing::info_span;

/// Flatten a snapshot into visual elements.
///
/// Stages run as background, containers, tables, images, icon glyphs,
/// semantic text, then residual text. Elements without area are dropped
/// silently. The result is deterministic for a given tree.
#[must_use]
pub fn extract_elements(tree: &SnapshotTree, options: &ExtractOptions) -> Vec<VisualElement> {
    let _span = info_span!("extract", nodes = tree.len()).entered();
    let mut consumed = Consumed::new();
    let mut elements = Vec::new();

    background::extract(tree, &mut elements);
    containers::extract(tree, options, &mut consumed, &mut elements);
    tables::extract(tree, options, &mut consumed, &mut elements);
    images::extract(tree, &consumed, &mut elements);
    icons::extract(tree, options, &mut consumed, &mut elements);
    text::extract_semantic(tree, options, &mut consumed, &mut elements);
    text::extract_residual(tree, options, &mut consumed, &mut elements);

    elements.retain(|element| {
        let keep = !element.geometry().is_empty();
        if !keep {
            trace!("dropping {} without area", element.kind_name());
        }
        keep
    });
    debug!("extracted {} elements from {} nodes", elements.len(), tree.len());
    elements
}

/// Visible and with a paintable box.
fn is_rendered(node: &SnapshotNode) -> bool {
    !node.is_hidden() && !node.rect.is_empty()
}

/// Whitespace runs collapsed to single spaces, ends trimmed.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`collapse_whitespace`] but, when `keep_breaks` is set, line breaks
/// survive and blank lines collapse.
fn normalize_text(raw: &str, keep_breaks: bool) -> String {
    if !keep_breaks {
        return collapse_whitespace(raw);
    }
    raw.split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
