//! Per-slide bookkeeping of nodes already turned into elements.

use deck_snapshot::{NodeId, SnapshotTree};
use std::collections::HashSet;

/// Which nodes earlier stages already accounted for.
///
/// One value lives for one extraction and is passed by `&mut` to every
/// stage, so independent slides never share state.
#[derive(Debug, Clone, Default)]
pub struct Consumed {
    text: HashSet<NodeId>,
    badges: HashSet<NodeId>,
    tables: HashSet<NodeId>,
}

impl Consumed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of `id` has been emitted.
    pub fn mark_text(&mut self, id: NodeId) {
        self.text.insert(id);
    }

    /// Text of `id` and everything below it has been emitted.
    pub fn mark_text_subtree(&mut self, tree: &SnapshotTree, id: NodeId) {
        self.text.insert(id);
        self.text.extend(tree.descendants(id));
    }

    /// `id` became a styled-text badge and its text is spoken for. Images
    /// and icons below it are still drawn on their own.
    pub fn mark_badge(&mut self, tree: &SnapshotTree, id: NodeId) {
        self.badges.insert(id);
        self.mark_text_subtree(tree, id);
    }

    /// `id` is a table; it and all descendants belong to it.
    pub fn mark_table(&mut self, tree: &SnapshotTree, id: NodeId) {
        self.tables.insert(id);
        self.tables.extend(tree.descendants(id));
    }

    #[inline]
    #[must_use]
    pub fn is_text_consumed(&self, id: NodeId) -> bool {
        self.text.contains(&id)
    }

    #[inline]
    #[must_use]
    pub fn is_badge(&self, id: NodeId) -> bool {
        self.badges.contains(&id)
    }

    #[inline]
    #[must_use]
    pub fn in_table(&self, id: NodeId) -> bool {
        self.tables.contains(&id)
    }
}
