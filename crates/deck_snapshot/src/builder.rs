//! Programmatic snapshot construction for providers and tests.

use crate::node::{ImageInfo, NodeChild, NodeId, Pseudo, RawStyle, SnapshotNode, TextFragment};
use crate::tree::SnapshotTree;
use anyhow::Result as AnyResult;
use deck_core::Rect;

/// Builds a [`SnapshotTree`] node by node. The root is a `<body>` covering
/// the canvas.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    nodes: Vec<SnapshotNode>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(body_rect: Rect) -> Self {
        Self {
            nodes: vec![Self::blank(NodeId(0), "body", None, body_rect)],
        }
    }

    fn blank(id: NodeId, tag: &str, parent: Option<NodeId>, rect: Rect) -> SnapshotNode {
        SnapshotNode {
            id,
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            rect,
            style: RawStyle::new(),
            before: None,
            after: None,
            classes: Vec::new(),
            image: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child element and return a handle for styling it.
    pub fn element(&mut self, parent: NodeId, tag: &str, rect: Rect) -> ElementBuilder<'_> {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Self::blank(id, tag, Some(parent), rect));
        if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
            parent_node.children.push(NodeChild::Element(id));
        }
        ElementBuilder { builder: self, id }
    }

    /// Append a text node to `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str, rect: Rect) {
        if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
            parent_node.children.push(NodeChild::Text(TextFragment {
                text: text.to_owned(),
                rect,
            }));
        }
    }

    /// Re-open an existing element for styling.
    pub fn edit(&mut self, id: NodeId) -> ElementBuilder<'_> {
        ElementBuilder { builder: self, id }
    }

    /// # Errors
    /// Returns an error if the assembled tree fails validation.
    pub fn build(self) -> AnyResult<SnapshotTree> {
        SnapshotTree::from_nodes(self.nodes)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SnapshotNode> {
        self.nodes.get_mut(id.0 as usize)
    }
}

/// Fluent setter for one element of a [`TreeBuilder`].
#[derive(Debug)]
pub struct ElementBuilder<'tree> {
    builder: &'tree mut TreeBuilder,
    id: NodeId,
}

impl ElementBuilder<'_> {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Set a computed style property.
    pub fn style(self, name: &str, value: &str) -> Self {
        if let Some(node) = self.builder.node_mut(self.id) {
            node.style.insert(name.to_owned(), value.to_owned());
        }
        self
    }

    /// Set a property on a pseudo element, creating it if needed.
    pub fn pseudo(self, which: Pseudo, name: &str, value: &str) -> Self {
        if let Some(node) = self.builder.node_mut(self.id) {
            let slot = match which {
                Pseudo::Before => &mut node.before,
                Pseudo::After => &mut node.after,
            };
            slot.get_or_insert_with(RawStyle::new)
                .insert(name.to_owned(), value.to_owned());
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        if let Some(node) = self.builder.node_mut(self.id) {
            node.classes.push(class.to_owned());
        }
        self
    }

    pub fn image(self, info: ImageInfo) -> Self {
        if let Some(node) = self.builder.node_mut(self.id) {
            node.image = Some(info);
        }
        self
    }

    /// Add a text child spanning the element's own box.
    pub fn text(self, text: &str) -> Self {
        let rect = self
            .builder
            .node_mut(self.id)
            .map(|node| node.rect)
            .unwrap_or_default();
        self.builder.text(self.id, text, rect);
        self
    }
}
