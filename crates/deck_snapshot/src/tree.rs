//! Validated snapshot tree and read-only queries over it.

use crate::node::{NodeChild, NodeId, SnapshotNode};
use anyhow::{Result as AnyResult, anyhow, bail};
use core::iter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialized form of a snapshot: the node list, root first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Canvas the document was laid out on, when the renderer recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<(f32, f32)>,
    pub nodes: Vec<SnapshotNode>,
}

/// An immutable node tree with an id index.
#[derive(Debug, Clone)]
pub struct SnapshotTree {
    nodes: Vec<SnapshotNode>,
    index: HashMap<NodeId, usize>,
    root: NodeId,
}

impl SnapshotTree {
    /// Validate and index a node list. The first node is the root.
    ///
    /// # Errors
    /// Returns an error when the list is empty, ids repeat, the root has a
    /// parent, any parent/child link points at a missing or mismatched
    /// node, a node is not listed exactly once among its parent's children,
    /// or a node cannot be reached from the root.
    pub fn from_nodes(nodes: Vec<SnapshotNode>) -> AnyResult<Self> {
        let root_node = nodes.first().ok_or_else(|| anyhow!("snapshot has no nodes"))?;
        if let Some(parent) = root_node.parent {
            bail!("root node {:?} has parent {parent:?}", root_node.id);
        }
        let root = root_node.id;
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                bail!("duplicate node id {:?}", node.id);
            }
        }
        let mut listings = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            if node.id != root {
                let parent = node
                    .parent
                    .ok_or_else(|| anyhow!("node {:?} has no parent", node.id))?;
                if !index.contains_key(&parent) {
                    bail!("node {:?} points at missing parent {parent:?}", node.id);
                }
            }
            for child in node.element_ids() {
                let child_node = index
                    .get(&child)
                    .and_then(|position| nodes.get(*position))
                    .ok_or_else(|| anyhow!("node {:?} lists missing child {child:?}", node.id))?;
                if child_node.parent != Some(node.id) {
                    bail!("child {child:?} of {:?} names a different parent", node.id);
                }
                *listings.entry(child).or_insert(0_usize) += 1;
            }
        }
        for node in nodes.iter().filter(|node| node.id != root) {
            match listings.get(&node.id).copied().unwrap_or_default() {
                1 => {}
                0 => bail!("node {:?} is missing from its parent's children", node.id),
                count => bail!("node {:?} is listed {count} times by its parent", node.id),
            }
        }
        let tree = Self { nodes, index, root };
        let reached = tree.preorder().len();
        if reached != tree.len() {
            bail!("{} nodes are unreachable from the root", tree.len() - reached);
        }
        Ok(tree)
    }

    /// Parse a serialized [`SnapshotDocument`].
    ///
    /// # Errors
    /// Returns an error on malformed JSON or an invalid tree.
    pub fn from_json(json: &str) -> AnyResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Self::from_nodes(document.nodes)
    }

    /// Serializable copy of the node list.
    #[must_use]
    pub fn to_document(&self) -> SnapshotDocument {
        SnapshotDocument {
            canvas: None,
            nodes: self.nodes.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.index.get(&id).and_then(|position| self.nodes.get(*position))
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &SnapshotNode {
        // The root was checked to exist at construction.
        &self.nodes[self.index[&self.root]]
    }

    /// The `<body>` element, or the root when there is none.
    #[must_use]
    pub fn body(&self) -> &SnapshotNode {
        self.preorder()
            .into_iter()
            .filter_map(|id| self.node(id))
            .find(|node| node.is_tag("body"))
            .unwrap_or_else(|| self.root())
    }

    /// Number of element nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every element id in document order.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        order.push(self.root);
        order.extend(self.descendants(self.root));
        order
    }

    /// Descendant element ids of `id` in document order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).rev().collect();
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.child_ids(next).rev());
        }
        order
    }

    /// Child elements of `id` in document order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = &SnapshotNode> + '_ {
        self.child_ids(id).filter_map(|child| self.node(child))
    }

    fn child_ids(&self, id: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| match child {
                NodeChild::Element(child_id) => Some(*child_id),
                NodeChild::Text(_) => None,
            })
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SnapshotNode> + '_ {
        let mut current = self.node(id).and_then(|node| node.parent);
        iter::from_fn(move || {
            let node = self.node(current?)?;
            current = node.parent;
            Some(node)
        })
    }

    /// Nearest ancestor (excluding `id` itself) that satisfies `predicate`.
    pub fn closest_ancestor<P>(&self, id: NodeId, predicate: P) -> Option<&SnapshotNode>
    where
        P: FnMut(&&SnapshotNode) -> bool,
    {
        self.ancestors(id).find(predicate)
    }

    /// Any descendant satisfies `predicate`.
    pub fn any_descendant<P>(&self, id: NodeId, mut predicate: P) -> bool
    where
        P: FnMut(&SnapshotNode) -> bool,
    {
        self.descendants(id)
            .into_iter()
            .filter_map(|descendant| self.node(descendant))
            .any(|node| predicate(node))
    }

    /// Rendered text of the subtree. `<br>` contributes a newline.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.is_tag("br") {
            out.push('\n');
            return;
        }
        for child in &node.children {
            match child {
                NodeChild::Text(fragment) => out.push_str(&fragment.text),
                NodeChild::Element(child_id) => self.collect_text(*child_id, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use deck_core::Rect;

    fn sample() -> SnapshotTree {
        let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let body = builder.root();
        let para = builder.element(body, "p", Rect::new(0.0, 0.0, 100.0, 20.0)).id();
        builder.text(para, "Hello ", Rect::new(0.0, 0.0, 40.0, 20.0));
        let span = builder.element(para, "span", Rect::new(40.0, 0.0, 40.0, 20.0)).id();
        builder.text(span, "world", Rect::new(40.0, 0.0, 40.0, 20.0));
        builder.element(para, "br", Rect::default());
        builder.text(para, "again", Rect::new(0.0, 20.0, 40.0, 20.0));
        builder.build().expect("valid tree")
    }

    #[test]
    fn text_content_walks_subtree_with_breaks() {
        let tree = sample();
        let para = tree.element_children(tree.root().id).next().expect("p").id;
        assert_eq!(tree.text_content(para), "Hello world\nagain");
        assert_eq!(tree.node(para).map(SnapshotNode::direct_text).as_deref(), Some("Hello again"));
    }

    #[test]
    fn preorder_visits_parents_first() {
        let tree = sample();
        let tags: Vec<&str> = tree
            .preorder()
            .into_iter()
            .filter_map(|id| tree.node(id))
            .map(|node| node.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["body", "p", "span", "br"]);
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let tree = sample();
        let span = tree
            .preorder()
            .into_iter()
            .find(|id| tree.node(*id).is_some_and(|node| node.is_tag("span")))
            .expect("span");
        let tags: Vec<&str> = tree.ancestors(span).map(|node| node.tag.as_str()).collect();
        assert_eq!(tags, vec!["p", "body"]);
    }

    #[test]
    fn dangling_child_is_rejected() {
        let mut document = sample().to_document();
        document.nodes[0].children.push(NodeChild::Element(NodeId(99)));
        assert!(SnapshotTree::from_nodes(document.nodes).is_err());
    }

    #[test]
    fn node_missing_from_parent_children_is_rejected() {
        let mut document = sample().to_document();
        document.nodes[1]
            .children
            .retain(|child| !matches!(child, NodeChild::Element(_)));
        let err = SnapshotTree::from_nodes(document.nodes).expect_err("orphaned span");
        assert!(err.to_string().contains("missing from its parent"), "{err}");
    }

    #[test]
    fn child_listed_twice_is_rejected() {
        let mut document = sample().to_document();
        let span = document.nodes[1].element_ids().next().expect("span");
        document.nodes[1].children.push(NodeChild::Element(span));
        let err = SnapshotTree::from_nodes(document.nodes).expect_err("duplicate listing");
        assert!(err.to_string().contains("listed 2 times"), "{err}");
    }

    #[test]
    fn detached_cycle_is_rejected() {
        let mut document = sample().to_document();
        let extra = document.nodes.len() as u32;
        let first = NodeId(extra + 10);
        let second = NodeId(extra + 11);
        let mut looped = document.nodes[2].clone();
        looped.id = first;
        looped.parent = Some(second);
        looped.children = vec![NodeChild::Element(second)];
        let mut back = looped.clone();
        back.id = second;
        back.parent = Some(first);
        back.children = vec![NodeChild::Element(first)];
        document.nodes.push(looped);
        document.nodes.push(back);
        let err = SnapshotTree::from_nodes(document.nodes).expect_err("cycle");
        assert!(err.to_string().contains("unreachable"), "{err}");
    }

    #[test]
    fn json_round_trip_preserves_structure() {
        let json = serde_json::to_string(&sample().to_document()).expect("serialize");
        let tree = SnapshotTree::from_json(&json).expect("parse");
        assert_eq!(tree.len(), 4);
    }
}
