//! Node records as reported by the renderer.

use deck_core::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Computed style properties by CSS name.
pub type RawStyle = BTreeMap<String, String>;

/// Identity of a node within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Text node with the bounding box of its rendered range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub rect: Rect,
}

/// Child slot of an element, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeChild {
    Element(NodeId),
    Text(TextFragment),
}

/// Generated-content pseudo element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    Before,
    After,
}

/// Replaced-image data for `<img>` nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    /// Intrinsic size in pixels, 0 when the renderer did not know it.
    #[serde(default)]
    pub natural_width: f32,
    #[serde(default)]
    pub natural_height: f32,
}

/// One element of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeChild>,
    pub rect: Rect,
    #[serde(default)]
    pub style: RawStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<RawStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<RawStyle>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
}

impl SnapshotNode {
    /// Computed property value, empty when the renderer did not report it.
    #[inline]
    #[must_use]
    pub fn prop(&self, name: &str) -> &str {
        self.style.get(name).map_or("", String::as_str)
    }

    /// Property of a pseudo element, if that pseudo element was reported.
    #[must_use]
    pub fn pseudo(&self, which: Pseudo) -> Option<&RawStyle> {
        match which {
            Pseudo::Before => self.before.as_ref(),
            Pseudo::After => self.after.as_ref(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Tag is one of `tags`.
    #[inline]
    #[must_use]
    pub fn is_any_tag(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag.as_str())
    }

    /// `display: none` or `visibility: hidden`.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.prop("display") == "none" || self.prop("visibility") == "hidden"
    }

    /// First class that starts with `prefix`.
    #[must_use]
    pub fn class_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.classes
            .iter()
            .map(String::as_str)
            .find(|class| class.starts_with(prefix))
    }

    /// Own text nodes concatenated, without descendants.
    #[must_use]
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                NodeChild::Text(fragment) => Some(fragment.text.as_str()),
                NodeChild::Element(_) => None,
            })
            .collect()
    }

    /// At least one own text node with visible characters.
    #[must_use]
    pub fn has_direct_text(&self) -> bool {
        self.children.iter().any(|child| {
            matches!(child, NodeChild::Text(fragment) if !fragment.text.trim().is_empty())
        })
    }

    /// Child element ids in document order.
    pub fn element_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|child| match child {
            NodeChild::Element(id) => Some(*id),
            NodeChild::Text(_) => None,
        })
    }
}
