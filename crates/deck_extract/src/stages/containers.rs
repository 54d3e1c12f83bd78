//! Shapes, circles, triangles, badges and standalone gradient text.

use super::collapse_whitespace;
use crate::classify::{Classification, ClassifyContext, classify};
use crate::consumed::Consumed;
use crate::view::StyleView;
use crate::{BLOCK_TAGS, CONTAINER_TAGS, ExtractOptions, INLINE_SEMANTIC_TAGS};
use deck_core::VisualElement;
use deck_snapshot::{SnapshotNode, SnapshotTree};
use log::trace;
use tracing::info_span;

/// Boxes thinner than this in either direction are ignored.
const MIN_BOX_PX: f32 = 2.0;

pub(super) fn extract(
    tree: &SnapshotTree,
    options: &ExtractOptions,
    consumed: &mut Consumed,
    out: &mut Vec<VisualElement>,
) {
    let _span = info_span!("extract.containers").entered();
    for id in tree.preorder() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if !node.is_any_tag(&CONTAINER_TAGS)
            || node.is_hidden()
            || !node.rect.at_least(MIN_BOX_PX)
        {
            continue;
        }
        let context = context_for(tree, node);
        let element = match classify(&StyleView::new(node), &context, options) {
            Classification::Triangle(triangle) => VisualElement::Triangle(triangle),
            Classification::GradientText(text) => {
                consumed.mark_text_subtree(tree, id);
                VisualElement::Text(text)
            }
            Classification::StyledText(badge) => {
                consumed.mark_badge(tree, id);
                VisualElement::StyledText(badge)
            }
            Classification::Shape(shape) => VisualElement::Shape(shape),
            Classification::Circle(shape) => VisualElement::Circle(shape),
            Classification::DeferredGradientText | Classification::Skip => continue,
        };
        trace!("{} from <{}> {:?}", element.kind_name(), node.tag, id);
        out.push(element);
    }
}

/// Facts about `node`'s surroundings that classification depends on.
pub(super) fn context_for(tree: &SnapshotTree, node: &SnapshotNode) -> ClassifyContext {
    ClassifyContext {
        text: collapse_whitespace(&tree.text_content(node.id)),
        has_block_descendants: tree.any_descendant(node.id, |child| child.is_any_tag(&BLOCK_TAGS)),
        inside_semantic: tree
            .closest_ancestor(node.id, |ancestor| ancestor.is_any_tag(&INLINE_SEMANTIC_TAGS))
            .is_some(),
        parent_background: node
            .parent
            .and_then(|parent| tree.node(parent))
            .and_then(|parent| StyleView::new(parent).visible_background()),
    }
}
