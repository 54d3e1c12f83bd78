//! Semantic text containers and leftover loose text.

use super::{collapse_whitespace, is_rendered, normalize_text};
use crate::classify::{
    CIRCLE_RADIUS_FACTOR, DOT_RADIUS_FACTOR, SMALL_BADGE_MAX_PX, SQUARE_HIGH, SQUARE_LOW, is_round,
};
use crate::consumed::Consumed;
use crate::view::StyleView;
use crate::{BLOCK_TAGS, ExtractOptions, NON_RENDERED_TAGS, SEMANTIC_TAGS};
use deck_core::{
    Border, BulletInfo, BulletShape, Color, Gradient, Rect, TextElement, TextRun, VisualElement,
};
use deck_snapshot::{NodeChild, NodeId, SnapshotNode, SnapshotTree};
use log::trace;
use tracing::info_span;

/// Radius below which a list marker reads as square.
const SQUARE_MARKER_RADIUS_PX: f32 = 2.0;
/// Bullet size relative to the font when no marker element gives one.
const BULLET_FONT_RATIO: f32 = 0.6;

/// A piece of a container's text with its own box.
struct Segment {
    text: String,
    rect: Rect,
    gradient: Option<Gradient>,
}

pub(super) fn extract_semantic(
    tree: &SnapshotTree,
    options: &ExtractOptions,
    consumed: &mut Consumed,
    out: &mut Vec<VisualElement>,
) {
    let _span = info_span!("extract.text").entered();
    for id in tree.preorder() {
        let Some(node) = tree.node(id).filter(|node| node.is_any_tag(&SEMANTIC_TAGS)) else {
            continue;
        };
        if consumed.is_text_consumed(id) || consumed.in_table(id) || !is_rendered(node) {
            continue;
        }
        let view = StyleView::new(node);
        let emitted = if has_inline_badges(tree, consumed, id) {
            badge_split(tree, consumed, &view, options)
        } else if tree.any_descendant(id, |child| StyleView::new(child).is_gradient_text()) {
            gradient_merge(tree, &view, options).into_iter().collect()
        } else {
            plain_text(tree, &view, options).into_iter().collect()
        };
        if emitted.is_empty() {
            continue;
        }
        trace!("<{}> {id:?} gave {} text elements", node.tag, emitted.len());
        out.extend(emitted.into_iter().map(VisualElement::Text));
        consumed.mark_text_subtree(tree, id);
    }
}

pub(super) fn extract_residual(
    tree: &SnapshotTree,
    options: &ExtractOptions,
    consumed: &mut Consumed,
    out: &mut Vec<VisualElement>,
) {
    let _span = info_span!("extract.residual").entered();
    for id in tree.preorder() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if consumed.is_text_consumed(id)
            || consumed.in_table(id)
            || node.is_any_tag(&NON_RENDERED_TAGS)
            || node.is_any_tag(&SEMANTIC_TAGS)
            || !node.has_direct_text()
            || !is_rendered(node)
        {
            continue;
        }
        if tree
            .closest_ancestor(id, |ancestor| ancestor.is_any_tag(&SEMANTIC_TAGS))
            .is_some()
            || tree.any_descendant(id, |child| child.is_any_tag(&BLOCK_TAGS))
        {
            continue;
        }
        let text = collapse_whitespace(&tree.text_content(id));
        if text.is_empty() {
            continue;
        }
        let view = StyleView::new(node);
        trace!("residual text in <{}> {id:?}", node.tag);
        out.push(VisualElement::Text(TextElement {
            geometry: node.rect,
            runs: vec![view.run(text, Color::BLACK, options)],
            bullet: None,
            border: Border::from_set(view.borders()),
        }));
        consumed.mark_text_subtree(tree, id);
    }
}

/// A small badge sits somewhere inside `id`.
fn has_inline_badges(tree: &SnapshotTree, consumed: &Consumed, id: NodeId) -> bool {
    tree.descendants(id).into_iter().any(|child| {
        consumed.is_badge(child)
            && tree
                .node(child)
                .is_some_and(|node| node.rect.at_most(SMALL_BADGE_MAX_PX))
    })
}

/// One text element per text fragment around the badges.
fn badge_split(
    tree: &SnapshotTree,
    consumed: &Consumed,
    view: &StyleView<'_>,
    options: &ExtractOptions,
) -> Vec<TextElement> {
    let mut segments = Vec::new();
    collect_fragments(tree, consumed, view.node(), &mut segments);
    let overlay = view.text_gradient();
    let border = Border::from_set(view.borders());
    segments
        .into_iter()
        .map(|segment| {
            let mut run = view.run(segment.text, Color::BLACK, options);
            run.gradient_overlay.clone_from(&overlay);
            TextElement {
                geometry: segment.rect,
                runs: vec![run],
                bullet: None,
                border: border.clone(),
            }
        })
        .collect()
}

/// Depth-first text fragments of `node`, skipping badge subtrees.
fn collect_fragments(
    tree: &SnapshotTree,
    consumed: &Consumed,
    node: &SnapshotNode,
    out: &mut Vec<Segment>,
) {
    for child in &node.children {
        match child {
            NodeChild::Text(fragment) => {
                let text = collapse_whitespace(&fragment.text);
                if !text.is_empty() && !fragment.rect.is_empty() {
                    out.push(Segment {
                        text,
                        rect: fragment.rect,
                        gradient: None,
                    });
                }
            }
            NodeChild::Element(child_id) => {
                if consumed.is_badge(*child_id) {
                    continue;
                }
                if let Some(child) = tree.node(*child_id) {
                    collect_fragments(tree, consumed, child, out);
                }
            }
        }
    }
}

/// Direct children of a container holding gradient text, merged into one
/// element with a run per child.
fn gradient_merge(
    tree: &SnapshotTree,
    view: &StyleView<'_>,
    options: &ExtractOptions,
) -> Option<TextElement> {
    let node = view.node();
    let segments: Vec<Segment> = node
        .children
        .iter()
        .filter_map(|child| match child {
            NodeChild::Text(fragment) => Some(Segment {
                text: collapse_whitespace(&fragment.text),
                rect: fragment.rect,
                gradient: None,
            }),
            NodeChild::Element(child_id) => tree.node(*child_id).map(|child| Segment {
                text: collapse_whitespace(&tree.text_content(child.id)),
                rect: child.rect,
                gradient: StyleView::new(child).text_gradient(),
            }),
        })
        .filter(|segment| !segment.text.is_empty())
        .collect();
    let (first, last) = (segments.first()?, segments.last()?);
    let height = segments
        .iter()
        .map(|segment| segment.rect.height)
        .fold(first.rect.height, f32::max);
    let geometry = Rect {
        height,
        ..first.rect.span_to(&last.rect)
    };
    let own = view.text_gradient();
    let runs: Vec<TextRun> = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let content = if index == 0 {
                segment.text.clone()
            } else {
                format!(" {}", segment.text)
            };
            let mut run = view.run(content, Color::BLACK, options);
            run.gradient_overlay = segment.gradient.clone().or_else(|| own.clone());
            run
        })
        .collect();
    Some(TextElement {
        geometry,
        runs,
        bullet: None,
        border: Border::from_set(view.borders()),
    })
}

/// Whole text of the container as one run.
fn plain_text(
    tree: &SnapshotTree,
    view: &StyleView<'_>,
    options: &ExtractOptions,
) -> Option<TextElement> {
    let node = view.node();
    let keep_breaks = tree.any_descendant(node.id, |child| child.is_tag("br"));
    let text = normalize_text(&tree.text_content(node.id), keep_breaks);
    if text.is_empty() {
        return None;
    }
    let mut run = view.run(text, Color::BLACK, options);
    run.gradient_overlay = view.text_gradient();
    let bullet = list_bullet(tree, view, run.color);
    Some(TextElement {
        geometry: node.rect,
        runs: vec![run],
        bullet,
        border: Border::from_set(view.borders()),
    })
}

/// Marker of a list item, from a small leading child or a custom
/// `list-style-type`.
fn list_bullet(tree: &SnapshotTree, view: &StyleView<'_>, text_color: Color) -> Option<BulletInfo> {
    let node = view.node();
    if !node.is_tag("li") {
        return None;
    }
    let list_style = view.list_style_type();
    let custom = !matches!(list_style, "" | "none" | "disc");
    let marker = tree
        .element_children(node.id)
        .next()
        .map(StyleView::new)
        .filter(is_marker);

    if let Some(marker) = marker {
        let rect = marker.rect();
        let radius = marker.corner_radius();
        let shape = if is_round(rect, radius, CIRCLE_RADIUS_FACTOR) {
            BulletShape::Circle
        } else if radius < SQUARE_MARKER_RADIUS_PX {
            BulletShape::Square
        } else {
            BulletShape::Disc
        };
        return Some(BulletInfo {
            color: marker.visible_background().unwrap_or(text_color),
            size_px: rect.min_dimension(),
            shape,
        });
    }
    if !custom {
        return None;
    }
    let shape = if list_style.contains("square") {
        BulletShape::Square
    } else if list_style.contains("disc") {
        BulletShape::Disc
    } else {
        BulletShape::Circle
    };
    Some(BulletInfo {
        color: view
            .background_image_color()
            .filter(|color| color.is_visible())
            .unwrap_or(text_color),
        size_px: view.font_px() * BULLET_FONT_RATIO,
        shape,
    })
}

/// Small squareish filled child that is either round or square cornered.
fn is_marker(view: &StyleView<'_>) -> bool {
    let rect = view.rect();
    let radius = view.corner_radius();
    rect.at_most(SMALL_BADGE_MAX_PX)
        && rect.is_squareish(SQUARE_LOW, SQUARE_HIGH)
        && view.visible_background().is_some()
        && (rect.is_rounded_by(radius, DOT_RADIUS_FACTOR) || radius < SQUARE_MARKER_RADIUS_PX)
}
