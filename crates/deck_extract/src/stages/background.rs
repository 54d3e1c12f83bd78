//! Slide background from the body and near full-canvas children.

use crate::view::StyleView;
use deck_core::{BackgroundElement, Color, Rect, VisualElement};
use deck_snapshot::{SnapshotNode, SnapshotTree};
use log::debug;
use tracing::info_span;

/// Children covering at least this share of both body dimensions count as
/// background layers.
const COVER_RATIO: f32 = 0.8;

pub(super) fn extract(tree: &SnapshotTree, out: &mut Vec<VisualElement>) {
    let _span = info_span!("extract.background").entered();
    let body = tree.body();
    let canvas = body.rect;
    let body_view = StyleView::new(body);
    let mut color = body_view.background_color();
    let hint = color.filter(|value| value.is_visible());
    let mut gradient = body_view.background_gradient(hint);

    let covering: Vec<&SnapshotNode> = tree
        .element_children(body.id)
        .filter(|child| {
            !child.is_hidden()
                && child.rect.width >= canvas.width * COVER_RATIO
                && child.rect.height >= canvas.height * COVER_RATIO
        })
        .collect();

    for child in &covering {
        let view = StyleView::new(child);
        let blend = view.visible_background().or(hint);
        if let Some(found) = view.background_gradient(blend) {
            gradient = Some(found);
            break;
        }
    }
    if let Some(child_color) = covering
        .iter()
        .find_map(|child| StyleView::new(child).visible_background())
    {
        color = Some(child_color);
    }

    let color = color
        .filter(|value| value.is_visible())
        .or_else(|| gradient.as_ref().map(|found| found.darkest_stop().color));
    if color.is_none() && gradient.is_none() {
        return;
    }
    debug!(
        "background color {:?}, gradient {}",
        color.map(Color::to_hex),
        gradient.is_some()
    );
    out.push(VisualElement::Background(BackgroundElement {
        geometry: Rect::new(0.0, 0.0, canvas.width, canvas.height),
        color,
        gradient,
    }));
}
