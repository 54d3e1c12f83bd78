//! Raster images, including ones masked by a round container.

use super::is_rendered;
use crate::classify::{CIRCLE_RADIUS_FACTOR, is_round};
use crate::consumed::Consumed;
use crate::view::StyleView;
use deck_core::{ImageElement, ImageFit, VisualElement};
use deck_snapshot::{SnapshotNode, SnapshotTree};
use log::trace;
use tracing::info_span;

pub(super) fn extract(tree: &SnapshotTree, consumed: &Consumed, out: &mut Vec<VisualElement>) {
    let _span = info_span!("extract.images").entered();
    for id in tree.preorder() {
        let Some(node) = tree.node(id).filter(|node| node.is_tag("img")) else {
            continue;
        };
        let Some(info) = node.image.as_ref().filter(|info| !info.src.trim().is_empty()) else {
            continue;
        };
        if consumed.in_table(id) || consumed.is_badge(id) || !is_rendered(node) {
            continue;
        }
        let own = StyleView::new(node);
        let (circular, corner_radius_px) = match round_parent(tree, node) {
            Some(radius) => (true, radius),
            None => {
                let radius = own.corner_radius();
                (is_round(node.rect, radius, CIRCLE_RADIUS_FACTOR), radius)
            }
        };
        trace!("image {id:?} circular={circular}");
        out.push(VisualElement::Image(ImageElement {
            geometry: node.rect,
            source: info.src.trim().to_owned(),
            alt: info.alt.clone(),
            natural_width: positive_or(info.natural_width, node.rect.width),
            natural_height: positive_or(info.natural_height, node.rect.height),
            fit: object_fit(node.prop("object-fit")),
            circular,
            corner_radius_px,
        }));
    }
}

/// Radius of the parent when it is a circular frame around the image.
fn round_parent(tree: &SnapshotTree, node: &SnapshotNode) -> Option<f32> {
    let parent = tree.node(node.parent?)?;
    let radius = StyleView::new(parent).corner_radius();
    is_round(parent.rect, radius, CIRCLE_RADIUS_FACTOR).then_some(radius)
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 { value } else { fallback }
}

fn object_fit(raw: &str) -> ImageFit {
    match raw.trim() {
        "" | "fill" => ImageFit::Fill,
        "contain" => ImageFit::Contain,
        _ => ImageFit::Preserve,
    }
}
