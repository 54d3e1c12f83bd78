//! Icon-font glyphs replaced by plain characters.

use super::is_rendered;
use crate::ExtractOptions;
use crate::consumed::Consumed;
use crate::view::StyleView;
use deck_core::{Color, TextAlign, TextElement, VisualElement};
use deck_snapshot::SnapshotTree;
use log::trace;
use tracing::info_span;

/// Color of icons whose own color cannot be read.
const ICON_COLOR: Color = Color::rgb(107, 92, 255);

/// Icon classes and the character drawn in their place.
const GLYPHS: [(&str, &str); 25] = [
    ("fa-plug", "\u{1F50C}"),
    ("fa-bolt", "\u{26A1}"),
    ("fa-database", "\u{1F4BE}"),
    ("fa-shield-alt", "\u{1F6E1}\u{FE0F}"),
    ("fa-shield", "\u{1F6E1}\u{FE0F}"),
    ("fa-check", "\u{2713}"),
    ("fa-check-circle", "\u{2713}"),
    ("fa-times", "\u{2717}"),
    ("fa-arrow-right", "\u{2192}"),
    ("fa-arrow-left", "\u{2190}"),
    ("fa-arrow-up", "\u{2191}"),
    ("fa-arrow-down", "\u{2193}"),
    ("fa-star", "\u{2B50}"),
    ("fa-heart", "\u{2764}\u{FE0F}"),
    ("fa-user", "\u{1F464}"),
    ("fa-users", "\u{1F465}"),
    ("fa-home", "\u{1F3E0}"),
    ("fa-envelope", "\u{2709}\u{FE0F}"),
    ("fa-phone", "\u{1F4DE}"),
    ("fa-calendar", "\u{1F4C5}"),
    ("fa-clock", "\u{1F550}"),
    ("fa-search", "\u{1F50D}"),
    ("fa-settings", "\u{2699}\u{FE0F}"),
    ("fa-cog", "\u{2699}\u{FE0F}"),
    ("fa-gear", "\u{2699}\u{FE0F}"),
];

/// Replacement character for the first class with one.
fn glyph_for<'class, I>(classes: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'class str>,
{
    classes.into_iter().find_map(|class| {
        GLYPHS
            .iter()
            .find(|(name, _)| *name == class)
            .map(|(_, glyph)| *glyph)
    })
}

pub(super) fn extract(
    tree: &SnapshotTree,
    options: &ExtractOptions,
    consumed: &mut Consumed,
    out: &mut Vec<VisualElement>,
) {
    let _span = info_span!("extract.icons").entered();
    for id in tree.preorder() {
        let Some(node) = tree.node(id).filter(|node| node.is_tag("i")) else {
            continue;
        };
        if !is_rendered(node) || consumed.in_table(id) || consumed.is_badge(id) {
            continue;
        }
        let Some(glyph) = glyph_for(node.classes.iter().map(String::as_str)) else {
            continue;
        };
        let mut run = StyleView::new(node).run(glyph.to_owned(), ICON_COLOR, options);
        run.font_family.clone_from(&options.default_font_family);
        run.alignment = TextAlign::Center;
        trace!("icon {id:?} as {glyph}");
        consumed.mark_text_subtree(tree, id);
        out.push(VisualElement::Text(TextElement {
            geometry: node.rect,
            runs: vec![run],
            bullet: None,
            border: None,
        }));
    }
}
