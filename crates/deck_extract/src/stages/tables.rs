//! Tables, exploded into per-cell records.

use super::{collapse_whitespace, is_rendered};
use crate::ExtractOptions;
use crate::consumed::Consumed;
use crate::view::StyleView;
use deck_core::{
    BorderSet, BorderSide, BorderStyle, Color, Edge, TableCell, TableElement, TableRow,
    VisualElement,
};
use deck_snapshot::{Pseudo, RawStyle, SnapshotNode, SnapshotTree};
use deck_style::{first_color_in, parse_color, parse_px};
use log::debug;
use tracing::info_span;

/// Separator color when a decorative mark names none.
const SEPARATOR_GRAY: Color = Color::rgb(176, 176, 176);
const DEFAULT_SEPARATOR_PX: f32 = 2.0;

pub(super) fn extract(
    tree: &SnapshotTree,
    options: &ExtractOptions,
    consumed: &mut Consumed,
    out: &mut Vec<VisualElement>,
) {
    let _span = info_span!("extract.tables").entered();
    for id in tree.preorder() {
        let Some(table) = tree.node(id).filter(|node| node.is_tag("table")) else {
            continue;
        };
        if consumed.in_table(id) || !is_rendered(table) {
            continue;
        }
        let rows: Vec<TableRow> = tree
            .descendants(id)
            .into_iter()
            .filter_map(|row_id| tree.node(row_id))
            .filter(|row| row.is_tag("tr"))
            .map(|row| TableRow {
                cells: tree
                    .element_children(row.id)
                    .filter(|cell| cell.is_any_tag(&["th", "td"]))
                    .map(|cell| table_cell(tree, cell, options))
                    .collect(),
            })
            .filter(|row| !row.cells.is_empty())
            .collect();
        consumed.mark_table(tree, id);
        if rows.is_empty() {
            continue;
        }
        debug!("table {id:?} with {} rows", rows.len());
        out.push(VisualElement::Table(TableElement {
            geometry: table.rect,
            rows,
        }));
    }
}

fn table_cell(tree: &SnapshotTree, cell: &SnapshotNode, options: &ExtractOptions) -> TableCell {
    let view = StyleView::new(cell);
    let run = view.run(String::new(), Color::BLACK, options);
    let mut separators = BorderSet::default();
    separators.set(Edge::Left, pseudo_separator(cell.pseudo(Pseudo::Before)));
    separators.set(Edge::Right, pseudo_separator(cell.pseudo(Pseudo::After)));
    TableCell {
        geometry: cell.rect,
        text: collapse_whitespace(&tree.text_content(cell.id)),
        header: cell.is_tag("th"),
        alignment: run.alignment,
        font_family: run.font_family,
        font_size_pt: run.font_size_pt,
        bold: run.bold,
        color: run.color,
        background: view.visible_background(),
        borders: view.borders(),
        separators,
    }
}

/// Dotted separator drawn by a `::before`/`::after` mark with content.
/// An explicit zero width disables it; an unreadable width means 2px.
fn pseudo_separator(style: Option<&RawStyle>) -> Option<BorderSide> {
    let style = style?;
    let prop = |name: &str| style.get(name).map_or("", String::as_str);
    let content = prop("content").trim();
    if content.is_empty() || content == "none" {
        return None;
    }
    let width_px = match parse_px(prop("width")) {
        Some(width) if width > 0.0 => width,
        Some(_) => return None,
        None => DEFAULT_SEPARATOR_PX,
    };
    let color = parse_color(prop("background-color"), None)
        .filter(|color| color.is_visible())
        .or_else(|| {
            first_color_in(prop("background-image"))
                .and_then(|literal| parse_color(literal, None))
                .filter(|color| color.is_visible())
        })
        .unwrap_or(SEPARATOR_GRAY);
    Some(BorderSide::new(color, width_px, BorderStyle::Dotted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn mark(pairs: &[(&str, &str)]) -> RawStyle {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn separator_needs_content_and_width() {
        assert_eq!(pseudo_separator(Some(&mark(&[("content", "none"), ("width", "2px")]))), None);
        assert_eq!(pseudo_separator(Some(&mark(&[("content", "\"\""), ("width", "0px")]))), None);
        assert_eq!(pseudo_separator(None), None);
        let auto = pseudo_separator(Some(&mark(&[("content", "\"|\""), ("width", "auto")])))
            .expect("separator");
        assert_eq!(auto.width_px, DEFAULT_SEPARATOR_PX);
    }

    #[test]
    fn separator_color_falls_back_to_gradient_then_gray() {
        let from_gradient = pseudo_separator(Some(&mark(&[
            ("content", "\"\""),
            ("width", "1px"),
            ("background-color", "rgba(0, 0, 0, 0)"),
            ("background-image", "linear-gradient(rgb(10, 20, 30), transparent)"),
        ])))
        .expect("separator");
        assert_eq!(from_gradient.color, Color::rgb(10, 20, 30));
        assert_eq!(from_gradient.style, BorderStyle::Dotted);

        let gray = pseudo_separator(Some(&mark(&[("content", "\"\""), ("width", "3px")])))
            .expect("separator");
        assert_eq!(gray.color, SEPARATOR_GRAY);
        assert_eq!(gray.width_px, 3.0);
    }
}
