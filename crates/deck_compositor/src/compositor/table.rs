//! Tables, either handed to the sink whole or drawn cell by cell.

use super::Painter;
use crate::sink::{Anchor, DocumentSink, Margins, ShapeKind, TextBody};
use crate::units::inches;
use anyhow::Result as AnyResult;
use deck_core::{BorderSet, Edge, Rect, TableCell, TableElement, TextRun};

/// Horizontal cell padding, in inches.
const CELL_SIDE_MARGIN_IN: f32 = 0.05;
const HEADER_VERTICAL_MARGIN_IN: f32 = 0.03;
const BODY_VERTICAL_MARGIN_IN: f32 = 0.02;

/// End points of `edge` of `rect`, in canvas pixels.
fn edge_line(rect: Rect, edge: Edge) -> ((f32, f32), (f32, f32)) {
    match edge {
        Edge::Top => ((rect.x, rect.y), (rect.right(), rect.y)),
        Edge::Bottom => ((rect.x, rect.bottom()), (rect.right(), rect.bottom())),
        Edge::Left => ((rect.x, rect.y), (rect.x, rect.bottom())),
        Edge::Right => ((rect.right(), rect.y), (rect.right(), rect.bottom())),
    }
}

fn cell_margins(header: bool) -> Margins {
    let vertical = inches(if header {
        HEADER_VERTICAL_MARGIN_IN
    } else {
        BODY_VERTICAL_MARGIN_IN
    });
    Margins {
        left: inches(CELL_SIDE_MARGIN_IN),
        right: inches(CELL_SIDE_MARGIN_IN),
        top: vertical,
        bottom: vertical,
    }
}

impl<S: DocumentSink + ?Sized> Painter<'_, S> {
    pub(super) fn table(&mut self, table: &TableElement) -> AnyResult<bool> {
        if table.rows.is_empty() {
            return Ok(false);
        }
        if self.capabilities.native_tables {
            let flattened = self.flatten_table(table);
            self.sink
                .add_table(self.converter.frame(table.geometry), &flattened)?;
            return Ok(true);
        }
        for cell in table.cells() {
            self.table_cell(cell)?;
        }
        Ok(true)
    }

    /// Copy of `table` with every cell color made opaque.
    fn flatten_table(&self, table: &TableElement) -> TableElement {
        let mut flattened = table.clone();
        for row in &mut flattened.rows {
            for cell in &mut row.cells {
                cell.color = self.flat(cell.color);
                cell.background = cell
                    .background
                    .filter(|color| color.is_visible())
                    .map(|color| self.flat(color));
                for set in [&mut cell.borders, &mut cell.separators] {
                    for edge in Edge::ALL {
                        let side = set.get(edge).map(|mut side| {
                            side.color = self.flat(side.color);
                            side
                        });
                        set.set(edge, side);
                    }
                }
            }
        }
        flattened
    }

    fn table_cell(&mut self, cell: &TableCell) -> AnyResult<()> {
        if let Some(background) = cell.background.filter(|color| color.is_visible()) {
            let id = self
                .sink
                .add_shape(ShapeKind::Rectangle, self.converter.frame(cell.geometry))?;
            self.sink.set_solid_fill(id, self.flat(background))?;
            self.sink.set_no_outline(id)?;
        }
        self.edge_lines(cell.geometry, &cell.borders)?;
        self.edge_lines(cell.geometry, &cell.separators)?;

        if cell.text.trim().is_empty() {
            return Ok(());
        }
        let body = TextBody {
            runs: vec![TextRun {
                content: cell.text.clone(),
                font_family: cell.font_family.clone(),
                font_size_pt: cell.font_size_pt,
                bold: cell.bold || cell.header,
                italic: false,
                color: self.flat(cell.color),
                alignment: cell.alignment,
                gradient_overlay: None,
            }],
            alignment: cell.alignment,
            anchor: Anchor::Middle,
            margins: cell_margins(cell.header),
            bullet: None,
            word_wrap: true,
        };
        let id = self.sink.add_text_box(self.converter.frame(cell.geometry))?;
        self.sink.set_text(id, &body)
    }

    fn edge_lines(&mut self, rect: Rect, set: &BorderSet) -> AnyResult<()> {
        for (edge, side) in set.sides() {
            if !side.color.is_visible() || side.width_px <= 0.0 {
                continue;
            }
            let ((from_x, from_y), (to_x, to_y)) = edge_line(rect, edge);
            let from = self.converter.point(from_x, from_y);
            let to = self.converter.point(to_x, to_y);
            self.sink.add_line(from, to, self.outline(side))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_cell_edges() {
        let cell = Rect::new(10.0, 20.0, 100.0, 30.0);
        assert_eq!(edge_line(cell, Edge::Right), ((110.0, 20.0), (110.0, 50.0)));
        assert_eq!(edge_line(cell, Edge::Bottom), ((10.0, 50.0), (110.0, 50.0)));
    }

    #[test]
    fn header_cells_get_more_vertical_room() {
        assert!(cell_margins(true).top > cell_margins(false).top);
        assert_eq!(cell_margins(false).left, inches(CELL_SIDE_MARGIN_IN));
    }
}
