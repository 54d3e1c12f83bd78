//! Fills, outlines and decomposed per-side borders.

use super::Painter;
use crate::report::WarningKind;
use crate::sink::{Corners, DashStyle, DocumentSink, Outline, ShapeId, ShapeKind};
use anyhow::Result as AnyResult;
use deck_core::{Border, BorderSet, BorderSide, Color, Edge, Fill, Gradient, Rect};

/// Corner size for a rounded rectangle, as a fraction of half the shorter
/// side, clamped to `[0, 1]`.
///
/// Degenerate boxes get a small fixed rounding.
#[must_use]
pub fn corner_adjustment(radius_px: f32, min_dimension_px: f32) -> f32 {
    if min_dimension_px <= 0.0 {
        return 0.1;
    }
    (radius_px / min_dimension_px * 2.0).clamp(0.0, 1.0)
}

/// Plain or fully rounded rectangle for `rect` with corner `radius`.
pub(super) fn rounded_kind(radius: f32, rect: Rect) -> ShapeKind {
    if radius > 0.0 {
        ShapeKind::RoundedRectangle {
            adjustment: corner_adjustment(radius, rect.min_dimension()),
        }
    } else {
        ShapeKind::Rectangle
    }
}

/// Thin box along `edge` of `rect`, as thick as `width_px`.
fn strip(rect: Rect, edge: Edge, width_px: f32) -> Rect {
    let thickness = width_px.min(rect.width).min(rect.height);
    match edge {
        Edge::Top => Rect::new(rect.x, rect.y, rect.width, thickness),
        Edge::Bottom => Rect::new(rect.x, rect.bottom() - thickness, rect.width, thickness),
        Edge::Left => Rect::new(rect.x, rect.y, thickness, rect.height),
        Edge::Right => Rect::new(rect.right() - thickness, rect.y, thickness, rect.height),
    }
}

const fn edge_corners(edge: Edge) -> Corners {
    match edge {
        Edge::Top => Corners::TOP,
        Edge::Bottom => Corners::BOTTOM,
        Edge::Left => Corners::LEFT,
        Edge::Right => Corners::RIGHT,
    }
}

impl<S: DocumentSink + ?Sized> Painter<'_, S> {
    pub(super) fn apply_fill(&mut self, id: ShapeId, fill: Option<&Fill>) -> AnyResult<()> {
        match fill {
            Some(Fill::Gradient(gradient)) => self.gradient_fill(id, gradient, None),
            Some(Fill::Solid(color)) if color.is_visible() => {
                self.sink.set_solid_fill(id, self.flat(*color))
            }
            _ => self.sink.set_no_fill(id),
        }
    }

    /// Gradient fill, degrading to a solid color when the sink cannot or
    /// will not draw it. The solid color is `fallback` when visible, else
    /// the first stop.
    pub(super) fn gradient_fill(
        &mut self,
        id: ShapeId,
        gradient: &Gradient,
        fallback: Option<Color>,
    ) -> AnyResult<()> {
        if self.capabilities.gradient_fill {
            let flattened = gradient.flattened(self.backdrop);
            match self.sink.set_gradient_fill(id, &flattened) {
                Ok(()) => return Ok(()),
                Err(error) => self.warn(
                    WarningKind::UnsupportedCapability,
                    format!("gradient fill rejected, using a solid color: {error:#}"),
                ),
            }
        } else {
            self.warn(
                WarningKind::UnsupportedCapability,
                "sink has no gradient fills, using a solid color".to_owned(),
            );
        }
        let color = fallback
            .filter(|color| color.is_visible())
            .unwrap_or_else(|| gradient.first_stop().color);
        self.sink.set_solid_fill(id, self.flat(color))
    }

    pub(super) fn outline(&self, side: BorderSide) -> Outline {
        Outline {
            color: self.flat(side.color),
            width_pt: self.converter.length_pt(side.width_px),
            dash: DashStyle::from(side.style),
        }
    }

    /// Outline `id`, or draw separate strips when the sides differ.
    pub(super) fn apply_border(
        &mut self,
        id: ShapeId,
        rect: Rect,
        border: Option<&Border>,
        radius: f32,
    ) -> AnyResult<()> {
        match border {
            Some(Border::Uniform(side)) if side.color.is_visible() && side.width_px > 0.0 => {
                self.sink.set_outline(id, self.outline(*side))
            }
            Some(Border::PerSide(set)) => {
                if let Some(side) = set.uniform() {
                    return self.apply_border(id, rect, Some(&Border::Uniform(side)), radius);
                }
                self.sink.set_no_outline(id)?;
                self.border_strips(rect, set, radius)
            }
            _ => self.sink.set_no_outline(id),
        }
    }

    fn border_strips(&mut self, rect: Rect, set: &BorderSet, radius: f32) -> AnyResult<()> {
        let mut warned = false;
        for (edge, side) in set.sides() {
            if !side.color.is_visible() || side.width_px <= 0.0 {
                continue;
            }
            let bounds = strip(rect, edge, side.width_px);
            let kind = if radius <= 0.0 {
                ShapeKind::Rectangle
            } else if self.capabilities.per_corner_rounding {
                ShapeKind::PartiallyRounded {
                    adjustment: corner_adjustment(radius, bounds.min_dimension()),
                    corners: edge_corners(edge),
                }
            } else {
                if !warned {
                    warned = true;
                    self.warn(
                        WarningKind::UnsupportedCapability,
                        "sink cannot round single corners, border strips rounded fully"
                            .to_owned(),
                    );
                }
                rounded_kind(radius, bounds)
            };
            let id = self.sink.add_shape(kind, self.converter.frame(bounds))?;
            self.sink.set_solid_fill(id, self.flat(side.color))?;
            self.sink.set_no_outline(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_is_clamped() {
        assert_eq!(corner_adjustment(10.0, 40.0), 0.5);
        assert_eq!(corner_adjustment(50.0, 40.0), 1.0);
        assert_eq!(corner_adjustment(5.0, 0.0), 0.1);
    }

    #[test]
    fn strips_hug_their_edge() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(strip(rect, Edge::Top, 4.0), Rect::new(10.0, 20.0, 100.0, 4.0));
        assert_eq!(strip(rect, Edge::Bottom, 4.0), Rect::new(10.0, 66.0, 100.0, 4.0));
        assert_eq!(strip(rect, Edge::Right, 3.0), Rect::new(107.0, 20.0, 3.0, 50.0));
    }

    #[test]
    fn square_corners_stay_plain() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert_eq!(rounded_kind(0.0, rect), ShapeKind::Rectangle);
        assert_eq!(
            rounded_kind(5.0, rect),
            ShapeKind::RoundedRectangle { adjustment: 0.5 }
        );
    }
}
