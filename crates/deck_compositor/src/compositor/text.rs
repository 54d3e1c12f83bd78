//! Text boxes and text-bearing badges.

use super::paint::rounded_kind;
use super::{Painter, PlacedText};
use crate::report::WarningKind;
use crate::sink::{Anchor, DocumentSink, Margins, TextBody};
use crate::units::{Frame, inches, points};
use anyhow::Result as AnyResult;
use core::slice;
use deck_core::{Rect, StyledTextElement, TextAlign, TextElement, TextRun};

/// Badges no larger than this are treated as small.
const SMALL_BADGE_PX: f32 = 60.0;
/// Text this short sits in the middle of its box.
const SHORT_TEXT_CHARS: usize = 3;
/// Inner margin of text frames, in inches.
const TEXT_MARGIN_IN: f32 = 0.01;

fn short_text(content: &str) -> bool {
    content.trim().chars().count() <= SHORT_TEXT_CHARS
}

impl<S: DocumentSink + ?Sized> Painter<'_, S> {
    /// Opaque runs for the sink. Gradient overlays survive only when the
    /// sink can draw them; the solid color is always the first stop so
    /// sinks that drop the overlay still show something close.
    fn resolve_runs(&mut self, runs: &[TextRun]) -> Vec<TextRun> {
        let mut resolved = Vec::with_capacity(runs.len());
        let mut warned = false;
        for run in runs {
            let mut run = run.clone();
            match run.gradient_overlay.take() {
                Some(gradient) => {
                    run.color = self.flat(gradient.first_stop().color);
                    if self.capabilities.gradient_text {
                        run.gradient_overlay = Some(gradient.flattened(self.backdrop));
                    } else if !warned {
                        warned = true;
                        self.warn(
                            WarningKind::UnsupportedCapability,
                            "sink has no gradient text, using the first stop color".to_owned(),
                        );
                    }
                }
                None => run.color = self.flat(run.color),
            }
            resolved.push(run);
        }
        resolved
    }

    pub(super) fn text(&mut self, text: &TextElement) -> AnyResult<bool> {
        let content = text.text();
        let Some(first) = text.runs.first() else {
            return Ok(false);
        };
        if content.trim().is_empty() {
            return Ok(false);
        }
        let alignment = first.alignment;
        let font_size_pt = first.font_size_pt;

        let margin = inches(TEXT_MARGIN_IN);
        let margins = match alignment {
            TextAlign::Left => Margins {
                left: margin,
                ..Margins::default()
            },
            TextAlign::Right => Margins {
                right: margin,
                ..Margins::default()
            },
            TextAlign::Center | TextAlign::Justify => Margins::default(),
        };
        let body = TextBody {
            runs: self.resolve_runs(&text.runs),
            alignment,
            anchor: if short_text(&content) {
                Anchor::Middle
            } else {
                Anchor::Top
            },
            margins,
            bullet: text.bullet.map(|mut bullet| {
                bullet.color = self.flat(bullet.color);
                bullet
            }),
            word_wrap: true,
        };

        let id = self.sink.add_text_box(self.converter.frame(text.geometry))?;
        self.sink.set_text(id, &body)?;
        self.apply_border(id, text.geometry, text.border.as_ref(), 0.0)?;
        self.placed_text.push(PlacedText {
            rect: text.geometry,
            font_size_pt,
        });
        Ok(true)
    }

    /// Text the marker at `rect` belongs to: first a box starting just
    /// right of it on the same row, else one it vertically overlaps.
    fn bullet_partner(&self, rect: Rect) -> Option<PlacedText> {
        let same_row = self.placed_text.iter().find(|placed| {
            placed.rect.x >= rect.right() - 20.0
                && placed.rect.x <= rect.right() + 100.0
                && (placed.rect.y - rect.y).abs() < 50.0
        });
        same_row
            .or_else(|| {
                let center = rect.center_y();
                self.placed_text.iter().find(|placed| {
                    center >= placed.rect.y - 10.0
                        && center <= placed.rect.bottom() + 10.0
                        && placed.rect.x > rect.x
                })
            })
            .copied()
    }

    /// Center a bullet marker on the first line of its text.
    fn align_bullet(&self, rect: Rect, frame: &mut Frame) {
        if let Some(partner) = self.bullet_partner(rect) {
            let first_line = self.converter.y(partner.rect.y) + points(partner.font_size_pt * 0.6);
            frame.top = first_line - frame.height / 2;
        }
    }

    pub(super) fn styled_text(&mut self, badge: &StyledTextElement) -> AnyResult<bool> {
        let rect = badge.geometry;
        let small = rect.at_most(SMALL_BADGE_PX) && short_text(&badge.run.content);
        let mut frame = self.converter.frame(rect);
        if small && rect.is_rounded_by(badge.corner_radius_px, 0.8) {
            self.align_bullet(rect, &mut frame);
        }

        let id = self
            .sink
            .add_shape(rounded_kind(badge.corner_radius_px, rect), frame)?;
        self.apply_fill(id, badge.fill.as_ref())?;
        self.apply_border(id, rect, badge.border.as_ref(), badge.corner_radius_px)?;

        if badge.run.content.trim().is_empty() {
            return Ok(true);
        }
        let body = TextBody {
            alignment: if small {
                TextAlign::Center
            } else {
                badge.run.alignment
            },
            runs: self.resolve_runs(slice::from_ref(&badge.run)),
            anchor: Anchor::Middle,
            margins: Margins::uniform(inches(TEXT_MARGIN_IN)),
            bullet: None,
            word_wrap: true,
        };
        self.sink.set_text(id, &body)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_characters_count_as_short() {
        assert!(short_text(" 12 "));
        assert!(short_text("\u{2713}"));
        assert!(!short_text("Four"));
    }
}
