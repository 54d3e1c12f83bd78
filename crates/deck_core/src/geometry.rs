//! Axis-aligned boxes in virtual canvas pixels.

use serde::{Deserialize, Serialize};

/// Rectangle with its origin at the top-left, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the box has no paintable area. Such boxes are never emitted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    #[must_use]
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Width over height, `None` for zero-height boxes.
    #[inline]
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    /// Aspect ratio within `[low, high]`.
    #[must_use]
    pub fn is_squareish(&self, low: f32, high: f32) -> bool {
        self.aspect_ratio()
            .is_some_and(|ratio| (low..=high).contains(&ratio))
    }

    /// True when a corner radius makes this box read as a circle or dot:
    /// `radius >= factor * min(width, height) / 2`.
    #[must_use]
    pub fn is_rounded_by(&self, radius: f32, factor: f32) -> bool {
        radius >= factor * self.min_dimension() / 2.0
    }

    /// Horizontal span from this box's left edge to `other`'s right edge,
    /// with the height of the taller box.
    #[must_use]
    pub fn span_to(&self, other: &Self) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: other.right() - self.x,
            height: self.height.max(other.height),
        }
    }

    /// True when both dimensions are at least `min_px`.
    #[inline]
    #[must_use]
    pub fn at_least(&self, min_px: f32) -> bool {
        self.width >= min_px && self.height >= min_px
    }

    /// True when neither dimension exceeds `max_px`.
    #[inline]
    #[must_use]
    pub fn at_most(&self, max_px: f32) -> bool {
        self.width <= max_px && self.height <= max_px
    }
}
