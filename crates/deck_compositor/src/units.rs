//! Canvas pixels to page units (EMU).

use deck_core::Rect;
use serde::{Deserialize, Serialize};

/// English Metric Units, the integer page unit of the output document.
pub type Emu = i64;

pub const EMU_PER_INCH: Emu = 914_400;
pub const EMU_PER_POINT: Emu = 12_700;

/// A box on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Frame {
    #[inline]
    #[must_use]
    pub const fn new(left: Emu, top: Emu, width: Emu, height: Emu) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn right(&self) -> Emu {
        self.left + self.width
    }

    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> Emu {
        self.top + self.height
    }
}

/// A point on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: Emu,
    pub y: Emu,
}

/// Maps the virtual canvas onto the physical page. X and Y scale
/// independently, so a canvas whose aspect ratio differs from the page's
/// is stretched rather than letterboxed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConverter {
    canvas_width_px: f32,
    canvas_height_px: f32,
    page_width_in: f32,
    page_height_in: f32,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 19.2, 10.8)
    }
}

impl UnitConverter {
    /// Non-positive or non-finite dimensions fall back to the defaults of
    /// the affected axis.
    #[must_use]
    pub fn new(
        canvas_width_px: f32,
        canvas_height_px: f32,
        page_width_in: f32,
        page_height_in: f32,
    ) -> Self {
        let usable = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            canvas_width_px: usable(canvas_width_px, 1920.0),
            canvas_height_px: usable(canvas_height_px, 1080.0),
            page_width_in: usable(page_width_in, 19.2),
            page_height_in: usable(page_height_in, 10.8),
        }
    }

    fn emu_per_px_x(&self) -> f64 {
        f64::from(self.page_width_in) * EMU_PER_INCH as f64 / f64::from(self.canvas_width_px)
    }

    fn emu_per_px_y(&self) -> f64 {
        f64::from(self.page_height_in) * EMU_PER_INCH as f64 / f64::from(self.canvas_height_px)
    }

    /// Horizontal position or length.
    #[must_use]
    pub fn x(&self, px: f32) -> Emu {
        (f64::from(px) * self.emu_per_px_x()).round() as Emu
    }

    /// Vertical position or length.
    #[must_use]
    pub fn y(&self, px: f32) -> Emu {
        (f64::from(px) * self.emu_per_px_y()).round() as Emu
    }

    #[must_use]
    pub fn frame(&self, rect: Rect) -> Frame {
        Frame::new(
            self.x(rect.x),
            self.y(rect.y),
            self.x(rect.width),
            self.y(rect.height),
        )
    }

    #[must_use]
    pub fn point(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.x(x),
            y: self.y(y),
        }
    }

    /// A canvas length as a stroke width in points, using the horizontal
    /// scale.
    #[must_use]
    pub fn length_pt(&self, px: f32) -> f32 {
        px * self.page_width_in * 72.0 / self.canvas_width_px
    }

    /// The whole page.
    #[must_use]
    pub fn page_frame(&self) -> Frame {
        Frame::new(
            0,
            0,
            inches(self.page_width_in),
            inches(self.page_height_in),
        )
    }
}

/// Inches to EMU.
#[must_use]
pub fn inches(value: f32) -> Emu {
    (f64::from(value) * EMU_PER_INCH as f64).round() as Emu
}

/// Points to EMU.
#[must_use]
pub fn points(value: f32) -> Emu {
    (f64::from(value) * EMU_PER_POINT as f64).round() as Emu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_maps_one_px_to_a_hundredth_inch() {
        let converter = UnitConverter::default();
        assert_eq!(converter.x(100.0), EMU_PER_INCH);
        assert_eq!(converter.y(1080.0), inches(10.8));
        assert_eq!(converter.frame(Rect::new(0.0, 0.0, 1920.0, 1080.0)), converter.page_frame());
    }

    #[test]
    fn axes_scale_independently() {
        let converter = UnitConverter::new(1000.0, 1000.0, 20.0, 10.0);
        assert_eq!(converter.x(500.0), inches(10.0));
        assert_eq!(converter.y(500.0), inches(5.0));
    }

    #[test]
    fn bad_dimensions_fall_back() {
        let converter = UnitConverter::new(0.0, f32::NAN, -1.0, 10.8);
        assert_eq!(converter, UnitConverter::default());
        assert_eq!(points(1.0), EMU_PER_POINT);
    }
}
