//! Text runs and list bullets.

use crate::color::Color;
use crate::gradient::Gradient;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A span of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    pub font_family: String,
    pub font_size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub alignment: TextAlign,
    /// Gradient painted through the glyphs, when the source clipped a
    /// background gradient to its text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_overlay: Option<Gradient>,
}

impl TextRun {
    /// Number of characters in the run.
    #[inline]
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Marker drawn in front of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletShape {
    #[default]
    Circle,
    Square,
    Disc,
}

/// Leading list marker extracted from a list item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletInfo {
    pub color: Color,
    pub size_px: f32,
    pub shape: BulletShape,
}
