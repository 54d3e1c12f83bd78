//! Visual elements, the flat output of extraction.

use crate::border::{Border, BorderSet};
use crate::color::Color;
use crate::geometry::Rect;
use crate::gradient::Gradient;
use crate::layer::ZLayer;
use crate::text::{BulletInfo, TextAlign, TextRun};
use serde::{Deserialize, Serialize};

/// Paint for the interior of a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Fill {
    Solid(Color),
    Gradient(Gradient),
}

/// Slide-wide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundElement {
    /// Full canvas box.
    pub geometry: Rect,
    /// Solid background, already resolved to a usable color when only a
    /// gradient was present.
    pub color: Option<Color>,
    pub gradient: Option<Gradient>,
}

/// A filled and/or bordered box. Also used for circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub geometry: Rect,
    pub fill: Option<Fill>,
    pub border: Option<Border>,
    /// Top-left corner radius in pixels, 0 for square corners.
    pub corner_radius_px: f32,
}

/// Which way a triangle points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Triangle drawn with the zero-size bordered box technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleElement {
    pub geometry: Rect,
    pub direction: TriangleDirection,
    pub color: Color,
}

/// Text inside its own filled or bordered container (badge, pill, tag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTextElement {
    pub geometry: Rect,
    pub run: TextRun,
    pub fill: Option<Fill>,
    pub border: Option<Border>,
    pub corner_radius_px: f32,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub geometry: Rect,
    pub text: String,
    pub header: bool,
    pub alignment: TextAlign,
    pub font_family: String,
    pub font_size_pt: f32,
    pub bold: bool,
    pub color: Color,
    pub background: Option<Color>,
    pub borders: BorderSet,
    /// Separators drawn by decorative `::before` / `::after` marks. Only the
    /// left and right sides are ever set.
    pub separators: BorderSet,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A whole table, exploded into cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableElement {
    pub geometry: Rect,
    pub rows: Vec<TableRow>,
}

impl TableElement {
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> + '_ {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }
}

/// How an image is fitted into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Stretch to the box.
    #[default]
    Fill,
    /// Letterbox inside the box, preserving aspect ratio.
    Contain,
    /// Keep the box but correct its aspect ratio when it drifts more than
    /// 10% from the natural one.
    Preserve,
}

/// A raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub geometry: Rect,
    /// Source reference: `data:` URI, URL, or filesystem path.
    pub source: String,
    pub alt: String,
    pub natural_width: f32,
    pub natural_height: f32,
    pub fit: ImageFit,
    /// Drawn inside a circular mask (its own or its container's).
    pub circular: bool,
    pub corner_radius_px: f32,
}

/// One or more runs laid out in a single text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub geometry: Rect,
    pub runs: Vec<TextRun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<BulletInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
}

impl TextElement {
    /// Concatenated run contents.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.content.as_str()).collect()
    }
}

/// Everything the compositor knows how to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualElement {
    Background(BackgroundElement),
    Shape(ShapeElement),
    Circle(ShapeElement),
    Triangle(TriangleElement),
    StyledText(StyledTextElement),
    Table(TableElement),
    Image(ImageElement),
    Text(TextElement),
}

impl VisualElement {
    #[must_use]
    pub const fn geometry(&self) -> Rect {
        match self {
            Self::Background(element) => element.geometry,
            Self::Shape(element) | Self::Circle(element) => element.geometry,
            Self::Triangle(element) => element.geometry,
            Self::StyledText(element) => element.geometry,
            Self::Table(element) => element.geometry,
            Self::Image(element) => element.geometry,
            Self::Text(element) => element.geometry,
        }
    }

    /// Stacking group this element paints in.
    #[must_use]
    pub const fn layer(&self) -> ZLayer {
        match self {
            Self::Background(_) => ZLayer::Background,
            Self::Shape(_) | Self::Circle(_) | Self::Triangle(_) => ZLayer::Shapes,
            Self::Table(_) => ZLayer::Tables,
            Self::Text(_) => ZLayer::Text,
            Self::StyledText(_) => ZLayer::StyledText,
            Self::Image(_) => ZLayer::Images,
        }
    }

    /// Short variant name for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::Shape(_) => "shape",
            Self::Circle(_) => "circle",
            Self::Triangle(_) => "triangle",
            Self::StyledText(_) => "styled_text",
            Self::Table(_) => "table",
            Self::Image(_) => "image",
            Self::Text(_) => "text",
        }
    }
}
