//! The document-building collaborator the compositor draws into.

use crate::loader::LoadedImage;
use crate::units::{Emu, Frame, Point};
use anyhow::Result as AnyResult;
use deck_core::{BorderStyle, BulletInfo, Color, Gradient, TableElement, TextAlign, TextRun};
use serde::{Deserialize, Serialize};

/// Handle of a drawn primitive, unique within one sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u32);

/// Which corners of a rectangle are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl Corners {
    pub const TOP: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: false,
        bottom_left: false,
    };
    pub const BOTTOM: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: true,
        bottom_left: true,
    };
    pub const LEFT: Self = Self {
        top_left: true,
        top_right: false,
        bottom_right: false,
        bottom_left: true,
    };
    pub const RIGHT: Self = Self {
        top_left: false,
        top_right: true,
        bottom_right: true,
        bottom_left: false,
    };
}

/// Preset geometry of an autoshape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    /// All four corners rounded. `adjustment` is the corner size as a
    /// fraction of half the shorter side, in `[0, 1]`.
    RoundedRectangle { adjustment: f32 },
    /// Only `corners` rounded. Needs [`SinkCapabilities::per_corner_rounding`].
    PartiallyRounded { adjustment: f32, corners: Corners },
    Oval,
    /// Isosceles triangle pointing up before rotation.
    Triangle { rotation_deg: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    RoundDot,
}

impl From<BorderStyle> for DashStyle {
    fn from(style: BorderStyle) -> Self {
        match style {
            BorderStyle::Solid => Self::Solid,
            BorderStyle::Dashed => Self::Dash,
            BorderStyle::Dotted => Self::RoundDot,
        }
    }
}

/// Stroke of a shape outline or connector. Colors are opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color,
    pub width_pt: f32,
    pub dash: DashStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Top,
    Middle,
}

/// Inner text margins of a text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: Emu,
    pub right: Emu,
    pub top: Emu,
    pub bottom: Emu,
}

impl Margins {
    #[inline]
    #[must_use]
    pub const fn uniform(value: Emu) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

/// Content and layout of one text frame. Run colors are opaque; a run keeps
/// its gradient overlay only when the sink supports gradient text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBody {
    pub runs: Vec<TextRun>,
    pub alignment: TextAlign,
    pub anchor: Anchor,
    pub margins: Margins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<BulletInfo>,
    pub word_wrap: bool,
}

/// What a sink can do natively. Everything else is approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkCapabilities {
    pub gradient_fill: bool,
    pub gradient_text: bool,
    pub per_corner_rounding: bool,
    pub image_clipping: bool,
    pub native_tables: bool,
}

impl Default for SinkCapabilities {
    fn default() -> Self {
        Self {
            gradient_fill: true,
            gradient_text: false,
            per_corner_rounding: false,
            image_clipping: false,
            native_tables: false,
        }
    }
}

impl SinkCapabilities {
    /// Everything supported.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            gradient_fill: true,
            gradient_text: true,
            per_corner_rounding: true,
            image_clipping: true,
            native_tables: true,
        }
    }

    /// Solid fills, plain text, rectangles and pictures only.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            gradient_fill: false,
            gradient_text: false,
            per_corner_rounding: false,
            image_clipping: false,
            native_tables: false,
        }
    }
}

/// Primitive drawing operations of an output document.
///
/// Later primitives draw on top of earlier ones unless reordered with
/// [`DocumentSink::send_to_back`] or [`DocumentSink::bring_to_front`].
/// Every operation may fail; the compositor treats a failure as local to the
/// element being drawn.
pub trait DocumentSink {
    fn capabilities(&self) -> SinkCapabilities;

    /// Start a new, empty slide. Later calls draw onto it.
    ///
    /// # Errors
    /// Returns an error if the document cannot take another slide.
    fn begin_slide(&mut self) -> AnyResult<()>;

    /// Solid canvas background of the current slide.
    ///
    /// # Errors
    /// Returns an error if the background cannot be set.
    fn set_background(&mut self, color: Color) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if the shape cannot be created.
    fn add_shape(&mut self, kind: ShapeKind, frame: Frame) -> AnyResult<ShapeId>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn set_solid_fill(&mut self, shape: ShapeId, color: Color) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if `shape` is unknown or gradients are rejected.
    fn set_gradient_fill(&mut self, shape: ShapeId, gradient: &Gradient) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn set_no_fill(&mut self, shape: ShapeId) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn set_outline(&mut self, shape: ShapeId, outline: Outline) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn set_no_outline(&mut self, shape: ShapeId) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if the text box cannot be created.
    fn add_text_box(&mut self, frame: Frame) -> AnyResult<ShapeId>;

    /// Replace the text of a text box or autoshape.
    ///
    /// # Errors
    /// Returns an error if `shape` is unknown or cannot hold text.
    fn set_text(&mut self, shape: ShapeId, body: &TextBody) -> AnyResult<()>;

    /// Straight connector between two points.
    ///
    /// # Errors
    /// Returns an error if the line cannot be created.
    fn add_line(&mut self, from: Point, to: Point, outline: Outline) -> AnyResult<ShapeId>;

    /// Native table. Only called when [`SinkCapabilities::native_tables`]
    /// is set.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    fn add_table(&mut self, frame: Frame, table: &TableElement) -> AnyResult<ShapeId>;

    /// Picture stretched to `frame`, clipped to an ellipse when
    /// `clip_circle` is set.
    ///
    /// # Errors
    /// Returns an error if the picture cannot be embedded.
    fn add_image(
        &mut self,
        frame: Frame,
        image: &LoadedImage,
        clip_circle: bool,
    ) -> AnyResult<ShapeId>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn send_to_back(&mut self, shape: ShapeId) -> AnyResult<()>;

    /// # Errors
    /// Returns an error if `shape` is unknown.
    fn bring_to_front(&mut self, shape: ShapeId) -> AnyResult<()>;
}
