//! Shared data model for the slide conversion pipeline.
//!
//! Everything here is produced once per slide by the extractor and consumed
//! once by the compositor. All types are plain data and serialize with serde
//! so an element list can be dumped and replayed.

pub mod border;
pub mod color;
pub mod element;
pub mod geometry;
pub mod gradient;
pub mod layer;
pub mod text;

pub use border::{Border, BorderSet, BorderSide, BorderStyle, Edge};
pub use color::Color;
pub use element::{
    BackgroundElement, Fill, ImageElement, ImageFit, ShapeElement, StyledTextElement,
    TableCell, TableElement, TableRow, TextElement, TriangleDirection, TriangleElement,
    VisualElement,
};
pub use geometry::Rect;
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use layer::ZLayer;
pub use text::{BulletInfo, BulletShape, TextAlign, TextRun};
