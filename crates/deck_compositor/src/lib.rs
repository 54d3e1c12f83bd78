//! Paint compositing: draws visual elements onto a document sink.
//!
//! [`composite`] orders elements by [`deck_core::ZLayer`], converts canvas
//! pixels to page units with a [`UnitConverter`], and degrades each element
//! through its fallback chain when the [`DocumentSink`] lacks a capability.
//! Failures stay local to one element and are collected in a
//! [`CompositeReport`].

mod compositor;
pub mod loader;
pub mod recording;
pub mod report;
pub mod sink;
pub mod units;

pub use compositor::{composite, corner_adjustment, fit_image};
pub use loader::{ImageLoader, LoadedImage, LocalImageLoader};
pub use recording::{RecordingSink, SinkOp};
pub use report::{CompositeReport, CompositeWarning, WarningKind};
pub use sink::{
    Anchor, Corners, DashStyle, DocumentSink, Margins, Outline, ShapeId, ShapeKind,
    SinkCapabilities, TextBody,
};
pub use units::{EMU_PER_INCH, EMU_PER_POINT, Emu, Frame, Point, UnitConverter};
