//! Element-by-element compositing with capability fallbacks.

mod image;
mod paint;
mod table;
mod text;

pub use image::fit_image;
pub use paint::corner_adjustment;

use crate::loader::ImageLoader;
use crate::report::{CompositeReport, CompositeWarning, WarningKind};
use crate::sink::{DocumentSink, ShapeId, ShapeKind, SinkCapabilities};
use crate::units::UnitConverter;
use anyhow::Result as AnyResult;
use core::mem;
use deck_core::{
    BackgroundElement, Color, Rect, ShapeElement, TriangleDirection, TriangleElement,
    VisualElement,
};
use log::{debug, warn};
use tracing::info_span;

/// Text box already placed on the slide, kept for aligning bullet badges.
#[derive(Debug, Clone, Copy)]
struct PlacedText {
    rect: Rect,
    font_size_pt: f32,
}

/// Per-slide compositing state.
struct Painter<'run, S: DocumentSink + ?Sized> {
    sink: &'run mut S,
    converter: &'run UnitConverter,
    loader: &'run dyn ImageLoader,
    capabilities: SinkCapabilities,
    /// Opaque color translucent paint is flattened against.
    backdrop: Color,
    /// Index of the element being drawn.
    current: usize,
    report: CompositeReport,
    placed_text: Vec<PlacedText>,
    images: Vec<(usize, ShapeId)>,
}

/// Draw `elements` onto the current slide of `sink`.
///
/// Elements are drawn in [`deck_core::ZLayer`] order, stable within a layer.
/// Images end up above everything else. An element that fails is reported
/// and skipped; it never aborts the slide.
pub fn composite<S>(
    elements: &[VisualElement],
    sink: &mut S,
    converter: &UnitConverter,
    loader: &dyn ImageLoader,
) -> CompositeReport
where
    S: DocumentSink + ?Sized,
{
    let _span = info_span!("compositor.composite", elements = elements.len()).entered();
    let backdrop = elements
        .iter()
        .find_map(|element| match element {
            VisualElement::Background(background) => background
                .color
                .filter(|color| color.is_visible())
                .map(|color| color.flatten(Color::WHITE)),
            _ => None,
        })
        .unwrap_or(Color::WHITE);

    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|index| elements[*index].layer());

    let mut painter = Painter {
        capabilities: sink.capabilities(),
        sink,
        converter,
        loader,
        backdrop,
        current: 0,
        report: CompositeReport::default(),
        placed_text: Vec::new(),
        images: Vec::new(),
    };
    for index in order {
        painter.current = index;
        let element = &elements[index];
        match painter.draw(element) {
            Ok(true) => painter.report.drawn += 1,
            Ok(false) => painter.report.dropped += 1,
            Err(error) => {
                painter.report.dropped += 1;
                painter.warn(
                    WarningKind::ElementFailed,
                    format!("{}: {error:#}", element.kind_name()),
                );
            }
        }
    }
    painter.raise_images();

    debug!(
        "composited {} elements, {} dropped, {} warnings",
        painter.report.drawn,
        painter.report.dropped,
        painter.report.warnings.len()
    );
    painter.report
}

impl<S: DocumentSink + ?Sized> Painter<'_, S> {
    fn warn(&mut self, kind: WarningKind, message: String) {
        warn!("element {}: {kind}: {message}", self.current);
        self.report.warnings.push(CompositeWarning {
            element_index: self.current,
            kind,
            message,
        });
    }

    /// Opaque version of `color` over the slide background.
    fn flat(&self, color: Color) -> Color {
        color.flatten(self.backdrop)
    }

    /// `Ok(false)` when the element was skipped without drawing anything.
    fn draw(&mut self, element: &VisualElement) -> AnyResult<bool> {
        match element {
            VisualElement::Background(background) => self.background(background),
            VisualElement::Shape(shape) => self.shape(shape, false),
            VisualElement::Circle(shape) => self.shape(shape, true),
            VisualElement::Triangle(triangle) => self.triangle(triangle),
            VisualElement::StyledText(badge) => self.styled_text(badge),
            VisualElement::Table(table) => self.table(table),
            VisualElement::Image(image) => self.image(image),
            VisualElement::Text(text) => self.text(text),
        }
    }

    /// Solid backgrounds go on the canvas itself. Gradients need a
    /// full-page rectangle behind everything else.
    fn background(&mut self, background: &BackgroundElement) -> AnyResult<bool> {
        if let Some(gradient) = &background.gradient {
            let id = self
                .sink
                .add_shape(ShapeKind::Rectangle, self.converter.page_frame())?;
            self.sink.set_no_outline(id)?;
            self.gradient_fill(id, gradient, background.color)?;
            self.sink.send_to_back(id)?;
            return Ok(true);
        }
        match background.color.filter(|color| color.is_visible()) {
            Some(color) => {
                self.sink.set_background(color.flatten(Color::WHITE))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn shape(&mut self, shape: &ShapeElement, circle: bool) -> AnyResult<bool> {
        let kind = if circle {
            ShapeKind::Oval
        } else {
            paint::rounded_kind(shape.corner_radius_px, shape.geometry)
        };
        let id = self.sink.add_shape(kind, self.converter.frame(shape.geometry))?;
        self.apply_fill(id, shape.fill.as_ref())?;
        self.apply_border(
            id,
            shape.geometry,
            shape.border.as_ref(),
            shape.corner_radius_px,
        )?;
        Ok(true)
    }

    fn triangle(&mut self, triangle: &TriangleElement) -> AnyResult<bool> {
        let rotation_deg = match triangle.direction {
            TriangleDirection::Up => 0.0,
            TriangleDirection::Right => 90.0,
            TriangleDirection::Down => 180.0,
            TriangleDirection::Left => 270.0,
        };
        let id = self.sink.add_shape(
            ShapeKind::Triangle { rotation_deg },
            self.converter.frame(triangle.geometry),
        )?;
        self.sink.set_solid_fill(id, self.flat(triangle.color))?;
        self.sink.set_no_outline(id)?;
        Ok(true)
    }

    /// Move every image above all other primitives, in drawing order.
    fn raise_images(&mut self) {
        for (index, id) in mem::take(&mut self.images) {
            if let Err(error) = self.sink.bring_to_front(id) {
                self.current = index;
                self.warn(
                    WarningKind::ElementFailed,
                    format!("could not raise image: {error:#}"),
                );
            }
        }
    }
}
