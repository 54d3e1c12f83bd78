//! In-memory sink that records every primitive in draw order.

use crate::loader::LoadedImage;
use crate::sink::{DocumentSink, Outline, ShapeId, ShapeKind, SinkCapabilities, TextBody};
use crate::units::{Frame, Point};
use anyhow::{Result as AnyResult, anyhow, bail};
use deck_core::{Color, Gradient, TableElement};
use log::trace;
use serde::Serialize;

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkOp {
    BeginSlide { slide: usize },
    SetBackground { color: Color },
    AddShape { id: ShapeId, kind: ShapeKind, frame: Frame },
    SolidFill { id: ShapeId, color: Color },
    GradientFill { id: ShapeId, gradient: Gradient },
    NoFill { id: ShapeId },
    Outline { id: ShapeId, outline: Outline },
    NoOutline { id: ShapeId },
    AddTextBox { id: ShapeId, frame: Frame },
    SetText { id: ShapeId, body: TextBody },
    AddLine { id: ShapeId, from: Point, to: Point, outline: Outline },
    AddTable { id: ShapeId, frame: Frame, rows: usize, columns: usize },
    AddImage {
        id: ShapeId,
        frame: Frame,
        byte_len: usize,
        width_px: u32,
        height_px: u32,
        clip_circle: bool,
    },
    SendToBack { id: ShapeId },
    BringToFront { id: ShapeId },
}

#[derive(Debug, Clone, Default, Serialize)]
struct RecordedSlide {
    ops: Vec<SinkOp>,
    /// Shapes back to front.
    z_order: Vec<ShapeId>,
}

/// Records calls instead of producing a file. Used by tests and to dump a
/// composited deck as JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingSink {
    capabilities: SinkCapabilities,
    reject_gradient_fills: bool,
    slides: Vec<RecordedSlide>,
    next_id: u32,
}

impl RecordingSink {
    #[must_use]
    pub fn new(capabilities: SinkCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Advertise gradient fills but fail every attempt to apply one.
    #[must_use]
    pub fn rejecting_gradient_fills(mut self) -> Self {
        self.reject_gradient_fills = true;
        self
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Calls recorded for slide `index`, in order.
    #[must_use]
    pub fn ops(&self, index: usize) -> &[SinkOp] {
        self.slides
            .get(index)
            .map_or(&[], |slide| slide.ops.as_slice())
    }

    /// Shapes of slide `index`, back to front.
    #[must_use]
    pub fn z_order(&self, index: usize) -> &[ShapeId] {
        self.slides
            .get(index)
            .map_or(&[], |slide| slide.z_order.as_slice())
    }

    /// Creation op of `id` on slide `index`.
    #[must_use]
    pub fn creation_of(&self, index: usize, id: ShapeId) -> Option<&SinkOp> {
        self.ops(index).iter().find(|op| match op {
            SinkOp::AddShape { id: created, .. }
            | SinkOp::AddTextBox { id: created, .. }
            | SinkOp::AddLine { id: created, .. }
            | SinkOp::AddTable { id: created, .. }
            | SinkOp::AddImage { id: created, .. } => *created == id,
            _ => false,
        })
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AnyResult<String> {
        Ok(serde_json::to_string_pretty(&self.slides)?)
    }

    fn slide_mut(&mut self) -> AnyResult<&mut RecordedSlide> {
        self.slides
            .last_mut()
            .ok_or_else(|| anyhow!("no slide started"))
    }

    fn record(&mut self, op: SinkOp) -> AnyResult<()> {
        trace!("{op:?}");
        self.slide_mut()?.ops.push(op);
        Ok(())
    }

    fn create(&mut self, make: impl FnOnce(ShapeId) -> SinkOp) -> AnyResult<ShapeId> {
        let id = ShapeId(self.next_id);
        let slide = self.slide_mut()?;
        slide.ops.push(make(id));
        slide.z_order.push(id);
        self.next_id += 1;
        Ok(id)
    }

    fn known(&mut self, id: ShapeId) -> AnyResult<()> {
        if self.slide_mut()?.z_order.contains(&id) {
            Ok(())
        } else {
            Err(anyhow!("unknown shape {id:?}"))
        }
    }

    fn modify(&mut self, id: ShapeId, op: SinkOp) -> AnyResult<()> {
        self.known(id)?;
        self.record(op)
    }

    fn reorder(&mut self, id: ShapeId, to_back: bool) -> AnyResult<()> {
        self.known(id)?;
        let slide = self.slide_mut()?;
        slide.z_order.retain(|existing| *existing != id);
        if to_back {
            slide.z_order.insert(0, id);
            slide.ops.push(SinkOp::SendToBack { id });
        } else {
            slide.z_order.push(id);
            slide.ops.push(SinkOp::BringToFront { id });
        }
        Ok(())
    }
}

impl DocumentSink for RecordingSink {
    fn capabilities(&self) -> SinkCapabilities {
        self.capabilities
    }

    fn begin_slide(&mut self) -> AnyResult<()> {
        self.slides.push(RecordedSlide::default());
        let slide = self.slides.len() - 1;
        self.record(SinkOp::BeginSlide { slide })
    }

    fn set_background(&mut self, color: Color) -> AnyResult<()> {
        self.record(SinkOp::SetBackground { color })
    }

    fn add_shape(&mut self, kind: ShapeKind, frame: Frame) -> AnyResult<ShapeId> {
        if matches!(kind, ShapeKind::PartiallyRounded { .. })
            && !self.capabilities.per_corner_rounding
        {
            bail!("per-corner rounding is not supported");
        }
        self.create(|id| SinkOp::AddShape { id, kind, frame })
    }

    fn set_solid_fill(&mut self, shape: ShapeId, color: Color) -> AnyResult<()> {
        self.modify(shape, SinkOp::SolidFill { id: shape, color })
    }

    fn set_gradient_fill(&mut self, shape: ShapeId, gradient: &Gradient) -> AnyResult<()> {
        if self.reject_gradient_fills || !self.capabilities.gradient_fill {
            bail!("gradient fill rejected");
        }
        self.modify(
            shape,
            SinkOp::GradientFill {
                id: shape,
                gradient: gradient.clone(),
            },
        )
    }

    fn set_no_fill(&mut self, shape: ShapeId) -> AnyResult<()> {
        self.modify(shape, SinkOp::NoFill { id: shape })
    }

    fn set_outline(&mut self, shape: ShapeId, outline: Outline) -> AnyResult<()> {
        self.modify(shape, SinkOp::Outline { id: shape, outline })
    }

    fn set_no_outline(&mut self, shape: ShapeId) -> AnyResult<()> {
        self.modify(shape, SinkOp::NoOutline { id: shape })
    }

    fn add_text_box(&mut self, frame: Frame) -> AnyResult<ShapeId> {
        self.create(|id| SinkOp::AddTextBox { id, frame })
    }

    fn set_text(&mut self, shape: ShapeId, body: &TextBody) -> AnyResult<()> {
        self.modify(
            shape,
            SinkOp::SetText {
                id: shape,
                body: body.clone(),
            },
        )
    }

    fn add_line(&mut self, from: Point, to: Point, outline: Outline) -> AnyResult<ShapeId> {
        self.create(|id| SinkOp::AddLine {
            id,
            from,
            to,
            outline,
        })
    }

    fn add_table(&mut self, frame: Frame, table: &TableElement) -> AnyResult<ShapeId> {
        if !self.capabilities.native_tables {
            bail!("native tables are not supported");
        }
        let columns = table
            .rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0);
        let rows = table.rows.len();
        self.create(|id| SinkOp::AddTable {
            id,
            frame,
            rows,
            columns,
        })
    }

    fn add_image(
        &mut self,
        frame: Frame,
        image: &LoadedImage,
        clip_circle: bool,
    ) -> AnyResult<ShapeId> {
        if clip_circle && !self.capabilities.image_clipping {
            bail!("image clipping is not supported");
        }
        self.create(|id| SinkOp::AddImage {
            id,
            frame,
            byte_len: image.bytes.len(),
            width_px: image.width_px,
            height_px: image.height_px,
            clip_circle,
        })
    }

    fn send_to_back(&mut self, shape: ShapeId) -> AnyResult<()> {
        self.reorder(shape, true)
    }

    fn bring_to_front(&mut self, shape: ShapeId) -> AnyResult<()> {
        self.reorder(shape, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{GradientKind, GradientStop};

    #[test]
    fn reordering_moves_shapes() {
        let mut sink = RecordingSink::default();
        sink.begin_slide().unwrap();
        let first = sink.add_shape(ShapeKind::Rectangle, Frame::default()).unwrap();
        let second = sink.add_text_box(Frame::default()).unwrap();
        sink.send_to_back(second).unwrap();
        assert_eq!(sink.z_order(0), &[second, first]);
        sink.bring_to_front(second).unwrap();
        assert_eq!(sink.z_order(0), &[first, second]);
        assert!(sink.set_no_fill(ShapeId(99)).is_err());
    }

    #[test]
    fn drawing_before_a_slide_fails() {
        let mut sink = RecordingSink::default();
        assert!(sink.add_shape(ShapeKind::Oval, Frame::default()).is_err());
        assert_eq!(sink.slide_count(), 0);
    }

    #[test]
    fn rejected_gradients_and_json_dump() {
        let mut sink = RecordingSink::new(SinkCapabilities::full()).rejecting_gradient_fills();
        sink.begin_slide().unwrap();
        let shape = sink.add_shape(ShapeKind::Rectangle, Frame::new(0, 0, 10, 10)).unwrap();
        let gradient = Gradient::new(
            GradientKind::Linear,
            Some(0.0),
            vec![
                GradientStop::new(0.0, Color::BLACK),
                GradientStop::new(1.0, Color::WHITE),
            ],
        )
        .unwrap();
        assert!(sink.set_gradient_fill(shape, &gradient).is_err());
        let json = sink.to_json().unwrap();
        assert!(json.contains("\"op\": \"add_shape\""));
    }
}
