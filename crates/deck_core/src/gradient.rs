//! Normalized multi-stop gradients.
//!
//! A [`Gradient`] always holds at least two stops, every stop position lies
//! in `[0, 1]`, and positions never decrease. The constructor is the only way
//! in, deserialization included.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Gradient geometry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Straight-line interpolation along an angle.
    Linear,
    /// Interpolation outward from an implicit center.
    Radial,
}

impl GradientKind {
    /// Weight used when picking the dominant layer of a stacked background.
    #[inline]
    #[must_use]
    pub const fn layer_weight(self) -> f32 {
        match self {
            Self::Radial => 100.0,
            Self::Linear => 50.0,
        }
    }
}

/// One color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Offset along the gradient line in `[0, 1]`.
    pub position: f32,
    /// Stop color, possibly translucent.
    pub color: Color,
}

impl GradientStop {
    #[inline]
    #[must_use]
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// A linear or radial gradient with normalized stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientRepr", into = "GradientRepr")]
pub struct Gradient {
    kind: GradientKind,
    angle_deg: Option<f32>,
    stops: Vec<GradientStop>,
}

#[derive(Serialize, Deserialize)]
struct GradientRepr {
    kind: GradientKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle_deg: Option<f32>,
    stops: Vec<GradientStop>,
}

impl TryFrom<GradientRepr> for Gradient {
    type Error = String;

    fn try_from(repr: GradientRepr) -> Result<Self, Self::Error> {
        let count = repr.stops.len();
        Self::new(repr.kind, repr.angle_deg, repr.stops)
            .ok_or_else(|| format!("gradient needs at least two stops, got {count}"))
    }
}

impl From<Gradient> for GradientRepr {
    fn from(gradient: Gradient) -> Self {
        Self {
            kind: gradient.kind,
            angle_deg: gradient.angle_deg,
            stops: gradient.stops,
        }
    }
}

impl Gradient {
    /// Build a gradient, clamping positions into `[0, 1]` and sorting stops
    /// by position (stable, so equal positions keep their source order).
    ///
    /// Returns `None` when fewer than two stops are given. Radial gradients
    /// never carry an angle; linear gradients without one point along 90°.
    #[must_use]
    pub fn new(
        kind: GradientKind,
        angle_deg: Option<f32>,
        mut stops: Vec<GradientStop>,
    ) -> Option<Self> {
        if stops.len() < 2 {
            return None;
        }
        for stop in &mut stops {
            stop.position = if stop.position.is_nan() {
                0.0
            } else {
                stop.position.clamp(0.0, 1.0)
            };
        }
        stops.sort_by(|left, right| left.position.total_cmp(&right.position));
        let angle_deg = match kind {
            GradientKind::Linear => Some(angle_deg.map_or(90.0, |angle| angle.rem_euclid(360.0))),
            GradientKind::Radial => None,
        };
        Some(Self {
            kind,
            angle_deg,
            stops,
        })
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> GradientKind {
        self.kind
    }

    /// Direction of a linear gradient, 0° pointing right and increasing
    /// clockwise on the y-down page.
    #[inline]
    #[must_use]
    pub const fn angle_deg(&self) -> Option<f32> {
        self.angle_deg
    }

    #[inline]
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Stop with the lowest position.
    #[inline]
    #[must_use]
    pub fn first_stop(&self) -> GradientStop {
        // Construction guarantees at least two stops.
        self.stops[0]
    }

    /// Darkest stop, preferring the more opaque one on equal brightness and
    /// the earlier one after that.
    #[must_use]
    pub fn darkest_stop(&self) -> GradientStop {
        let mut best = self.first_stop();
        for stop in self.stops.iter().skip(1) {
            let darker = stop.color.brightness() < best.color.brightness();
            let same = stop.color.brightness() == best.color.brightness();
            if darker || (same && stop.color.alpha > best.color.alpha) {
                best = *stop;
            }
        }
        best
    }

    /// Mean brightness over all stops.
    #[must_use]
    pub fn average_brightness(&self) -> f32 {
        let total: f32 = self.stops.iter().map(|stop| stop.color.brightness()).sum();
        total / self.stops.len() as f32
    }

    /// Mean alpha over all stops.
    #[must_use]
    pub fn average_opacity(&self) -> f32 {
        let total: f32 = self.stops.iter().map(|stop| stop.color.alpha).sum();
        total / self.stops.len() as f32
    }

    /// Prominence score used to choose between layered gradients: kind
    /// weight, plus darkness, plus opacity.
    #[must_use]
    pub fn layer_score(&self) -> f32 {
        self.kind.layer_weight()
            + (255.0 - self.average_brightness()) / 2.0
            + self.average_opacity() * 50.0
    }

    /// Copy with every stop flattened against `backdrop`.
    #[must_use]
    pub fn flattened(&self, backdrop: Color) -> Self {
        Self {
            kind: self.kind,
            angle_deg: self.angle_deg,
            stops: self
                .stops
                .iter()
                .map(|stop| GradientStop::new(stop.position, stop.color.flatten(backdrop)))
                .collect(),
        }
    }
}
