//! Per-side borders.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges in top, right, bottom, left order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// CSS property name fragment (`top`, `right`, ...).
    #[inline]
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Line pattern of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// One painted border side. Width is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderSide {
    pub color: Color,
    pub width_px: f32,
    pub style: BorderStyle,
}

impl BorderSide {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, width_px: f32, style: BorderStyle) -> Self {
        Self {
            color,
            width_px,
            style,
        }
    }

    /// Same color and width; style is not compared.
    #[inline]
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.color == other.color && self.width_px == other.width_px
    }
}

/// Four optional border sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderSide>,
}

impl BorderSet {
    #[inline]
    #[must_use]
    pub const fn get(&self, edge: Edge) -> Option<BorderSide> {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    #[inline]
    pub fn set(&mut self, edge: Edge, side: Option<BorderSide>) {
        let slot = match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        };
        *slot = side;
    }

    /// Present sides paired with their edge, in top, right, bottom, left order.
    pub fn sides(&self) -> impl Iterator<Item = (Edge, BorderSide)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(|edge| self.get(edge).map(|side| (edge, side)))
    }

    /// True when at least one side is painted.
    #[inline]
    #[must_use]
    pub fn any(&self) -> bool {
        self.sides().next().is_some()
    }

    /// The common side when all four are present with identical color and
    /// width. The top side's style is used.
    #[must_use]
    pub fn uniform(&self) -> Option<BorderSide> {
        let top = self.top?;
        [self.right?, self.bottom?, self.left?]
            .iter()
            .all(|side| side.matches(&top))
            .then_some(top)
    }
}

/// Border attached to a drawable element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Border {
    /// One outline around the whole box.
    Uniform(BorderSide),
    /// Independent sides.
    PerSide(BorderSet),
}

impl Border {
    /// Collapse a set into a border, preferring the uniform form.
    /// `None` when no side is painted.
    #[must_use]
    pub fn from_set(set: BorderSet) -> Option<Self> {
        if let Some(side) = set.uniform() {
            return Some(Self::Uniform(side));
        }
        set.any().then_some(Self::PerSide(set))
    }
}
