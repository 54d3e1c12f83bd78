//! Paint order groups for composited elements.
//!
//! Groups paint from back to front:
//! 1. Slide background
//! 2. Shapes, circles and triangles
//! 3. Tables
//! 4. Plain text
//! 5. Styled text badges
//! 6. Images

use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Stacking group of a visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZLayer {
    /// Slide canvas fill.
    Background,
    /// Filled or bordered boxes.
    Shapes,
    /// Table cells and their decorations.
    Tables,
    /// Text boxes.
    Text,
    /// Bordered or filled text containers.
    StyledText,
    /// Raster images, always on top.
    Images,
}

impl ZLayer {
    /// All groups, back to front.
    pub const ORDER: [Self; 6] = [
        Self::Background,
        Self::Shapes,
        Self::Tables,
        Self::Text,
        Self::StyledText,
        Self::Images,
    ];

    /// Lower values paint first (behind).
    #[inline]
    #[must_use]
    const fn sort_key(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Shapes => 1,
            Self::Tables => 2,
            Self::Text => 3,
            Self::StyledText => 4,
            Self::Images => 5,
        }
    }
}

impl PartialOrd for ZLayer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZLayer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
