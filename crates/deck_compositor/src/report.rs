//! Non-fatal outcome of compositing one slide.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Why an element was degraded or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The sink lacks or rejected a feature; the element was drawn in a
    /// simpler form.
    UnsupportedCapability,
    /// An image could not be loaded or decoded; the element was skipped.
    ResourceFetch,
    /// A sink call failed while drawing; the element may be incomplete.
    ElementFailed,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCapability => write!(formatter, "unsupported capability"),
            Self::ResourceFetch => write!(formatter, "resource fetch failed"),
            Self::ElementFailed => write!(formatter, "element failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeWarning {
    /// Index of the element in the list passed to the compositor.
    pub element_index: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for CompositeWarning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "element {}: {}: {}",
            self.element_index, self.kind, self.message
        )
    }
}

/// Counts and warnings for one composited slide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositeReport {
    /// Elements that reached the sink, possibly degraded.
    pub drawn: usize,
    /// Elements skipped entirely.
    pub dropped: usize,
    pub warnings: Vec<CompositeWarning>,
}

impl CompositeReport {
    /// Nothing was degraded or skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.warnings.is_empty()
    }

    #[must_use]
    pub fn warnings_of(&self, kind: WarningKind) -> usize {
        self.warnings
            .iter()
            .filter(|warning| warning.kind == kind)
            .count()
    }
}
