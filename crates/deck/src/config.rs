//! Conversion settings.
//!
//! A [`DeckConfig`] fixes the virtual canvas documents are laid out on, the
//! physical page it maps onto, and the font defaults used when turning
//! computed styles into text runs. It can be built in code, read from
//! `DECK_*` environment variables, or parsed from JSON.

use anyhow::{Context as _, Result as AnyResult};
use deck_compositor::UnitConverter;
use deck_extract::ExtractOptions;
use deck_snapshot::CanvasSize;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_CANVAS_WIDTH_PX: f32 = 1920.0;
const DEFAULT_CANVAS_HEIGHT_PX: f32 = 1080.0;
const DEFAULT_PAGE_WIDTH_IN: f32 = 19.2;
const DEFAULT_PAGE_HEIGHT_IN: f32 = 10.8;
const DEFAULT_PX_TO_PT: f32 = 0.75;
const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Positive finite `value`, else `fallback`.
fn positive(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn env_positive(name: &str, fallback: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|val| val.trim().parse::<f32>().ok())
        .map_or(fallback, |parsed| positive(parsed, fallback))
}

/// Canvas, page and font settings for a conversion run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Width of the virtual canvas in pixels
    pub canvas_width_px: f32,
    /// Height of the virtual canvas in pixels
    pub canvas_height_px: f32,
    /// Width of the output page in inches
    pub page_width_in: f32,
    /// Height of the output page in inches
    pub page_height_in: f32,
    /// Multiplier from CSS pixels to font points
    pub px_to_pt: f32,
    /// Family used when a node reports none
    pub default_font_family: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            canvas_width_px: DEFAULT_CANVAS_WIDTH_PX,
            canvas_height_px: DEFAULT_CANVAS_HEIGHT_PX,
            page_width_in: DEFAULT_PAGE_WIDTH_IN,
            page_height_in: DEFAULT_PAGE_HEIGHT_IN,
            px_to_pt: DEFAULT_PX_TO_PT,
            default_font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

impl DeckConfig {
    /// Construct a `DeckConfig` with explicit values.
    ///
    /// Non-positive or non-finite dimensions and scales fall back to their
    /// defaults, as does an empty font family.
    #[must_use]
    pub fn new(
        canvas: CanvasSize,
        page_width_in: f32,
        page_height_in: f32,
        px_to_pt: f32,
        default_font_family: &str,
    ) -> Self {
        let family = default_font_family.trim();
        Self {
            canvas_width_px: positive(canvas.width_px, DEFAULT_CANVAS_WIDTH_PX),
            canvas_height_px: positive(canvas.height_px, DEFAULT_CANVAS_HEIGHT_PX),
            page_width_in: positive(page_width_in, DEFAULT_PAGE_WIDTH_IN),
            page_height_in: positive(page_height_in, DEFAULT_PAGE_HEIGHT_IN),
            px_to_pt: positive(px_to_pt, DEFAULT_PX_TO_PT),
            default_font_family: if family.is_empty() {
                DEFAULT_FONT_FAMILY.to_owned()
            } else {
                family.to_owned()
            },
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `DECK_CANVAS_WIDTH`: canvas width in pixels (default: 1920)
    /// - `DECK_CANVAS_HEIGHT`: canvas height in pixels (default: 1080)
    /// - `DECK_PAGE_WIDTH_IN`: page width in inches (default: 19.2)
    /// - `DECK_PAGE_HEIGHT_IN`: page height in inches (default: 10.8)
    /// - `DECK_PX_TO_PT`: font size multiplier (default: 0.75)
    /// - `DECK_FONT_FAMILY`: fallback font family (default: Arial)
    ///
    /// Unparsable or non-positive values use the default.
    #[must_use]
    pub fn from_env() -> Self {
        let family = env::var("DECK_FONT_FAMILY").unwrap_or_default();
        Self::new(
            CanvasSize::new(
                env_positive("DECK_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH_PX),
                env_positive("DECK_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT_PX),
            ),
            env_positive("DECK_PAGE_WIDTH_IN", DEFAULT_PAGE_WIDTH_IN),
            env_positive("DECK_PAGE_HEIGHT_IN", DEFAULT_PAGE_HEIGHT_IN),
            env_positive("DECK_PX_TO_PT", DEFAULT_PX_TO_PT),
            &family,
        )
    }

    /// Parse a JSON object. Missing fields take their defaults; invalid
    /// values are replaced the same way [`DeckConfig::new`] does.
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid config object.
    pub fn from_json_str(json: &str) -> AnyResult<Self> {
        let parsed: Self = serde_json::from_str(json).context("parsing deck config")?;
        Ok(Self::new(
            parsed.canvas(),
            parsed.page_width_in,
            parsed.page_height_in,
            parsed.px_to_pt,
            &parsed.default_font_family,
        ))
    }

    #[inline]
    #[must_use]
    pub const fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width_px, self.canvas_height_px)
    }

    /// Canvas-to-page coordinate mapping.
    #[must_use]
    pub fn to_converter(&self) -> UnitConverter {
        UnitConverter::new(
            self.canvas_width_px,
            self.canvas_height_px,
            self.page_width_in,
            self.page_height_in,
        )
    }

    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            px_to_pt: self.px_to_pt,
            default_font_family: self.default_font_family.clone(),
        }
    }
}
