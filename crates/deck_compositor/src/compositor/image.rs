//! Pictures and their aspect-ratio handling.

use super::Painter;
use crate::report::WarningKind;
use crate::sink::DocumentSink;
use anyhow::Result as AnyResult;
use deck_core::{ImageElement, ImageFit, Rect};

/// Relative aspect mismatch tolerated before a preserved image is nudged.
const ASPECT_TOLERANCE: f32 = 0.1;

/// Longest source prefix quoted in warnings. Data URIs get long.
const SOURCE_PREVIEW_CHARS: usize = 80;

/// Box an image with natural size `natural_width`×`natural_height` is drawn
/// into when laid out in `rect`.
///
/// `Contain` letterboxes and centers along the short axis. `Preserve` keeps
/// the top-left corner and shrinks one side once the aspect ratios differ
/// by more than 10 %. `Fill` stretches.
#[must_use]
pub fn fit_image(rect: Rect, natural_width: f32, natural_height: f32, fit: ImageFit) -> Rect {
    if natural_width <= 0.0 || natural_height <= 0.0 || rect.is_empty() {
        return rect;
    }
    let natural = natural_width / natural_height;
    let display = rect.width / rect.height;
    match fit {
        ImageFit::Fill => rect,
        ImageFit::Contain if natural > display => {
            let height = rect.width / natural;
            Rect::new(
                rect.x,
                rect.y + (rect.height - height) / 2.0,
                rect.width,
                height,
            )
        }
        ImageFit::Contain => {
            let width = rect.height * natural;
            Rect::new(
                rect.x + (rect.width - width) / 2.0,
                rect.y,
                width,
                rect.height,
            )
        }
        ImageFit::Preserve if (natural - display).abs() / natural <= ASPECT_TOLERANCE => rect,
        ImageFit::Preserve if natural > display => {
            Rect::new(rect.x, rect.y, rect.width, rect.width / natural)
        }
        ImageFit::Preserve => Rect::new(rect.x, rect.y, rect.height * natural, rect.height),
    }
}

fn preview(source: &str) -> String {
    if source.chars().count() <= SOURCE_PREVIEW_CHARS {
        return source.to_owned();
    }
    let mut short: String = source.chars().take(SOURCE_PREVIEW_CHARS).collect();
    short.push_str("...");
    short
}

impl<S: DocumentSink + ?Sized> Painter<'_, S> {
    /// Missing or undecodable pictures are skipped with a warning; whatever
    /// was drawn underneath them stays.
    pub(super) fn image(&mut self, image: &ImageElement) -> AnyResult<bool> {
        let loaded = match self.loader.load(&image.source) {
            Ok(loaded) => loaded,
            Err(error) => {
                self.warn(
                    WarningKind::ResourceFetch,
                    format!("could not load {}: {error:#}", preview(&image.source)),
                );
                return Ok(false);
            }
        };
        let (natural_width, natural_height) =
            if image.natural_width > 0.0 && image.natural_height > 0.0 {
                (image.natural_width, image.natural_height)
            } else {
                (loaded.width_px as f32, loaded.height_px as f32)
            };
        let rect = fit_image(image.geometry, natural_width, natural_height, image.fit);

        let clip_circle = image.circular && self.capabilities.image_clipping;
        if image.circular && !clip_circle {
            self.warn(
                WarningKind::UnsupportedCapability,
                "sink cannot clip images, drawing a rectangular picture".to_owned(),
            );
        }
        let id = self
            .sink
            .add_image(self.converter.frame(rect), &loaded, clip_circle)?;
        self.images.push((self.current, id));
        Ok(true)
    }
}
