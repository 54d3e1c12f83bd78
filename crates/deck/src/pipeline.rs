//! Per-slide conversion and sequential deck orchestration.

use crate::config::DeckConfig;
use anyhow::{Context as _, Result as AnyResult};
use deck_compositor::{CompositeReport, DocumentSink, ImageLoader, composite};
use deck_extract::extract_elements;
use deck_snapshot::{SnapshotProvider, SnapshotTree};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tracing::info_span;

/// What happened to one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlideOutcome {
    /// The slide was drawn, possibly with degraded elements.
    Composited(CompositeReport),
    /// The slide could not be produced at all.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideReport {
    /// Source document of the slide. Empty when converted on its own.
    pub source: String,
    /// Elements the extractor produced.
    pub elements: usize,
    pub outcome: SlideOutcome,
}

impl SlideReport {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, SlideOutcome::Failed { .. })
    }

    /// The compositor report, unless the slide failed.
    #[must_use]
    pub const fn composite(&self) -> Option<&CompositeReport> {
        match &self.outcome {
            SlideOutcome::Composited(report) => Some(report),
            SlideOutcome::Failed { .. } => None,
        }
    }
}

/// Reports for every slide of a deck, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeckReport {
    pub slides: Vec<SlideReport>,
}

impl DeckReport {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.slides.iter().filter(|slide| slide.is_failed()).count()
    }

    /// Composited slides.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.slides.len() - self.failed()
    }

    /// Warnings over all composited slides.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.slides
            .iter()
            .filter_map(SlideReport::composite)
            .map(|report| report.warnings.len())
            .sum()
    }
}

/// Convert one snapshot into a new slide of `sink`.
///
/// # Errors
/// Returns an error if the sink cannot start a slide. Failures of single
/// elements are reported in the returned [`CompositeReport`] instead.
pub fn convert_slide<S>(
    tree: &SnapshotTree,
    sink: &mut S,
    loader: &dyn ImageLoader,
    config: &DeckConfig,
) -> AnyResult<SlideReport>
where
    S: DocumentSink + ?Sized,
{
    let _span = info_span!("deck.slide", nodes = tree.len()).entered();
    sink.begin_slide().context("starting slide")?;
    let elements = extract_elements(tree, &config.extract_options());
    let report = composite(&elements, sink, &config.to_converter(), loader);
    Ok(SlideReport {
        source: String::new(),
        elements: elements.len(),
        outcome: SlideOutcome::Composited(report),
    })
}

/// Convert `sources` in order, one slide each.
///
/// A slide whose snapshot or slide setup fails is recorded as
/// [`SlideOutcome::Failed`] and the next slide proceeds.
pub fn convert_deck<P, S>(
    provider: &mut P,
    sources: &[String],
    sink: &mut S,
    loader: &dyn ImageLoader,
    config: &DeckConfig,
) -> DeckReport
where
    P: SnapshotProvider + ?Sized,
    S: DocumentSink + ?Sized,
{
    let mut report = DeckReport::default();
    for source in sources {
        let converted = provider
            .snapshot(source, config.canvas())
            .with_context(|| format!("snapshot of {source}"))
            .and_then(|tree| convert_slide(&tree, sink, loader, config));
        let slide = match converted {
            Ok(slide) => SlideReport {
                source: source.clone(),
                ..slide
            },
            Err(error) => {
                warn!("slide {source} failed: {error:#}");
                SlideReport {
                    source: source.clone(),
                    elements: 0,
                    outcome: SlideOutcome::Failed {
                        message: format!("{error:#}"),
                    },
                }
            }
        };
        report.slides.push(slide);
    }
    info!(
        "converted {} of {} slides, {} warnings",
        report.succeeded(),
        report.slides.len(),
        report.warning_count()
    );
    report
}
