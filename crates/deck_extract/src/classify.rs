//! Element classification for container-like nodes.
//!
//! Rules are tried in order and the first match wins:
//! 1. bordered-box triangles
//! 2. gradient text
//! 3. styled-text badges
//! 4. shapes and circles
//!
//! Classification is a pure function of the node and its context.

use crate::ExtractOptions;
use crate::view::StyleView;
use deck_core::{
    Border, BorderSet, Color, Edge, Fill, Rect, ShapeElement, StyledTextElement, TextElement,
    TriangleDirection, TriangleElement,
};

/// Triangles are drawn with borders on boxes smaller than this.
const TRIANGLE_MAX_PX: f32 = 50.0;
/// Badges above this width and height need no other justification.
const BADGE_MIN_WIDTH_PX: f32 = 60.0;
const BADGE_MIN_HEIGHT_PX: f32 = 20.0;
/// Upper bound for small circular badges and dots.
pub const SMALL_BADGE_MAX_PX: f32 = 60.0;
/// Aspect ratio window for circles and round badges.
pub const SQUARE_LOW: f32 = 0.8;
pub const SQUARE_HIGH: f32 = 1.2;
/// Radius factor (of half the smaller side) for a circle.
pub const CIRCLE_RADIUS_FACTOR: f32 = 0.9;
/// Radius factor for small round badges and list dots.
pub const DOT_RADIUS_FACTOR: f32 = 0.8;
/// Below this alpha a background color is replaced by one from
/// `background-image`.
const FAINT_ALPHA: f32 = 0.1;

/// Tree-derived facts the classifier needs about a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifyContext {
    /// Rendered text of the subtree, whitespace collapsed and trimmed.
    pub text: String,
    /// Some descendant is block level.
    pub has_block_descendants: bool,
    /// Some ancestor is a heading, paragraph, list item or similar.
    pub inside_semantic: bool,
    /// Parent's background when it is visible.
    pub parent_background: Option<Color>,
}

/// What a container node turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Triangle(TriangleElement),
    /// Standalone gradient text.
    GradientText(TextElement),
    /// Gradient text inside a semantic container, left for that container.
    DeferredGradientText,
    StyledText(StyledTextElement),
    Shape(ShapeElement),
    Circle(ShapeElement),
    /// Nothing to draw for this box itself.
    Skip,
}

/// Resolved paint of a container box.
struct BoxPaint {
    fill: Option<Fill>,
    borders: BorderSet,
    radius: f32,
}

impl BoxPaint {
    fn resolve(view: &StyleView<'_>, context: &ClassifyContext) -> Self {
        let own = view.background_color();
        let backdrop = own
            .filter(|color| color.is_visible())
            .or(context.parent_background)
            .unwrap_or(Color::WHITE);
        let gradient = view.background_gradient(Some(backdrop));
        let solid = match (&gradient, own) {
            (None, color) if color.is_none_or(|value| value.alpha < FAINT_ALPHA) => {
                view.background_image_color().or(color)
            }
            (_, color) => color,
        };
        let fill = gradient
            .map(Fill::Gradient)
            .or_else(|| solid.filter(|color| color.is_visible()).map(Fill::Solid));
        Self {
            fill,
            borders: view.borders(),
            radius: view.corner_radius(),
        }
    }
}

/// Classify a container node.
#[must_use]
pub fn classify(
    view: &StyleView<'_>,
    context: &ClassifyContext,
    options: &ExtractOptions,
) -> Classification {
    let rect = view.rect();
    if let Some(triangle) = triangle_candidate(view, rect) {
        return triangle.map_or(Classification::Skip, Classification::Triangle);
    }

    if let Some(gradient) = view.text_gradient() {
        if context.inside_semantic {
            return Classification::DeferredGradientText;
        }
        if context.text.is_empty() {
            return Classification::Skip;
        }
        let mut run = view.run(context.text.clone(), Color::BLACK, options);
        run.gradient_overlay = Some(gradient);
        return Classification::GradientText(TextElement {
            geometry: rect,
            runs: vec![run],
            bullet: None,
            border: Border::from_set(view.borders()),
        });
    }

    let paint = BoxPaint::resolve(view, context);
    if is_badge(rect, context, &paint) {
        return Classification::StyledText(StyledTextElement {
            geometry: rect,
            run: view.run(context.text.clone(), Color::WHITE, options),
            fill: paint.fill,
            border: Border::from_set(paint.borders),
            corner_radius_px: paint.radius,
        });
    }

    if paint.fill.is_none() && !paint.borders.any() {
        return Classification::Skip;
    }
    let shape = ShapeElement {
        geometry: rect,
        fill: paint.fill,
        border: Border::from_set(paint.borders),
        corner_radius_px: paint.radius,
    };
    if is_round(rect, paint.radius, CIRCLE_RADIUS_FACTOR) {
        Classification::Circle(shape)
    } else {
        Classification::Shape(shape)
    }
}

/// Squareish box whose radius reaches `factor` of half its smaller side.
#[must_use]
pub fn is_round(rect: Rect, radius: f32, factor: f32) -> bool {
    rect.is_squareish(SQUARE_LOW, SQUARE_HIGH) && rect.is_rounded_by(radius, factor)
}

/// Short text in a small, round box: initials, counters, dots.
#[must_use]
pub fn is_small_circular(rect: Rect, radius: f32, text: &str) -> bool {
    text.chars().count() <= 3
        && rect.at_most(SMALL_BADGE_MAX_PX)
        && is_round(rect, radius, DOT_RADIUS_FACTOR)
}

fn is_badge(rect: Rect, context: &ClassifyContext, paint: &BoxPaint) -> bool {
    if context.text.is_empty() || context.has_block_descendants || paint.fill.is_none() {
        return false;
    }
    let small_circular = is_small_circular(rect, paint.radius, &context.text);
    let large = rect.width > BADGE_MIN_WIDTH_PX && rect.height > BADGE_MIN_HEIGHT_PX;
    (large || small_circular) && (!context.inside_semantic || small_circular)
}

/// `None` when the node is not a border triangle, `Some(None)` when it is
/// one but has no drawable size.
#[expect(
    clippy::option_option,
    reason = "distinguishes 'not a triangle' from 'degenerate triangle'"
)]
fn triangle_candidate(view: &StyleView<'_>, rect: Rect) -> Option<Option<TriangleElement>> {
    if rect.width >= TRIANGLE_MAX_PX || rect.height >= TRIANGLE_MAX_PX {
        return None;
    }
    // All four colors count, drawn or not; only the pointing side needs a width.
    let colors: Vec<Color> = Edge::ALL
        .into_iter()
        .filter_map(|edge| view.border_color(edge))
        .collect();
    let has_clear = colors.iter().any(|color| color.is_transparent());
    let has_solid = colors.iter().any(|color| color.is_visible());
    let has_width = Edge::ALL.into_iter().any(|edge| view.border_width(edge) > 0.0);
    if !(has_width && has_clear && has_solid) {
        return None;
    }
    let borders = view.borders();
    let width_of = |edge: Edge| borders.get(edge).map_or(0.0, |side| side.width_px);
    let colored = |edge: Edge| borders.get(edge).filter(|side| side.color.is_visible());
    let horizontal_span = width_of(Edge::Left).max(width_of(Edge::Right)) * 2.0;
    let vertical_span = width_of(Edge::Top).max(width_of(Edge::Bottom)) * 2.0;
    let (direction, side, width, height) = if let Some(side) = colored(Edge::Bottom) {
        (TriangleDirection::Up, side, horizontal_span, side.width_px)
    } else if let Some(side) = colored(Edge::Top) {
        (TriangleDirection::Down, side, horizontal_span, side.width_px)
    } else if let Some(side) = colored(Edge::Right) {
        (TriangleDirection::Left, side, side.width_px, vertical_span)
    } else if let Some(side) = colored(Edge::Left) {
        (TriangleDirection::Right, side, side.width_px, vertical_span)
    } else {
        return Some(None);
    };
    let geometry = Rect::new(rect.x, rect.y, width, height);
    Some((!geometry.is_empty()).then_some(TriangleElement {
        geometry,
        direction,
        color: side.color,
    }))
}
