//! Gradient parsing.
//!
//! Angles are returned in page convention: 0° points right and angles grow
//! clockwise. CSS angles (0° pointing up) are rotated by -90° on the way in.

use crate::color::parse_color;
use crate::syntax::{Numeric, ValueError, comma_separated, component_text, numeric, skip_rest};
use cssparser::{Parser, ParserInput, Token};
use deck_core::{Color, Gradient, GradientKind, GradientStop};
use log::trace;

/// One comma separated argument of a gradient function.
enum Argument {
    Direction(f32),
    Stop(Color, Option<f32>),
}

/// Parse a `background`/`background-image` value into its most prominent
/// gradient.
///
/// Comma separated layers are each parsed and scored by
/// [`Gradient::layer_score`]; the first highest scoring layer wins. Layers
/// that are not gradients (`url(..)`, `none`) are skipped. A bare argument
/// list that starts with a direction (`to right, #000 0%, ...`) is read as a
/// linear gradient.
///
/// Stop colors go through [`parse_color`] with `backdrop`, so transparent
/// stops take the backdrop color when one is known.
#[must_use]
pub fn parse_gradient(raw: &str, backdrop: Option<Color>) -> Option<Gradient> {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);
    if !raw.contains("gradient(") {
        return bare_linear(&mut parser, backdrop);
    }
    let mut best: Option<(f32, Gradient)> = None;
    for candidate in comma_separated(&mut parser, |item| layer(item, backdrop)) {
        let score = candidate.layer_score();
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, gradient)| gradient)
}

/// Direction argument of a linear gradient, in page degrees.
///
/// Keywords map `to right` 0°, `to bottom` 90°, `to left` 180°, `to top`
/// 270°, with diagonals in between. Explicit angles accept `deg`, `grad`,
/// `rad` and `turn`.
#[must_use]
pub fn parse_direction(argument: &str) -> Option<f32> {
    let mut input = ParserInput::new(argument);
    let mut parser = Parser::new(&mut input);
    direction(&mut parser).ok()
}

fn direction<'i>(input: &mut Parser<'i, '_>) -> Result<f32, ValueError<'i>> {
    let location = input.current_source_location();
    if input
        .try_parse(|parser| parser.expect_ident_matching("to"))
        .is_ok()
    {
        let mut sides = Vec::new();
        while let Ok(side) = input.expect_ident() {
            sides.push(side.as_ref().to_ascii_lowercase());
        }
        input.expect_exhausted()?;
        sides.sort_unstable();
        let words: Vec<&str> = sides.iter().map(String::as_str).collect();
        return match words.as_slice() {
            ["right"] => Ok(0.0),
            ["bottom", "right"] => Ok(45.0),
            ["bottom"] => Ok(90.0),
            ["bottom", "left"] => Ok(135.0),
            ["left"] => Ok(180.0),
            ["left", "top"] => Ok(225.0),
            ["top"] => Ok(270.0),
            ["right", "top"] => Ok(315.0),
            _ => Err(location.new_custom_error(())),
        };
    }
    let Numeric::Dimension(value, unit) = numeric(input)? else {
        return Err(location.new_custom_error(()));
    };
    let css_degrees = match unit.as_str() {
        "deg" => value,
        "grad" => value * 0.9,
        "rad" => value.to_degrees(),
        "turn" => value * 360.0,
        _ => return Err(location.new_custom_error(())),
    };
    input.expect_exhausted()?;
    Ok((css_degrees - 90.0).rem_euclid(360.0))
}

/// Gradient kind named by a function token, prefixed forms included.
fn gradient_kind(function: &str) -> Option<GradientKind> {
    let lowered = function.to_ascii_lowercase();
    let unprefixed = lowered.trim_start_matches("-webkit-");
    match unprefixed.strip_prefix("repeating-").unwrap_or(unprefixed) {
        "linear-gradient" => Some(GradientKind::Linear),
        "radial-gradient" => Some(GradientKind::Radial),
        _ => None,
    }
}

fn layer<'i>(
    input: &mut Parser<'i, '_>,
    backdrop: Option<Color>,
) -> Result<Gradient, ValueError<'i>> {
    let location = input.current_source_location();
    let start = input.position();
    let kind = match *input.next()? {
        Token::Function(ref name) => gradient_kind(name),
        _ => None,
    }
    .ok_or_else(|| location.new_custom_error(()))?;
    let arguments = input.parse_nested_block(|block| {
        Ok::<_, ValueError<'i>>(comma_separated(block, |item| argument(item, backdrop)))
    })?;
    let text = input.slice_from(start);
    skip_rest(input);
    build(kind, arguments).ok_or_else(|| {
        trace!("gradient layer without two usable stops: {text:?}");
        location.new_custom_error(())
    })
}

fn bare_linear(input: &mut Parser<'_, '_>, backdrop: Option<Color>) -> Option<Gradient> {
    let arguments = comma_separated(input, |item| argument(item, backdrop));
    if !matches!(arguments.first(), Some(Argument::Direction(_))) {
        return None;
    }
    build(GradientKind::Linear, arguments)
}

fn argument<'i>(
    input: &mut Parser<'i, '_>,
    backdrop: Option<Color>,
) -> Result<Argument, ValueError<'i>> {
    if let Ok(angle) = input.try_parse(direction) {
        return Ok(Argument::Direction(angle));
    }
    let location = input.current_source_location();
    let color = parse_color(component_text(input)?, backdrop)
        .ok_or_else(|| location.new_custom_error(()))?;
    let mut position = None;
    while let Ok(token) = input.next() {
        if let Token::Percentage { unit_value, .. } = *token {
            position = position.or(Some(unit_value));
        }
    }
    Ok(Argument::Stop(color, position))
}

/// Assemble a gradient from its parsed arguments.
///
/// Only a leading direction of a linear gradient counts. A radial shape or
/// position prelude never parses as an argument, so the center stays
/// implicit. Stops keep source order; missing positions default to 0 for the
/// first stop and 1 for every later one.
fn build(kind: GradientKind, arguments: Vec<Argument>) -> Option<Gradient> {
    let mut angle = None;
    let mut stops: Vec<GradientStop> = Vec::with_capacity(arguments.len());
    for (index, argument) in arguments.into_iter().enumerate() {
        match argument {
            Argument::Direction(degrees) if index == 0 && kind == GradientKind::Linear => {
                angle = Some(degrees);
            }
            Argument::Direction(_) => {}
            Argument::Stop(color, position) => {
                let fallback = if stops.is_empty() { 0.0 } else { 1.0 };
                stops.push(GradientStop::new(position.unwrap_or(fallback), color));
            }
        }
    }
    Gradient::new(kind, angle, stops)
}
