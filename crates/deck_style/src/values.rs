//! Lengths, fonts, alignment and borders.

use crate::color::parse_color;
use crate::syntax::{Numeric, ValueError, comma_separated, leading_numeric};
use cssparser::{Parser, ParserInput};
use deck_core::{BorderSide, BorderStyle, Color, TextAlign};

/// Length in pixels, `parseFloat` style: `"12.5px"` and `"12.5"` both give
/// `12.5`. Percentages and other units are rejected.
#[must_use]
pub fn parse_px(raw: &str) -> Option<f32> {
    match leading_numeric(raw)? {
        Numeric::Number(value) => Some(value),
        Numeric::Dimension(value, unit) if unit == "px" => Some(value),
        Numeric::Dimension(..) | Numeric::Percentage(_) => None,
    }
}

/// Length in pixels where percentages resolve against `percent_base`.
/// Only the first value of a multi-value property is read.
#[must_use]
pub fn parse_length(raw: &str, percent_base: f32) -> Option<f32> {
    match leading_numeric(raw)? {
        Numeric::Number(value) => Some(value),
        Numeric::Dimension(value, unit) if unit == "px" => Some(value),
        Numeric::Percentage(fraction) => Some(fraction * percent_base),
        Numeric::Dimension(..) => None,
    }
}

/// CSS pixel font size to whole points: `round(px * px_to_pt)`.
/// Unparseable sizes fall back to the 16px browser default.
#[must_use]
pub fn parse_font_size_pt(raw: &str, px_to_pt: f32) -> f32 {
    (parse_px(raw).unwrap_or(16.0) * px_to_pt).round()
}

/// `bold`, `bolder` or a numeric weight of at least 700.
#[must_use]
pub fn is_bold(weight: &str) -> bool {
    matches!(weight.trim(), "bold" | "bolder")
        || matches!(leading_numeric(weight), Some(Numeric::Number(value)) if value >= 700.0)
}

#[must_use]
pub fn is_italic(style: &str) -> bool {
    let trimmed = style.trim();
    trimmed.starts_with("italic") || trimmed.starts_with("oblique")
}

/// First family of a `font-family` list, quoted or not.
#[must_use]
pub fn primary_font_family(raw: &str, default_family: &str) -> String {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);
    comma_separated(&mut parser, family_name)
        .into_iter()
        .find(|family| !family.is_empty())
        .unwrap_or_else(|| default_family.to_owned())
}

/// A quoted family, or unquoted identifiers joined by single spaces.
fn family_name<'i>(input: &mut Parser<'i, '_>) -> Result<String, ValueError<'i>> {
    if let Ok(quoted) = input.try_parse(|parser| parser.expect_string_cloned()) {
        return Ok(quoted.as_ref().trim().to_owned());
    }
    let mut words = Vec::new();
    while let Ok(word) = input.expect_ident() {
        words.push(word.as_ref().to_owned());
    }
    input.expect_exhausted()?;
    Ok(words.join(" "))
}

/// Resolve `text-align` to a physical alignment. `start` and `end` follow
/// `direction`; anything unknown is left aligned.
#[must_use]
pub fn normalize_text_align(align: &str, direction: &str) -> TextAlign {
    let rtl = direction.trim().eq_ignore_ascii_case("rtl");
    match align.trim().to_ascii_lowercase().as_str() {
        "center" | "-webkit-center" => TextAlign::Center,
        "right" | "-webkit-right" => TextAlign::Right,
        "justify" => TextAlign::Justify,
        "start" if rtl => TextAlign::Right,
        "end" if !rtl => TextAlign::Right,
        _ => TextAlign::Left,
    }
}

/// Border line style. `none` and `hidden` mean no border; styles that the
/// output cannot draw degrade to solid.
#[must_use]
pub fn parse_border_style(raw: &str) -> Option<BorderStyle> {
    match raw.trim() {
        "" | "none" | "hidden" => None,
        "dashed" => Some(BorderStyle::Dashed),
        "dotted" => Some(BorderStyle::Dotted),
        _ => Some(BorderStyle::Solid),
    }
}

/// One border side from its computed width, style and color.
///
/// The side exists when its width is positive and its style is not
/// `none`/`hidden`. The color keeps its alpha: zero-alpha sides matter for
/// triangle detection. An unreadable color is treated as transparent.
#[must_use]
pub fn parse_border_side(width: &str, style: &str, color: &str) -> Option<BorderSide> {
    let width_px = parse_px(width).filter(|value| *value > 0.0)?;
    let style = parse_border_style(style)?;
    let color = parse_color(color, None).unwrap_or(Color::TRANSPARENT);
    Some(BorderSide::new(color, width_px, style))
}
