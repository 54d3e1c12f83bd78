//! Solid color parsing.

use crate::syntax::{ValueError, skip_rest};
use cssparser::{Parser, ParserInput, Token};
use deck_core::Color;
use log::trace;

const COLOR_FUNCTIONS: [&str; 4] = ["rgba", "rgb", "hsla", "hsl"];

/// Parse a computed CSS color.
///
/// Accepts hex, `rgb()`/`rgba()`, `hsl()` and named colors. When `raw`
/// holds a gradient the first color inside it is used.
///
/// Transparency rules:
/// - fully transparent input yields `backdrop` when given, otherwise
///   [`Color::TRANSPARENT`];
/// - translucent input is flattened onto `backdrop` when given, otherwise
///   its alpha is kept.
///
/// Returns `None` for empty, `none`, or unparseable input.
#[must_use]
pub fn parse_color(raw: &str, backdrop: Option<Color>) -> Option<Color> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    let source = if trimmed.contains("gradient") {
        first_color_in(trimmed)?
    } else {
        trimmed
    };
    let parsed: csscolorparser::Color = match source.parse() {
        Ok(color) => color,
        Err(err) => {
            trace!("unparseable color {source:?}: {err}");
            return None;
        }
    };
    let [red, green, blue, _] = parsed.to_rgba8();
    let color = Color::rgb(red, green, blue).with_alpha(parsed.a);
    if color.is_transparent() {
        return Some(backdrop.unwrap_or(Color::TRANSPARENT));
    }
    match backdrop {
        Some(under) if !color.is_opaque() => Some(color.flatten(under)),
        _ => Some(color),
    }
}

/// First color literal inside a larger value such as a gradient: the
/// earliest `rgb()`/`rgba()`/`hsl()` call or hex literal, searched through
/// nested functions.
#[must_use]
pub fn first_color_in(raw: &str) -> Option<&str> {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);
    find_color(&mut parser)
}

fn find_color<'i>(input: &mut Parser<'i, '_>) -> Option<&'i str> {
    loop {
        let start = input.position();
        let token = input.next().ok()?.clone();
        match token {
            Token::Function(ref name)
                if COLOR_FUNCTIONS
                    .iter()
                    .any(|function| name.eq_ignore_ascii_case(function)) =>
            {
                input
                    .parse_nested_block(|block| {
                        skip_rest(block);
                        Ok::<(), ValueError<'i>>(())
                    })
                    .ok()?;
                return Some(input.slice_from(start).trim());
            }
            Token::Hash(ref digits) | Token::IDHash(ref digits) if is_hex_digits(digits) => {
                return Some(input.slice_from(start).trim());
            }
            Token::Function(_) | Token::ParenthesisBlock => {
                let nested = input
                    .parse_nested_block(|block| Ok::<_, ValueError<'i>>(find_color(block)))
                    .ok()?;
                if nested.is_some() {
                    return nested;
                }
            }
            _ => {}
        }
    }
}

fn is_hex_digits(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_functional_forms_parse() {
        assert_eq!(parse_color("#6B5CFF", None), Some(Color::rgb(107, 92, 255)));
        assert_eq!(parse_color("rgb(1, 2, 3)", None), Some(Color::rgb(1, 2, 3)));
        assert_eq!(
            parse_color("rgba(10, 20, 30, 0.25)", None),
            Some(Color::rgba(10, 20, 30, 0.25))
        );
    }

    #[test]
    fn translucent_flattens_onto_backdrop() {
        assert_eq!(
            parse_color("rgba(0, 0, 0, 0.5)", Some(Color::WHITE)),
            Some(Color::rgb(128, 128, 128))
        );
    }

    #[test]
    fn transparent_is_explicit_or_backdrop() {
        assert_eq!(parse_color("transparent", None), Some(Color::TRANSPARENT));
        assert_eq!(parse_color("rgba(0, 0, 0, 0)", None), Some(Color::TRANSPARENT));
        assert_eq!(
            parse_color("transparent", Some(Color::rgb(5, 6, 7))),
            Some(Color::rgb(5, 6, 7))
        );
    }

    #[test]
    fn garbage_and_none_are_absent() {
        assert_eq!(parse_color("", None), None);
        assert_eq!(parse_color("none", None), None);
        assert_eq!(parse_color("not-a-color", None), None);
    }

    #[test]
    fn gradient_yields_its_first_color() {
        assert_eq!(
            parse_color("linear-gradient(90deg, rgb(255, 0, 0) 0%, #00ff00 100%)", None),
            Some(Color::rgb(255, 0, 0))
        );
        assert_eq!(
            parse_color("linear-gradient(to right, #00ff00, rgb(255, 0, 0))", None),
            Some(Color::rgb(0, 255, 0))
        );
    }

    #[test]
    fn invalid_hash_does_not_hide_later_colors() {
        assert_eq!(first_color_in("#zz, #fff"), Some("#fff"));
        assert_eq!(
            first_color_in("linear-gradient(#12, hsl(0, 100%, 50%) 10%)"),
            Some("hsl(0, 100%, 50%)")
        );
        assert_eq!(first_color_in("linear-gradient(to right, red, blue)"), None);
    }
}
