//! Token-level helpers over `cssparser` shared by the value parsers.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

/// Errors carry no payload: a value that fails to parse is simply absent.
pub type ValueError<'i> = ParseError<'i, ()>;

/// A numeric token.
#[derive(Clone, Debug, PartialEq)]
pub enum Numeric {
    Number(f32),
    /// Fraction of one, so `50%` is `0.5`.
    Percentage(f32),
    /// Value with its lowercase unit.
    Dimension(f32, String),
}

/// Read the next token as a number, percentage or dimension.
///
/// # Errors
/// Returns a custom error when the next token is anything else.
pub fn numeric<'i>(input: &mut Parser<'i, '_>) -> Result<Numeric, ValueError<'i>> {
    let location = input.current_source_location();
    match *input.next()? {
        Token::Number { value, .. } => Ok(Numeric::Number(value)),
        Token::Percentage { unit_value, .. } => Ok(Numeric::Percentage(unit_value)),
        Token::Dimension {
            value, ref unit, ..
        } => Ok(Numeric::Dimension(value, unit.as_ref().to_ascii_lowercase())),
        _ => Err(location.new_custom_error(())),
    }
}

/// First token of `raw` as a numeric value; whatever follows is ignored.
pub fn leading_numeric(raw: &str) -> Option<Numeric> {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);
    numeric(&mut parser).ok()
}

/// Items of a comma separated list. Items that fail to parse, or leave
/// tokens behind, are dropped.
pub fn comma_separated<'i, T>(
    input: &mut Parser<'i, '_>,
    mut item: impl for<'tt> FnMut(&mut Parser<'i, 'tt>) -> Result<T, ValueError<'i>>,
) -> Vec<T> {
    let mut items = Vec::new();
    loop {
        if let Ok(value) = input.parse_until_before(Delimiter::Comma, &mut item) {
            items.push(value);
        }
        if input.next().is_err() {
            return items;
        }
    }
}

/// Consume the remaining tokens of the current block or list item.
pub fn skip_rest(input: &mut Parser<'_, '_>) {
    while input.next().is_ok() {}
}

/// Source text of the next component value. A function call includes its
/// arguments and closing parenthesis.
///
/// # Errors
/// Returns an error at the end of the input.
pub fn component_text<'i>(input: &mut Parser<'i, '_>) -> Result<&'i str, ValueError<'i>> {
    let start = input.position();
    if matches!(input.next()?, Token::Function(_) | Token::ParenthesisBlock) {
        input.parse_nested_block(|block| {
            skip_rest(block);
            Ok::<(), ValueError<'i>>(())
        })?;
    }
    Ok(input.slice_from(start).trim())
}
