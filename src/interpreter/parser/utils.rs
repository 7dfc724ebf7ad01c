use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, peek_position},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// It repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
/// - `position`: Position of the list's opener, used when the stream is
///   exhausted.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - the list ends without the closing token (`ExpectedClosingParen`).
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    position: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            _ => {
                return Err(ParseError::ExpectedClosingParen { position: peek_position(tokens,
                                                                                       position) });
            },
        }
    }
    Ok(items)
}
