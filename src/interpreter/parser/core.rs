use std::iter::Peekable;

use crate::{
    ast::{Expr, Node, SequenceItem},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_conversion, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of parentheses, calls, prefix operators and exponents
/// accepted in a formula.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parses a full formula.
///
/// This is the entry point for formula parsing: the text is tokenized and
/// handed to [`parse_program`].
///
/// # Parameters
/// - `source`: The formula text.
///
/// # Returns
/// The parsed [`Node`].
///
/// # Example
/// ```
/// use lmath::{ast::Node, interpreter::parser::core::parse};
///
/// assert!(matches!(parse("x = 3").unwrap(), Node::Statement(_)));
/// assert!(matches!(parse("x = 3; y = 5").unwrap(), Node::Sequence(items) if items.len() == 2));
/// assert!(parse("3 +").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Node> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    parse_program(&mut iter)
}

/// Parses a sequence of statements up to [`Token::End`].
///
/// Statements are separated by `;`, which hides the preceding statement, or
/// by a newline, which keeps it visible. Empty statements between separators
/// are skipped. A formula with exactly one statement and no separator yields
/// [`Node::Statement`]; every other formula yields [`Node::Sequence`].
///
/// Grammar: `program := statement? ((";" | "\n") statement?)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
///
/// # Returns
/// The parsed [`Node`].
///
/// # Errors
/// - `EmptyExpression` if the formula holds no statement at all.
/// - `UnexpectedToken` if a statement is followed by anything but a
///   separator.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    let mut separated = false;

    loop {
        match tokens.peek() {
            Some((Token::End, _)) | None => break,
            Some((Token::Semicolon | Token::NewLine, _)) => {
                tokens.next();
                separated = true;
                continue;
            },
            Some(_) => {},
        }

        let statement = parse_statement(tokens)?;
        let visible = match tokens.peek() {
            Some((Token::Semicolon, _)) => {
                tokens.next();
                separated = true;
                false
            },
            Some((Token::NewLine, _)) => {
                tokens.next();
                separated = true;
                true
            },
            Some((Token::End, _)) | None => true,
            Some((tok, position)) => {
                return Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                         position: *position, });
            },
        };
        items.push(SequenceItem { statement, visible });
    }

    if items.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    if !separated && items.len() == 1 {
        return Ok(Node::Statement(items.remove(0).statement));
    }
    Ok(Node::Sequence(items))
}

/// Parses a full expression.
///
/// Expressions start at the lowest-precedence operator, unit conversion, and
/// recursively descend through the precedence hierarchy.
///
/// Grammar: `expression := conversion`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `depth`: Nesting depth of the expression; `0` at statement level.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_conversion(tokens, depth)
}

/// Returns the position of the next token, or `fallback` when the stream is
/// exhausted.
pub(in crate::interpreter::parser) fn peek_position<'a, I>(tokens: &mut Peekable<I>,
                                                           fallback: usize)
                                                           -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(fallback, |(_, position)| *position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        assert!(parse(&nested(MAX_NESTING_DEPTH)).is_ok());
        assert!(parse(&format!("{}1", "-".repeat(MAX_NESTING_DEPTH))).is_ok());
    }

    #[test]
    fn deeper_nesting_is_rejected() {
        assert_eq!(parse(&nested(200)),
                   Err(ParseError::NestingTooDeep { position: MAX_NESTING_DEPTH + 2 }));
        assert!(matches!(parse(&format!("{}1", "-".repeat(1000))),
                         Err(ParseError::NestingTooDeep { .. })));
        assert!(matches!(parse(&format!("2{}", "^2".repeat(1000))),
                         Err(ParseError::NestingTooDeep { .. })));
    }
}
