use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_exponent,
            core::{MAX_NESTING_DEPTH, ParseResult, parse_expression, peek_position},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (negation) and `+`. Unary operators are
/// right-associative and bind looser than exponentiation, so `-x ^ 2` parses
/// as `-(x ^ 2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | exponent
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Nesting depth; each prefix operator, exponent, call and
///   parenthesis adds one.
///
/// # Returns
/// An [`Expr::Unary`] or an exponent-level expression.
///
/// # Errors
/// `NestingTooDeep` once `depth` exceeds [`MAX_NESTING_DEPTH`].
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep { position: peek_position(tokens, 0) });
    }

    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_exponent(tokens, depth),
    };
    tokens.next();
    let expr = parse_unary(tokens, depth + 1)?;
    Ok(Expr::Unary { op,
                     expr: Box::new(expr) })
}

/// Parses postfix factorials applied to a primary expression.
///
/// Every `!` wraps the expression parsed so far, so `3!!` is `(3!)!`.
///
/// Grammar:
/// ```text
///     postfix := primary "!"*
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at a primary expression.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// The primary [`Expr`] with all factorials folded in.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens, depth)?;
    while let Some((Token::Bang, _)) = tokens.peek() {
        tokens.next();
        node = Expr::Unary { op:   UnaryOperator::Factorial,
                             expr: Box::new(node), };
    }
    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - symbols
/// - function calls
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | IDENTIFIER ("(" arguments ")")?
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the formula ends here.
/// - `ValueExpected` for any other token that cannot start an operand.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(n), _)) => Ok(Expr::Number(*n)),
        Some((Token::Identifier(name), position)) => {
            parse_symbol_or_call(tokens, name.clone(), *position, depth)
        },
        Some((Token::LParen, position)) => parse_grouping(tokens, *position, depth),
        Some((Token::End, position)) => Err(ParseError::UnexpectedEndOfInput { position: *position }),
        Some((_, position)) => Err(ParseError::ValueExpected { position: *position }),
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses either a symbol or, if the name is followed by `(`, a function
/// call.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the identifier.
/// - `name`: The identifier.
/// - `position`: The identifier's position.
/// - `depth`: Nesting depth of the call.
///
/// # Returns
/// An [`Expr::Symbol`] or [`Expr::Call`].
fn parse_symbol_or_call<'a, I>(tokens: &mut Peekable<I>,
                               name: String,
                               position: usize,
                               depth: usize)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              |tokens| parse_expression(tokens, depth + 1),
                                              &Token::RParen,
                                              position)?;
        return Ok(Expr::Call { name, arguments });
    }
    Ok(Expr::Symbol(name))
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// The opening parenthesis has already been consumed. The enclosed expression
/// is wrapped in [`Expr::Parenthesis`] so that it is rendered as written.
///
/// Grammar `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `(`.
/// - `position`: Position of the opening parenthesis.
/// - `depth`: Nesting depth outside the parentheses.
///
/// # Returns
/// The parenthesized expression.
///
/// # Errors
/// `ParseError::ExpectedClosingParen` if the expression is not followed by
/// `)`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>,
                         position: usize,
                         depth: usize)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, depth + 1)?;
    match tokens.peek() {
        Some((Token::RParen, _)) => {
            tokens.next();
            Ok(Expr::Parenthesis(Box::new(expr)))
        },
        _ => Err(ParseError::ExpectedClosingParen { position: peek_position(tokens, position) }),
    }
}
