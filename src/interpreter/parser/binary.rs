use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_postfix, parse_unary},
        },
    },
};

/// Parses unit conversion expressions.
///
/// Handles the left-associative `to` operator (also spelled `in`). The
/// right hand side is an ordinary additive expression, so compound targets
/// such as `km / h` need no parentheses. An `in` that ends the expression is
/// the unit inch instead, so `2.5 in` multiplies by `in`.
///
/// The rule is: `conversion := additive ("to" additive)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_conversion<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens, depth)?;
    loop {
        let spelled_in = match tokens.peek() {
            Some((Token::To, _)) => false,
            Some((Token::In, _)) => true,
            _ => break,
        };
        if spelled_in && ends_expression(tokens) {
            tokens.next();
            left = binary(left, BinaryOperator::ImplicitMul, Expr::Symbol("in".to_string()));
            continue;
        }
        tokens.next();
        let right = parse_additive(tokens, depth)?;
        left = binary(left, BinaryOperator::Convert, right);
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, depth)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, depth)?;
            left = binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/` and `%`.
///
/// The rule is: `multiplicative := implicit (("*" | "/" | "%") implicit)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// A binary expression tree combining implicit-multiplication nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_implicit_multiplication(tokens, depth)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            tokens.next();
            let right = parse_implicit_multiplication(tokens, depth)?;
            left = binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication by juxtaposition.
///
/// A factor is implicitly multiplied with the next one when the next token
/// is an identifier (`5 cm`, `2 x`), an opening parenthesis (`3 (x + 1)`) or
/// a number following something that is not itself a number or an operator
/// (`x 2`, `(1 + 2) 3`, `3! 2`).
///
/// The rule is: `implicit := unary (unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// A left-associative chain of `BinaryOperator::ImplicitMul` nodes.
pub fn parse_implicit_multiplication<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, depth)?;
    loop {
        let juxtaposed = match tokens.peek() {
            Some((Token::Identifier(_) | Token::LParen, _)) => true,
            Some((Token::Number(_), _)) => accepts_implicit_number(&left),
            _ => false,
        };
        if !juxtaposed {
            break;
        }
        let right = parse_unary(tokens, depth)?;
        left = binary(left, BinaryOperator::ImplicitMul, right);
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// The base is a postfix expression; the exponent is parsed as a unary
/// expression, which makes `^` right-associative (`a ^ b ^ c` parses as
/// `a ^ (b ^ c)`) and allows signed exponents such as `2 ^ -3`.
///
/// The rule is: `exponent := postfix ("^" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `depth`: Current nesting depth; the exponent is one deeper.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix(tokens, depth)?;
    if let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, depth + 1)?;
        return Ok(binary(base, BinaryOperator::Pow, exponent));
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Implicit multiplication has no token and is never returned.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use lmath::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Caret), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::To), Some(BinaryOperator::Convert));
/// assert_eq!(token_to_binary_operator(&Token::In), Some(BinaryOperator::Convert));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::To | Token::In => Some(BinaryOperator::Convert),
        _ => None,
    }
}

/// Whether the token after the next one closes the current expression.
fn ends_expression<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ahead = tokens.clone();
    ahead.next();
    matches!(ahead.next(),
             None
             | Some((Token::End | Token::Semicolon | Token::NewLine | Token::RParen | Token::Comma,
                     _)))
}

/// Whether a number literal may directly follow `left` as an implicit
/// factor.
const fn accepts_implicit_number(left: &Expr) -> bool {
    match left {
        Expr::Number(_) | Expr::Binary { .. } => false,
        Expr::Unary { op, .. } => matches!(op, UnaryOperator::Factorial),
        Expr::Symbol(_) | Expr::Call { .. } | Expr::Parenthesis(_) => true,
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right) }
}
