use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - an assignment `name = expression`,
/// - a function assignment `name(a, b) = expression`,
/// - an expression used as a statement.
///
/// The left hand side is parsed as an ordinary expression first; only when it
/// is followed by `=` is it reinterpreted as an assignment target.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, position)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns `ParseError::InvalidAssignmentTarget` if `=` follows anything but
/// a symbol or a call whose arguments are all symbols, and propagates errors
/// from expression parsing.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_expression(tokens, 0)?;

    let Some((Token::Equals, position)) = tokens.peek() else {
        return Ok(Statement::Expression(target));
    };
    let position = *position;
    tokens.next();

    let value = parse_expression(tokens, 0)?;

    match target {
        Expr::Symbol(name) => Ok(Statement::Assignment { name, value }),
        Expr::Call { name, arguments } => {
            let params = arguments.into_iter()
                                  .map(|argument| match argument {
                                      Expr::Symbol(param) => Ok(param),
                                      _ => Err(ParseError::InvalidAssignmentTarget { position }),
                                  })
                                  .collect::<ParseResult<Vec<_>>>()?;

            Ok(Statement::Function(FunctionDef { name,
                                                 params,
                                                 body: value }))
        },
        _ => Err(ParseError::InvalidAssignmentTarget { position }),
    }
}
