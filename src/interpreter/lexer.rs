use std::fmt;

use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult, util::num::format_auto};

/// Represents a lexical token of a formula.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Every token is paired with the 1-based character position it starts at;
/// [`tokenize`] appends a trailing [`Token::End`] carrying the position just
/// past the last character.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f\r]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// `to`, denoting unit conversion.
    #[token("to")]
    To,
    /// `in`, denoting unit conversion, or the unit inch at the end of an
    /// expression.
    #[token("in")]
    In,
    /// Identifier tokens; variable, function, constant or unit names such as
    /// `x`, `sqrt` or `cm`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`, terminating a hidden statement.
    #[token(";")]
    Semicolon,
    /// A line break, terminating a visible statement.
    #[token("\n")]
    NewLine,
    /// End of the formula. Never produced by the lexer itself.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_auto(*n)),
            Self::To => write!(f, "to"),
            Self::In => write!(f, "in"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::Bang => write!(f, "!"),
            Self::Equals => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::NewLine => write!(f, "\\n"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Splits a formula into positioned tokens.
///
/// # Parameters
/// - `source`: The formula text.
///
/// # Returns
/// The tokens paired with their 1-based character positions, always
/// terminated by [`Token::End`].
///
/// # Errors
/// `ParseError::UnexpectedCharacter` for text that forms no token.
///
/// # Example
/// ```
/// use lmath::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("5 cm").unwrap();
///
/// assert_eq!(tokens,
///            vec![(Token::Number(5.0), 1),
///                 (Token::Identifier("cm".to_string()), 3),
///                 (Token::End, 5)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = char_position(source, lexer.span().start);
        if let Ok(tok) = token {
            tokens.push((tok, position));
        } else {
            return Err(ParseError::UnexpectedCharacter { token: lexer.slice().to_string(),
                                                         position });
        }
    }

    tokens.push((Token::End, source.chars().count() + 1));
    Ok(tokens)
}

/// Converts a byte offset into a 1-based character position.
fn char_position(source: &str, byte_offset: usize) -> usize {
    source.get(..byte_offset)
          .map_or(byte_offset, |prefix| prefix.chars().count())
    + 1
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
