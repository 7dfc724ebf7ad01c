use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every position is a 1-based character offset into the formula text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer found characters that do not form any token.
    #[error("Syntax error in part \"{token}\" (char {position})")]
    UnexpectedCharacter {
        /// The unrecognized slice of text.
        token:    String,
        /// Where the slice starts.
        position: usize,
    },
    /// Found a token that cannot appear at this point.
    #[error("Unexpected \"{token}\" (char {position})")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Where the token starts.
        position: usize,
    },
    /// An operand was expected but an operator or delimiter was found.
    #[error("Value expected (char {position})")]
    ValueExpected {
        /// Where the operand was expected.
        position: usize,
    },
    /// The formula ended while an operand was still expected.
    #[error("Unexpected end of expression (char {position})")]
    UnexpectedEndOfInput {
        /// The position just past the end of the formula.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Parenthesis ) expected (char {position})")]
    ExpectedClosingParen {
        /// Where the parenthesis was expected.
        position: usize,
    },
    /// The left hand side of `=` is neither a symbol nor a function
    /// signature.
    #[error("Invalid left hand side of assignment operator = (char {position})")]
    InvalidAssignmentTarget {
        /// The position of the `=` token.
        position: usize,
    },
    /// Parentheses, calls, prefix operators or exponents are nested too
    /// deeply.
    #[error("Expression nested too deeply (char {position})")]
    NestingTooDeep {
        /// Where the limit was exceeded.
        position: usize,
    },
    /// The formula contains nothing to evaluate.
    #[error("Empty expression")]
    EmptyExpression,
}
