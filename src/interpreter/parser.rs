/// Parser entry points.
///
/// Parses a whole formula into a [`crate::ast::Node`], splitting it into
/// statements at `;` and newlines.
pub mod core;

/// Statement parsing.
///
/// Recognizes assignments and function assignments on top of a parsed
/// expression.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence levels from unit conversion down to
/// exponentiation, including implicit multiplication.
pub mod binary;

/// Unary operator and primary expression parsing.
///
/// Handles prefix signs, postfix factorials, numbers, symbols, function calls
/// and parentheses.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides the comma-separated list parser shared by calls.
pub mod utils;
