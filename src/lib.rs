//! # lmath
//!
//! lmath evaluates literate math: short annotated formulas embedded in a
//! document, such as `$@={.2f; km} d = 5 m * 300`. Each body carries a small
//! prefix that says what to show (the assigned name, the formula, the result)
//! and how to format the result, followed by a formula in an expression
//! language with units. Bodies are evaluated in document order and share one
//! variable scope; a failing body shows its error and leaves the scope as it
//! was.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    interpreter::{Interpreter, value::core::Value},
    literate::{
        block::{Block, Evaluated},
        chain::{Chain, evaluate_chain},
        scope::Scope,
    },
};

/// Defines the structure of parsed formulas.
///
/// This module declares the `Expr`, `Statement` and `Node` types that
/// represent a formula as a tree. The AST is built by the parser, traversed
/// by the evaluator and rendered back to text for display.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Renders nodes in their canonical, spaced string form.
pub mod ast;
/// Provides unified error types for the body grammar, parsing and
/// evaluation.
///
/// This module defines all errors that can be raised while handling a body.
/// Every error renders as the message shown in place of a failed block.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (grammar, parser, evaluator,
///   display).
/// - Maps backend errors into the errors seen by the block evaluator.
pub mod error;
/// The built-in expression language with units.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations, and exposes them through the [`Interpreter`] engine.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Implements the engine traits used by the block evaluator.
pub mod interpreter;
/// Literate evaluation of annotated bodies.
///
/// This module turns raw bodies into blocks: it parses the display prefix,
/// hands the formula to an engine, applies the display rules and threads the
/// scope from one body to the next.
///
/// # Responsibilities
/// - Parses display prefixes and result formats.
/// - Evaluates single bodies with rollback on failure.
/// - Evaluates whole documents in order.
pub mod literate;
/// General utilities for number rendering.
///
/// This module provides the textual renderings of numbers used by the AST,
/// the quantity formatter and the block evaluator.
pub mod util;

/// Evaluates one body with the built-in expression language.
///
/// # Parameters
/// - `body`: The raw body, e.g. `@= x ^ 2`.
/// - `previous_scope`: The scope left by the previous body.
///
/// # Returns
/// The block and the scope to hand to the next body.
///
/// # Examples
/// ```
/// use lmath::{evaluate_block, literate::scope::Scope};
///
/// let first = evaluate_block("x = 3 m / 6", &Scope::new());
/// let second = evaluate_block("= x ^ 2 + 5 cm^2", &first.scope);
///
/// assert_eq!(second.block.display_result(), Some("0.2505 m^2"));
///
/// // Failures show their message and keep the scope untouched.
/// let failed = evaluate_block("={;-} y = 3 m", &second.scope);
/// assert_eq!(failed.block.error_message(),
///            Some("Failed to convert \"3 m\" into a unitless number"));
/// assert!(!failed.scope.contains("y"));
/// ```
#[must_use]
pub fn evaluate_block(body: &str, previous_scope: &Scope<Value>) -> Evaluated<Value> {
    Block::evaluate(&Interpreter, body, previous_scope)
}

/// Evaluates the bodies of a document in order with the built-in expression
/// language.
///
/// # Examples
/// ```
/// use lmath::evaluate_document;
///
/// let chain = evaluate_document(["!rate = 36 km / h", "={;m/s} rate"]);
///
/// assert_eq!(chain.blocks()[0].display_result(), None);
/// assert_eq!(chain.blocks()[1].display_result(), Some("10 m / s"));
/// ```
#[must_use]
pub fn evaluate_document<I, S>(bodies: I) -> Chain<Value>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    evaluate_chain(&Interpreter, bodies)
}
