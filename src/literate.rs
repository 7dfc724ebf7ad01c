/// The body grammar.
///
/// Splits a raw body such as `$@={.2f; km} d = 5 m` into its display-format
/// descriptor and the formula text that follows it.
///
/// # Responsibilities
/// - Recognizes the `!`, `$`, `@` and `=` prefix markers.
/// - Parses the optional `{number format; unit}` clause of the result marker.
/// - Rejects malformed number formats and forbidden unit characters.
pub mod grammar;
/// Default rendering of plain numbers in results.
pub mod number_format;
/// The capability an expression backend must provide.
///
/// The block evaluator only ever talks to an expression language through
/// these traits: parsing text into a node, classifying and rendering that
/// node, evaluating it against a scope and converting or rendering the
/// resulting value.
pub mod engine;
/// Variable bindings threaded from block to block.
pub mod scope;
/// Evaluation of a single body.
///
/// Runs grammar, parsing, evaluation and formatting for one body and decides
/// which scope is handed on: the updated one on success, an untouched copy of
/// the incoming one on any failure.
///
/// # Responsibilities
/// - Orchestrates the pipeline for one body.
/// - Enforces the display constraints (single statement, no function
///   assignment, `$` only for assignments).
/// - Applies the requested unit policy and number format.
pub mod block;
/// Evaluation of an ordered sequence of bodies sharing one scope.
pub mod chain;
