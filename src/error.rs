/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of a
/// formula. Parse errors include unexpected tokens, missing operands, missing
/// parentheses and invalid assignment targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// formula: unknown symbols, type mismatches, incompatible units and failed
/// function calls.
pub mod runtime_error;
/// Result format errors.
///
/// Raised by the body grammar when an explicit `={...}` clause is malformed.
pub mod result_format_error;
/// Evaluation errors.
///
/// Everything that can go wrong after the body grammar accepted a body: the
/// backend's parse and runtime errors, plus the display constraints checked
/// by the block evaluator.
pub mod evaluation_error;
/// The union of the two error kinds a block can end in.
pub mod block_error;

pub use block_error::BlockError;
pub use evaluation_error::EvaluationError;
pub use parse_error::ParseError;
pub use result_format_error::ResultFormatError;
pub use runtime_error::RuntimeError;
