use thiserror::Error;

use crate::error::{ParseError, RuntimeError};

/// Any failure after the body grammar accepted a body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The formula could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The formula could not be evaluated, or its value could not be
    /// converted.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A displayed formula consists of more than one statement.
    #[error("Multiple statements not allowed inline with output")]
    MultipleStatements,
    /// A displayed formula is a function assignment.
    #[error("Function assignments not allowed inline with output")]
    FunctionAssignment,
    /// `$` was requested for a formula that assigns nothing.
    #[error("Cannot show assignment ($) when formula has no assignment")]
    NoAssignment,
    /// `-` was requested for a value that carries a unit.
    #[error("Failed to convert \"{value}\" into a unitless number")]
    UnitlessConversion {
        /// The value as it would have been displayed.
        value: String,
    },
    /// A unit was named for a plain number.
    #[error("Failed to apply unit \"{unit}\" to the unitless number {value}")]
    UnitOnScalar {
        /// The requested unit.
        unit:  String,
        /// The plain number.
        value: String,
    },
}
