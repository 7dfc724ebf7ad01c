use thiserror::Error;

use crate::error::{EvaluationError, ResultFormatError};

/// The reason a block ended in its error outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The body's `={...}` clause was malformed.
    #[error(transparent)]
    Format(#[from] ResultFormatError),
    /// Parsing, evaluating or displaying the formula failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
