use serde::Serialize;

use crate::{
    error::{BlockError, EvaluationError},
    literate::{
        engine::{Engine, EngineNode, EngineValue, NodeKind, Notation, ValueOf},
        grammar::{NumberFormat, ParsedFormat, ShowResult, UnitPolicy, parse_body},
        number_format::format_number,
        scope::Scope,
    },
    util::num::to_js_string,
};

/// Separator between the displayed parts of a block.
const PART_SEPARATOR: &str = " = ";

/// The evaluated form of one body.
///
/// A block is immutable; it only exposes the body it was built from and its
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    body:    String,
    #[serde(flatten)]
    outcome: Outcome,
}

/// How the evaluation of a body ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// The body was evaluated; `display_result` is `None` for silent blocks.
    Ok {
        /// The formula without its format prefix.
        formula:        String,
        /// The display format from the prefix.
        format:         ParsedFormat,
        /// The text to show in place of the body.
        display_result: Option<String>,
    },
    /// The body failed; nothing of it is shown but the message.
    Error {
        /// The error message.
        message: String,
    },
}

/// A block together with the scope to hand to the next body.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated<V> {
    /// The evaluated block.
    pub block: Block,
    /// The scope after this block: updated on success, unchanged on error.
    pub scope: Scope<V>,
}

impl Block {
    /// Evaluates one body against the scope left by the previous body.
    ///
    /// The body's format prefix is parsed, the formula is parsed and
    /// evaluated on a private copy of `previous_scope`, and the requested
    /// parts are rendered and joined with `" = "`. On success the updated
    /// copy is returned; on any failure the returned scope equals
    /// `previous_scope`, so a failing body never leaks partial assignments.
    ///
    /// # Parameters
    /// - `engine`: The expression language.
    /// - `body`: The raw body, e.g. `$@= x = 3 m`.
    /// - `previous_scope`: The scope left by the previous body.
    ///
    /// # Returns
    /// The block and the scope for the next body.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     interpreter::Interpreter,
    ///     literate::{block::Block, scope::Scope},
    /// };
    ///
    /// let first = Block::evaluate(&Interpreter, "!x = 4", &Scope::new());
    /// let second = Block::evaluate(&Interpreter, "@= x ^ 2", &first.scope);
    ///
    /// assert_eq!(second.block.display_result(), Some("x ^ 2 = 16"));
    /// ```
    pub fn evaluate<E: Engine>(engine: &E,
                               body: &str,
                               previous_scope: &Scope<ValueOf<E>>)
                               -> Evaluated<ValueOf<E>> {
        let mut working = previous_scope.clone();
        match run(engine, body, &mut working) {
            Ok((formula, format, display_result)) => {
                log::debug!("block {body:?} displays {display_result:?}");
                Evaluated { block: Self { body:    body.to_string(),
                                          outcome: Outcome::Ok { formula,
                                                                 format,
                                                                 display_result }, },
                            scope: working, }
            },
            Err(error) => {
                log::debug!("block {body:?} failed: {error}");
                Evaluated { block: Self::error(body, &error),
                            scope: previous_scope.clone(), }
            },
        }
    }

    /// The raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The outcome of the evaluation.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the block ended in an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    /// The displayed text of a successful, non-silent block.
    #[must_use]
    pub fn display_result(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Ok { display_result, .. } => display_result.as_deref(),
            Outcome::Error { .. } => None,
        }
    }

    /// The error message of a failed block.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Ok { .. } => None,
            Outcome::Error { message } => Some(message),
        }
    }

    /// The text shown in place of the body: the display result, the error
    /// message, or nothing for silent blocks.
    #[must_use]
    pub fn rendered(&self) -> &str {
        match &self.outcome {
            Outcome::Ok { display_result, .. } => display_result.as_deref().unwrap_or_default(),
            Outcome::Error { message } => message,
        }
    }

    fn error(body: &str, error: &BlockError) -> Self {
        Self { body:    body.to_string(),
               outcome: Outcome::Error { message: error.to_string() }, }
    }
}

/// Runs the pipeline on `scope`, returning the formula, its format and the
/// display text.
fn run<E: Engine>(engine: &E,
                  body: &str,
                  scope: &mut Scope<ValueOf<E>>)
                  -> Result<(String, ParsedFormat, Option<String>), BlockError> {
    let parsed = parse_body(body)?;
    log::trace!("body {body:?} has format {:?} and formula {:?}",
                parsed.format,
                parsed.formula);

    let node = engine.parse(&parsed.formula)?;
    let value = node.evaluate(scope)?;
    if parsed.format.is_silent() {
        return Ok((parsed.formula, parsed.format, None));
    }

    let display = display(&node, &value, &parsed.format)?;
    Ok((parsed.formula, parsed.format, Some(display)))
}

/// Builds the display text of a non-silent block.
fn display<N: EngineNode>(node: &N,
                          value: &N::Value,
                          format: &ParsedFormat)
                          -> Result<String, EvaluationError> {
    let kind = node.kind();
    log::trace!("formula {node} is {kind:?}");
    match kind {
        NodeKind::Statements(count) if count > 1 => {
            return Err(EvaluationError::MultipleStatements);
        },
        NodeKind::FunctionAssignment => return Err(EvaluationError::FunctionAssignment),
        _ => {},
    }

    let mut parts = Vec::new();
    if format.show_assign {
        match kind {
            NodeKind::Assignment { name, .. } => parts.push(name.to_string()),
            _ => return Err(EvaluationError::NoAssignment),
        }
    }
    if format.show_expression {
        match kind {
            NodeKind::Assignment { value, .. } => parts.push(value.to_string()),
            _ => parts.push(node.to_string()),
        }
    }
    if let ShowResult::Enabled { unit, number_format } = &format.show_result {
        let converted = apply_unit_policy(value, unit)?;
        parts.push(render_result(&converted, *number_format));
    }
    Ok(parts.join(PART_SEPARATOR))
}

/// Converts the result as requested by the unit policy.
///
/// Values that are neither plain numbers nor carry a unit pass through.
fn apply_unit_policy<V: EngineValue>(value: &V, unit: &UnitPolicy) -> Result<V, EvaluationError> {
    if value.has_unit() {
        return match unit {
            UnitPolicy::Unitless => {
                Err(EvaluationError::UnitlessConversion { value: value.to_string() })
            },
            UnitPolicy::Auto => Ok(value.to_best()),
            UnitPolicy::Named(unit) => value.to_unit(unit),
        };
    }
    if let Some(number) = value.scalar()
       && let UnitPolicy::Named(unit) = unit
    {
        return Err(EvaluationError::UnitOnScalar { unit:  unit.clone(),
                                                   value: to_js_string(number), });
    }
    Ok(value.clone())
}

fn render_result<V: EngineValue>(value: &V, number_format: NumberFormat) -> String {
    match number_format {
        NumberFormat::Fixed(digits) => value.render(Notation::Fixed, digits),
        NumberFormat::General(digits) => value.render(Notation::Exponential, digits),
        NumberFormat::Auto if value.scalar().is_some() => value.render_with(&format_number),
        NumberFormat::Auto => value.to_string(),
    }
}
