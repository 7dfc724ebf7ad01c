use std::fmt;

use crate::{error::EvaluationError, literate::scope::Scope};

/// The shape of a parsed formula, as far as display rules care.
#[derive(Clone, Copy)]
pub enum NodeKind<'n> {
    /// A single expression.
    Plain,
    /// `name = value`.
    Assignment {
        /// The assigned name.
        name:  &'n str,
        /// The assigned expression.
        value: &'n dyn fmt::Display,
    },
    /// `name(params) = body`.
    FunctionAssignment,
    /// A sequence of statements separated by `;` or newlines.
    Statements(usize),
}

impl fmt::Debug for NodeKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Assignment { name, value } => {
                write!(f, "Assignment {{ name: {name:?}, value: {:?} }}", value.to_string())
            },
            Self::FunctionAssignment => f.write_str("FunctionAssignment"),
            Self::Statements(count) => write!(f, "Statements({count})"),
        }
    }
}

/// Notation of an explicitly formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Fixed notation with a number of decimals.
    Fixed,
    /// Exponential notation with a number of significant digits.
    Exponential,
}

/// A value produced by evaluating a node.
pub trait EngineValue: Clone + fmt::Display {
    /// Whether the value carries a unit.
    fn has_unit(&self) -> bool;

    /// The value as a plain number, if it is one.
    fn scalar(&self) -> Option<f64>;

    /// Converts the value to the unit described by `unit`.
    ///
    /// Fails if the unit is unknown, malformed or of different dimensions.
    fn to_unit(&self, unit: &str) -> Result<Self, EvaluationError>;

    /// Expresses a unit-carrying value in its most readable unit; other
    /// values are returned unchanged.
    fn to_best(&self) -> Self;

    /// Renders the numeric part in the given notation, keeping any unit.
    fn render(&self, notation: Notation, digits: usize) -> String;

    /// Renders the numeric part with `format`, keeping any unit.
    fn render_with(&self, format: &dyn Fn(f64) -> String) -> String;
}

/// A parsed formula.
///
/// The [`Display`](fmt::Display) form is the formula's canonical string form,
/// which is what `@` shows.
pub trait EngineNode: fmt::Display {
    /// The values this node evaluates to.
    type Value: EngineValue;

    /// Classifies the node.
    fn kind(&self) -> NodeKind<'_>;

    /// Evaluates the node, applying assignments to `scope`.
    ///
    /// # Returns
    /// The value of the node; for a statement sequence the value of its last
    /// statement.
    fn evaluate(&self, scope: &mut Scope<Self::Value>) -> Result<Self::Value, EvaluationError>;
}

/// An expression language usable by the block evaluator.
pub trait Engine {
    /// The parsed form of a formula.
    type Node: EngineNode;

    /// Parses a formula.
    fn parse(&self, text: &str) -> Result<Self::Node, EvaluationError>;
}

/// The value type of an engine.
pub type ValueOf<E> = <<E as Engine>::Node as EngineNode>::Value;
