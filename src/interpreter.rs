use crate::{
    ast::{Node, Statement},
    error::EvaluationError,
    interpreter::{evaluator::core::Context, parser::core::parse, value::core::Value},
    literate::{
        engine::{Engine, EngineNode, NodeKind},
        scope::Scope,
    },
};

/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic on numbers and quantities, binds variables and
/// functions in the scope, and produces results.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Resolves symbols to variables, constants and units.
/// - Reports runtime errors such as unknown symbols or mismatched units.
pub mod evaluator;
/// The lexer module tokenizes formulas for further parsing.
///
/// The lexer (tokenizer) reads the raw formula text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their character
///   position.
/// - Handles numeric literals, identifiers, operators and separators.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with positions.
/// - Supports arithmetic, implicit multiplication, unit conversion, function
///   calls and assignments.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a formula evaluates to: plain numbers,
/// physical quantities and user-defined functions, together with the unit
/// registry quantities are built from.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements unit arithmetic, conversion and formatting.
/// - Parses unit strings used as conversion targets.
pub mod value;

/// The built-in expression language.
///
/// Parses formulas such as `x = 3 m / 6` or `f(x) = x ^ 2` and evaluates them
/// with support for units.
///
/// # Example
/// ```
/// use lmath::{
///     interpreter::Interpreter,
///     literate::{
///         engine::{Engine, EngineNode},
///         scope::Scope,
///     },
/// };
///
/// let node = Interpreter.parse("3 m + 20 cm").unwrap();
/// let value = node.evaluate(&mut Scope::new()).unwrap();
///
/// assert_eq!(node.to_string(), "3 m + 20 cm");
/// assert_eq!(value.to_string(), "3.2 m");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter;

impl Engine for Interpreter {
    type Node = Node;

    fn parse(&self, text: &str) -> Result<Node, EvaluationError> {
        let node = parse(text)?;
        log::trace!("parsed {text:?} as {node:?}");
        Ok(node)
    }
}

impl EngineNode for Node {
    type Value = Value;

    fn kind(&self) -> NodeKind<'_> {
        match self {
            Self::Statement(Statement::Expression(_)) => NodeKind::Plain,
            Self::Statement(Statement::Assignment { name, value }) => {
                NodeKind::Assignment { name, value }
            },
            Self::Statement(Statement::Function(_)) => NodeKind::FunctionAssignment,
            Self::Sequence(items) => NodeKind::Statements(items.len()),
        }
    }

    fn evaluate(&self, scope: &mut Scope<Value>) -> Result<Value, EvaluationError> {
        Ok(Context::new(scope).eval_node(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_classify_by_statement_shape() {
        let kind = |text: &str| format!("{:?}", Interpreter.parse(text).unwrap().kind());

        assert_eq!(kind("3 + 4"), "Plain");
        assert_eq!(kind("x = 3 m"), "Assignment { name: \"x\", value: \"3 m\" }");
        assert_eq!(kind("f(x) = 3"), "FunctionAssignment");
        assert_eq!(kind("x = 3; y = 5"), "Statements(2)");
        assert_eq!(kind("x = 3;"), "Statements(1)");
    }

    #[test]
    fn parse_errors_carry_their_message() {
        let error = Interpreter.parse("3 +").unwrap_err();

        assert!(matches!(error, EvaluationError::Parse(_)));
        assert!(error.to_string().starts_with("Unexpected end of expression"));
    }
}
