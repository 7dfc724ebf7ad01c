use std::collections::HashMap;

use crate::{
    ast::{Expr, Node, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::validate_function_name,
        value::{core::Value, quantity::Quantity},
    },
    literate::scope::Scope,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Named constants, resolved after the scope and before units.
pub const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                        ("e", std::f64::consts::E),
                                        ("tau", std::f64::consts::TAU),
                                        ("phi", 1.618_033_988_749_895)];

/// Stores the runtime evaluation context.
///
/// The context borrows the scope of the block being evaluated. Assignments
/// and function definitions write straight into it; the caller decides
/// whether the result is kept.
///
/// ## Usage
///
/// A `Context` is created per formula. All evaluation methods (like `eval()`
/// and `eval_statement()`) resolve and bind variables through it.
pub struct Context<'s> {
    /// The variables and functions visible to the formula.
    pub scope:      &'s mut Scope<Value>,
    /// Number of user-defined function calls currently being evaluated.
    pub call_depth: usize,
}

impl<'s> Context<'s> {
    /// Creates a context evaluating against `scope`.
    pub const fn new(scope: &'s mut Scope<Value>) -> Self {
        Self { scope,
               call_depth: 0 }
    }

    /// Evaluates a parsed formula.
    ///
    /// A sequence evaluates its statements in order and yields the value of
    /// the last one.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     interpreter::{evaluator::core::Context, parser::core::parse, value::core::Value},
    ///     literate::scope::Scope,
    /// };
    ///
    /// let mut scope = Scope::new();
    /// let node = parse("x = 3; y = x * 2").unwrap();
    ///
    /// let value = Context::new(&mut scope).eval_node(&node).unwrap();
    /// assert_eq!(value, Value::Number(6.0));
    /// assert_eq!(scope.get("x"), Some(&Value::Number(3.0)));
    /// ```
    pub fn eval_node(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Statement(statement) => self.eval_statement(statement),
            Node::Sequence(items) => {
                let mut result = None;
                for item in items {
                    result = Some(self.eval_statement(&item.statement)?);
                }
                log::trace!("sequence of {} statements evaluated", items.len());
                result.ok_or_else(|| RuntimeError::InvalidArgument { details: "empty sequence".to_string() })
            },
        }
    }

    /// Evaluates a single statement.
    ///
    /// Assignments bind the value in the scope and yield it. Function
    /// assignments store the definition under its name and yield it as a
    /// [`Value::Function`].
    ///
    /// # Errors
    /// - `BuiltinFunctionRedefinition` when a function is assigned to the
    ///   name of a builtin.
    /// - Any error produced while evaluating the right hand side.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Value> {
        match statement {
            Statement::Expression(expr) => self.eval(expr, None),
            Statement::Assignment { name, value } => {
                let value = self.eval(value, None)?;
                log::trace!("assigning {name} = {value}");
                self.scope.set(name.as_str(), value.clone());
                Ok(value)
            },
            Statement::Function(def) => {
                validate_function_name(&def.name)?;
                let value = Value::from(def.clone());
                self.scope.set(def.name.as_str(), value.clone());
                Ok(value)
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: numbers, symbols, unary and
    /// binary operations, function calls and parentheses.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `bindings`: Optional parameter bindings for function bodies.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self,
                expr: &Expr,
                bindings: Option<&HashMap<String, Value>>)
                -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Symbol(name) => self.eval_symbol(name, bindings),
            Expr::Unary { op, expr } => {
                let value = self.eval(expr, bindings)?;
                Self::eval_unary(*op, &value)
            },
            Expr::Binary { left, op, right } => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::Call { name, arguments } => self.eval_function_call(name, arguments, bindings),
            Expr::Parenthesis(inner) => self.eval(inner, bindings),
        }
    }

    /// Looks up a symbol by name.
    ///
    /// Symbol lookup checks, in order:
    /// 1. Local function bindings (when evaluating a function body).
    /// 2. Variables and functions in the scope.
    /// 3. Named constants such as `pi`.
    /// 4. Units, possibly prefixed, such as `cm`.
    ///
    /// # Errors
    /// `UndefinedSymbol` if none of these match.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    ///     literate::scope::Scope,
    /// };
    ///
    /// let mut scope = Scope::new();
    /// let context = Context::new(&mut scope);
    ///
    /// assert_eq!(context.eval_symbol("pi", None).unwrap(), Value::Number(std::f64::consts::PI));
    /// assert!(context.eval_symbol("km", None).unwrap().is_quantity());
    /// assert!(context.eval_symbol("nothing", None).is_err());
    /// ```
    pub fn eval_symbol(&self,
                       name: &str,
                       bindings: Option<&HashMap<String, Value>>)
                       -> EvalResult<Value> {
        if let Some(b) = bindings
           && let Some(value) = b.get(name)
        {
            return Ok(value.clone());
        }
        if let Some(value) = self.scope.get(name) {
            return Ok(value.clone());
        }
        if let Some((_, value)) = CONSTANTS.iter().find(|(constant, _)| *constant == name) {
            return Ok(Value::Number(*value));
        }
        Quantity::lookup(name).map(Value::Quantity)
                              .ok_or_else(|| RuntimeError::UndefinedSymbol { name: name.to_string() })
    }

    /// Looks up a callable entry: a parameter binding or a scope entry.
    pub(crate) fn lookup_callable(&self,
                                  name: &str,
                                  bindings: Option<&HashMap<String, Value>>)
                                  -> Option<Value> {
        bindings.and_then(|b| b.get(name))
                .or_else(|| self.scope.get(name))
                .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse;

    fn eval_in(scope: &mut Scope<Value>, source: &str) -> EvalResult<Value> {
        Context::new(scope).eval_node(&parse(source).unwrap())
    }

    #[test]
    fn scope_shadows_constants_and_units() {
        let mut scope = Scope::new();
        eval_in(&mut scope, "e = 2").unwrap();
        eval_in(&mut scope, "m = 7").unwrap();

        assert_eq!(eval_in(&mut scope, "e + m").unwrap(), Value::Number(9.0));
    }

    #[test]
    fn failed_statements_leave_earlier_assignments_in_the_borrowed_scope() {
        let mut scope = Scope::new();

        assert!(eval_in(&mut scope, "a = 1; b = nothing").is_err());
        assert_eq!(scope.get("a"), Some(&Value::Number(1.0)));
        assert!(!scope.contains("b"));
    }

    #[test]
    fn function_assignment_yields_the_definition() {
        let mut scope = Scope::new();
        let value = eval_in(&mut scope, "f(x) = x ^ 2").unwrap();

        assert_eq!(value.to_string(), "f(x)");
        assert_eq!(eval_in(&mut scope, "f(3)").unwrap(), Value::Number(9.0));
    }

    #[test]
    fn builtin_names_cannot_be_redefined() {
        let mut scope = Scope::new();

        assert_eq!(eval_in(&mut scope, "sqrt(x) = x"),
                   Err(RuntimeError::BuiltinFunctionRedefinition { name: "sqrt".to_string() }));
    }
}
