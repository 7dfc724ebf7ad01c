use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, log, min_max, sqrt},
        },
        value::core::Value,
    },
};

/// Deepest nesting of user-defined function calls before evaluation fails.
pub const MAX_CALL_DEPTH: usize = 256;

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and returns the
/// result wrapped in `EvalResult`.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with at least `n` arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an accepted arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt"  => { arity: Arity::Exact(1), func: sqrt::sqrt },
    "abs"   => { arity: Arity::Exact(1), func: builtin::abs },
    "exp"   => { arity: Arity::Exact(1), func: builtin::exp },
    "log"   => { arity: Arity::OneOf(&[1, 2]), func: log::log },
    "log10" => { arity: Arity::Exact(1), func: builtin::log10 },
    "log2"  => { arity: Arity::Exact(1), func: builtin::log2 },
    "sin"   => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"   => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"   => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"  => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"  => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"  => { arity: Arity::Exact(1), func: builtin::atan },
    "floor" => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"  => { arity: Arity::Exact(1), func: builtin::ceil },
    "round" => { arity: Arity::OneOf(&[1, 2]), func: builtin::round },
    "sign"  => { arity: Arity::Exact(1), func: builtin::sign },
    "min"   => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("min", args) },
    "max"   => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("max", args) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Describes the accepted counts for error messages.
    fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => arr.iter()
                                   .map(ToString::to_string)
                                   .collect::<Vec<_>>()
                                   .join(" or "),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

/// Returns `true` if `name` is a builtin function.
///
/// # Example
/// ```
/// use lmath::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("sqrt"));
/// assert!(!is_builtin("f"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl Context<'_> {
    /// Evaluates a function call expression.
    ///
    /// The arguments are evaluated left to right with the current bindings,
    /// then the call is dispatched by [`Context::eval_function`].
    pub fn eval_function_call(&mut self,
                              name: &str,
                              arguments: &[Expr],
                              bindings: Option<&HashMap<String, Value>>)
                              -> EvalResult<Value> {
        let arg_vals = arguments.iter()
                                .map(|argument| self.eval(argument, bindings))
                                .collect::<EvalResult<Vec<_>>>()?;
        self.eval_function(name, arg_vals, bindings)
    }

    /// Evaluates a function call with evaluated arguments.
    ///
    /// The scope is consulted first: a user-defined function is called, any
    /// other value under that name is not callable. Otherwise the name must
    /// match a builtin, whose arity is verified before it is executed.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arg_vals`: Evaluated argument values.
    /// - `bindings`: The caller's parameter bindings.
    ///
    /// # Returns
    /// The function result or an error if lookup or arity fails.
    pub(crate) fn eval_function(&mut self,
                                name: &str,
                                arg_vals: Vec<Value>,
                                bindings: Option<&HashMap<String, Value>>)
                                -> EvalResult<Value> {
        if let Some(callable) = self.lookup_callable(name, bindings) {
            return match callable {
                Value::Function(_) => self.call_user_defined_function(&callable, arg_vals),
                _ => Err(RuntimeError::NotAFunction { name: name.to_string() }),
            };
        }

        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            if !builtin.arity.check(arg_vals.len()) {
                return Err(RuntimeError::ArgumentCountMismatch { function: name.to_string(),
                                                                 expected: builtin.arity
                                                                                  .describe(),
                                                                 actual:   arg_vals.len(), });
            }
            return (builtin.func)(&arg_vals);
        }

        Err(RuntimeError::UndefinedFunction { name: name.to_string() })
    }

    /// Executes a user-defined function.
    ///
    /// Its parameter count must match the number of supplied arguments.
    /// Parameter bindings are created and the function body is evaluated with
    /// them, over the scope of the caller.
    ///
    /// # Errors
    /// - Wrong number of arguments.
    /// - Calls nested deeper than [`MAX_CALL_DEPTH`].
    fn call_user_defined_function(&mut self,
                                  callable: &Value,
                                  arg_vals: Vec<Value>)
                                  -> EvalResult<Value> {
        let Value::Function(func) = callable else {
            return Err(callable.unexpected("call", "function", 0));
        };

        if arg_vals.len() != func.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { function: func.name.clone(),
                                                             expected: func.params
                                                                           .len()
                                                                           .to_string(),
                                                             actual:   arg_vals.len(), });
        }
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { function: func.name.clone() });
        }

        let bindings = func.params
                           .iter()
                           .cloned()
                           .zip(arg_vals)
                           .collect::<HashMap<_, _>>();

        self.call_depth += 1;
        let result = self.eval(&func.body, Some(&bindings));
        self.call_depth -= 1;
        result
    }
}

/// Ensures that a user-defined function name is valid.
///
/// A function name is rejected if it is a builtin identifier. Redefining a
/// user-defined function replaces it.
///
/// # Parameters
/// - `name`: Name to validate.
///
/// # Returns
/// `Ok(())` if the name is allowed, otherwise an error.
pub fn validate_function_name(name: &str) -> EvalResult<()> {
    if is_builtin(name) {
        return Err(RuntimeError::BuiltinFunctionRedefinition { name: name.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpreter::parser::core::parse, literate::scope::Scope};

    fn eval(source: &str) -> EvalResult<Value> {
        let mut scope = Scope::new();
        Context::new(&mut scope).eval_node(&parse(source).unwrap())
    }

    #[test]
    fn builtin_arity_is_checked() {
        assert_eq!(eval("sqrt(1, 2)"),
                   Err(RuntimeError::ArgumentCountMismatch { function: "sqrt".to_string(),
                                                             expected: "1".to_string(),
                                                             actual:   2, }));
        assert_eq!(eval("round()").unwrap_err().to_string(),
                   "Wrong number of arguments in function round (0 provided, 1 or 2 expected)");
        assert_eq!(eval("max()").unwrap_err().to_string(),
                   "Wrong number of arguments in function max (0 provided, at least 1 expected)");
    }

    #[test]
    fn user_function_arity_is_checked() {
        assert_eq!(eval("f(x, y) = x + y\nf(1)"),
                   Err(RuntimeError::ArgumentCountMismatch { function: "f".to_string(),
                                                             expected: "2".to_string(),
                                                             actual:   1, }));
    }

    #[test]
    fn parameters_shadow_scope_variables() {
        assert_eq!(eval("x = 10; f(x) = x * 2; f(3) + x"), Ok(Value::Number(16.0)));
    }

    #[test]
    fn calling_a_variable_fails() {
        assert_eq!(eval("g = 3; g(1)"),
                   Err(RuntimeError::NotAFunction { name: "g".to_string() }));
        assert_eq!(eval("nothing(1)"),
                   Err(RuntimeError::UndefinedFunction { name: "nothing".to_string() }));
    }

    #[test]
    fn unbounded_recursion_is_stopped() {
        assert_eq!(eval("f(x) = f(x) + 1; f(1)"),
                   Err(RuntimeError::CallDepthExceeded { function: "f".to_string() }));
    }
}
