use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{euler_gamma, factorial},
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: negation of numbers and quantities.
    /// - `Plus`: identity on numbers and quantities.
    /// - `Factorial`: defined for plain numbers. Non-negative integers use the
    ///   exact product; other values use the gamma function (`Γ(x + 1)`).
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// // Negation
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0)).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// // Factorial: 4! = 24
    /// let v = Context::eval_unary(UnaryOperator::Factorial, &Value::Number(4.0)).unwrap();
    /// assert_eq!(v, Value::Number(24.0));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                Value::Quantity(q) => Ok(Value::Quantity(q.negate())),
                Value::Function(_) => Err(value.unexpected("unaryMinus", "number | Unit", 0)),
            },
            UnaryOperator::Plus => match value {
                Value::Function(_) => Err(value.unexpected("unaryPlus", "number | Unit", 0)),
                _ => Ok(value.clone()),
            },
            UnaryOperator::Factorial => {
                let x = value.as_number("factorial", 0)?;

                if x.fract() == 0.0 && x < 0.0 {
                    return Err(RuntimeError::InvalidArgument { details: format!("Factorial not defined for negative integer {x}") });
                }
                if x.fract() == 0.0 {
                    return Ok(Value::Number(factorial(x)));
                }

                Ok(Value::Number(euler_gamma(x + 1.0)))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_of_non_integers_uses_gamma() {
        let half = Context::eval_unary(UnaryOperator::Factorial, &Value::Number(0.5)).unwrap();
        let expected = std::f64::consts::PI.sqrt() / 2.0;

        assert!((half.as_number("test", 0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn factorial_rejects_negative_integers() {
        assert!(matches!(Context::eval_unary(UnaryOperator::Factorial, &Value::Number(-3.0)),
                         Err(RuntimeError::InvalidArgument { .. })));
    }
}
