use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates an arithmetic operation.
    ///
    /// Numbers combine as plain `f64`. Quantities add and subtract only with
    /// quantities of the same dimensions; multiplication and division combine
    /// their units, and a result whose dimensions cancel out collapses into a
    /// plain number. Division by zero follows IEEE semantics. The operator
    /// must be one of `Add`, `Sub`, `Mul`, `ImplicitMul` or `Div`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Errors
    /// - `UnexpectedType` when a number is added to a quantity, or a function
    ///   is used as an operand.
    /// - `IncompatibleUnits` and `UnitWithoutValue` from quantity addition.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let x = Value::Number(1.5);
    /// let y = Value::Number(2.0);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Mul, &x, &y).unwrap();
    /// assert_eq!(result, Value::Number(3.0));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, ImplicitMul, Mul, Sub};
        use Value::{Number, Quantity};

        let name = match op {
            Add => "add",
            Sub => "subtract",
            Mul | ImplicitMul => "multiply",
            _ => "divide",
        };
        if let Value::Function(_) = left {
            return Err(left.unexpected(name, "number | Unit", 0));
        }
        if let Value::Function(_) = right {
            return Err(right.unexpected(name, "number | Unit", 1));
        }

        match (op, left, right) {
            (Add, Number(a), Number(b)) => Ok(Number(a + b)),
            (Sub, Number(a), Number(b)) => Ok(Number(a - b)),
            (Mul | ImplicitMul, Number(a), Number(b)) => Ok(Number(a * b)),
            (Div, Number(a), Number(b)) => Ok(Number(a / b)),

            (Add, Quantity(a), Quantity(b)) => Ok(Value::from_quantity(a.add(b)?)),
            (Sub, Quantity(a), Quantity(b)) => Ok(Value::from_quantity(a.subtract(b)?)),
            (Add | Sub, Quantity(_), _) => Err(right.unexpected(name, "Unit", 1)),
            (Add | Sub, _, _) => Err(right.unexpected(name, "number", 1)),

            (Mul | ImplicitMul, Quantity(a), Quantity(b)) => Ok(Value::from_quantity(a.multiply(b))),
            (Mul | ImplicitMul, Quantity(q), Number(n)) | (Mul | ImplicitMul, Number(n), Quantity(q)) => {
                Ok(Quantity(q.scale(*n)))
            },

            (Div, Quantity(a), Quantity(b)) => Ok(Value::from_quantity(a.divide(b))),
            (Div, Quantity(q), Number(n)) => Ok(Quantity(q.divide_scalar(*n))),
            (Div, Number(n), Quantity(q)) => Ok(Quantity(q.pow(-1.0).scale(*n))),

            _ => Err(left.unexpected(name, "number | Unit", 0)),
        }
    }

    /// Evaluates the modulo operation on plain numbers.
    ///
    /// The result takes the sign of the divisor, and `x % 0` is `x`.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let r = Context::eval_mod(&Value::Number(-7.0), &Value::Number(3.0)).unwrap();
    /// assert_eq!(r, Value::Number(2.0));
    /// ```
    pub fn eval_mod(left: &Value, right: &Value) -> EvalResult<Value> {
        let x = left.as_number("mod", 0)?;
        let y = right.as_number("mod", 1)?;
        if y == 0.0 {
            return Ok(Value::Number(x));
        }
        Ok(Value::Number(x - y * (x / y).floor()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, interpreter::value::quantity::Quantity};

    fn quantity(text: &str) -> Value {
        Value::Quantity(Quantity::parse(text).unwrap())
    }

    #[test]
    fn mixing_numbers_and_quantities_in_sums_fails() {
        let error = Context::eval_scalar_op(BinaryOperator::Add, &quantity("3 m"), &Value::Number(2.0));

        assert_eq!(error,
                   Err(RuntimeError::UnexpectedType { function: "add".to_string(),
                                                      expected: "Unit",
                                                      actual:   "number",
                                                      index:    1, }));
        assert_eq!(error.unwrap_err().to_string(),
                   "Unexpected type of argument in function add (expected: Unit, actual: number, \
                    index: 1)");
    }

    #[test]
    fn dividing_equal_dimensions_yields_a_number() {
        let ratio = Context::eval_scalar_op(BinaryOperator::Div, &quantity("2 km"), &quantity("500 m"));

        assert_eq!(ratio, Ok(Value::Number(4.0)));
    }

    #[test]
    fn dividing_a_number_by_a_time_yields_a_frequency() {
        let rate = Context::eval_scalar_op(BinaryOperator::Div, &Value::Number(10.0), &quantity("2 s"))
            .unwrap();

        assert_eq!(rate.to_string(), "5 Hz");
    }

    #[test]
    fn modulo_by_zero_returns_the_dividend() {
        assert_eq!(Context::eval_mod(&Value::Number(5.0), &Value::Number(0.0)),
                   Ok(Value::Number(5.0)));
        assert!(Context::eval_mod(&quantity("5 m"), &Value::Number(2.0)).is_err());
    }
}
