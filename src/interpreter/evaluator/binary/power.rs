use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

impl Context<'_> {
    /// Evaluates an exponentiation operation.
    ///
    /// Numbers use `powf`. A quantity raised to a number scales the powers of
    /// its units; the exponent itself must be a plain number.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ^ exponent`.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let b = Value::Number(2.0);
    /// let e = Value::Number(10.0);
    ///
    /// let result = Context::eval_pow(&b, &e).unwrap();
    /// assert_eq!(result, Value::Number(1024.0));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value) -> EvalResult<Value> {
        let power = exponent.as_number("pow", 1)?;
        match base {
            Value::Number(b) => Ok(Value::Number(b.powf(power))),
            Value::Quantity(q) => Ok(Value::from_quantity(q.pow(power))),
            Value::Function(_) => Err(base.unexpected("pow", "number | Unit", 0)),
        }
    }

    /// Converts a quantity into the units of a bare unit, as in `3 ft to m`.
    ///
    /// # Errors
    /// - `UnexpectedType` if either side is not a quantity.
    /// - `UnitsDoNotMatch` and `ConversionTargetHasValue` from
    ///   [`Quantity::to`](crate::interpreter::value::quantity::Quantity::to).
    pub fn eval_convert(value: &Value, target: &Value) -> EvalResult<Value> {
        match (value, target) {
            (Value::Quantity(q), Value::Quantity(unit)) => Ok(Value::Quantity(q.to(unit)?)),
            (Value::Quantity(_), _) => Err(target.unexpected("to", "Unit", 1)),
            _ => Err(value.unexpected("to", "Unit", 0)),
        }
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
    fn squaring_a_length_gives_an_area() {
        let area = Context::eval_pow(&quantity("3 m"), &Value::Number(2.0)).unwrap();

        assert_eq!(area.to_string(), "9 m^2");
    }

    #[test]
    fn exponents_must_be_numbers() {
        assert!(matches!(Context::eval_pow(&Value::Number(2.0), &quantity("1 m")),
                         Err(RuntimeError::UnexpectedType { index: 1, .. })));
    }

    #[test]
    fn conversion_requires_a_quantity_on_the_left() {
        assert_eq!(Context::eval_convert(&Value::Number(3.0), &quantity("m")),
                   Err(RuntimeError::UnexpectedType { function: "to".to_string(),
                                                      expected: "Unit",
                                                      actual:   "number",
                                                      index:    0, }));
    }
}
