use crate::interpreter::{
    evaluator::{core::EvalResult, utils::check_arity},
    value::core::Value,
};

/// Computes square roots of numbers and quantities.
///
/// - Numbers return their real square root; negative numbers yield `NaN`.
/// - Quantities halve the powers of their units, so `sqrt(4 m^2)` is `2 m`.
///
/// Functions produce an `UnexpectedType` error.
///
/// # Parameters
/// - `args`: Slice of one argument.
///
/// # Returns
/// The square root.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::sqrt::sqrt, value::core::Value};
///
/// let r = sqrt(&[Value::Number(9.0)]).unwrap();
/// assert_eq!(r, 3.0.into());
///
/// assert!(sqrt(&[Value::Number(-1.0)]).unwrap().as_number("sqrt", 0).unwrap().is_nan());
/// ```
pub fn sqrt(args: &[Value]) -> EvalResult<Value> {
    check_arity("sqrt", args, 1)?;

    match &args[0] {
        Value::Number(x) => Ok(Value::Number(x.sqrt())),
        Value::Quantity(q) => Ok(Value::from_quantity(q.pow(0.5))),
        Value::Function(_) => Err(args[0].unexpected("sqrt", "number | Unit", 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::quantity::Quantity;

    #[test]
    fn square_root_of_an_area_is_a_length() {
        let area = Value::Quantity(Quantity::parse("4 m^2").unwrap());

        assert_eq!(sqrt(&[area]).unwrap().to_string(), "2 m");
    }
}
