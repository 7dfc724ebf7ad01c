use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        value::{
            core::Value,
            units::{angle_dimensions, dimensions_equal},
        },
    },
};

/// Largest digit count accepted by `round`.
const MAX_ROUND_DIGITS: f64 = 15.0;

/// Applies a unary builtin function to a plain number.
///
/// The generated functions accept exactly one argument. Quantities and
/// functions produce an `UnexpectedType` error.
///
/// # Parameters
/// - `args`: Slice containing one argument.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed value.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::builtin::exp, value::core::Value};
///
/// let r = exp(&[Value::Number(0.0)]).unwrap();
///
/// assert_eq!(r, Value::Number(1.0));
/// ```
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Value]) -> EvalResult<Value> {
            check_arity(stringify!($fname), args, 1)?;

            Ok(Value::Number(args[0].as_number(stringify!($fname), 0)?.$real_fn()))
        }
    };
}

real_builtin!(exp, exp);
real_builtin!(log10, log10);
real_builtin!(log2, log2);
real_builtin!(asin, asin);
real_builtin!(acos, acos);
real_builtin!(atan, atan);
real_builtin!(floor, floor);
real_builtin!(ceil, ceil);

/// Applies a trigonometric function to a number of radians or to an angle
/// quantity.
///
/// # Example
/// ```
/// use lmath::interpreter::{
///     evaluator::function::builtin::sin,
///     value::{core::Value, quantity::Quantity},
/// };
///
/// let right_angle = Quantity::parse("90 deg").unwrap();
/// let r = sin(&[Value::Quantity(right_angle)]).unwrap();
///
/// assert!((r.as_number("sin", 0).unwrap() - 1.0).abs() < 1e-12);
/// ```
macro_rules! trig_builtin {
    ($fname:ident) => {
        pub fn $fname(args: &[Value]) -> EvalResult<Value> {
            check_arity(stringify!($fname), args, 1)?;

            Ok(Value::Number(angle(stringify!($fname), &args[0])?.$fname()))
        }
    };
}

trig_builtin!(sin);
trig_builtin!(cos);
trig_builtin!(tan);

/// Extracts an angle in radians from a number or an angle quantity.
///
/// # Errors
/// - `UnitWithoutValue` for a bare unit such as `deg`.
/// - `InvalidArgument` for a quantity that is not an angle.
/// - `UnexpectedType` for a function.
fn angle(function: &str, value: &Value) -> EvalResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Quantity(q) if dimensions_equal(q.dimensions(), &angle_dimensions()) => {
            q.value()
             .ok_or(RuntimeError::UnitWithoutValue { parameter: "x" })
        },
        Value::Quantity(_) => {
            Err(RuntimeError::InvalidArgument { details: format!("Unit in function {function} is no angle") })
        },
        Value::Function(_) => Err(value.unexpected(function, "number | Unit", 0)),
    }
}

/// Returns the absolute value of a number or quantity.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::builtin::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Number(-2.5)]).unwrap(), Value::Number(2.5));
/// ```
pub fn abs(args: &[Value]) -> EvalResult<Value> {
    check_arity("abs", args, 1)?;

    match &args[0] {
        Value::Number(n) => Ok(Value::Number(n.abs())),
        Value::Quantity(q) => Ok(Value::Quantity(q.map_value(f64::abs))),
        Value::Function(_) => Err(args[0].unexpected("abs", "number | Unit", 0)),
    }
}

/// Rounds a number to the nearest integer, or to `digits` decimals when a
/// second argument is given. Halves round away from zero.
///
/// # Errors
/// `InvalidArgument` if `digits` is not an integer between 0 and 15.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Number(2.5)]).unwrap(), Value::Number(3.0));
/// assert_eq!(round(&[Value::Number(3.14159), Value::Number(2.0)]).unwrap(),
///            Value::Number(3.14));
/// ```
pub fn round(args: &[Value]) -> EvalResult<Value> {
    let x = args.first()
                .ok_or(RuntimeError::ArgumentCountMismatch { function: "round".to_string(),
                                                             expected: "1 or 2".to_string(),
                                                             actual:   0, })?
                .as_number("round", 0)?;

    let Some(digits) = args.get(1) else {
        return Ok(Value::Number(x.round()));
    };
    let digits = digits.as_number("round", 1)?;
    if digits.fract() != 0.0 || !(0.0..=MAX_ROUND_DIGITS).contains(&digits) {
        return Err(RuntimeError::InvalidArgument { details: format!("Number of decimals in function round must be an integer from 0 to 15, found {digits}") });
    }

    let factor = 10f64.powf(digits);
    Ok(Value::Number((x * factor).round() / factor))
}

/// Returns the sign of a number: `-1`, `0` or `1`.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::builtin::sign, value::core::Value};
///
/// assert_eq!(sign(&[Value::Number(-42.0)]).unwrap(), Value::Number(-1.0));
/// assert_eq!(sign(&[Value::Number(0.0)]).unwrap(), Value::Number(0.0));
/// ```
pub fn sign(args: &[Value]) -> EvalResult<Value> {
    check_arity("sign", args, 1)?;

    let x = args[0].as_number("sign", 0)?;
    let sign = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    };
    Ok(Value::Number(sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::quantity::Quantity;

    #[test]
    fn trigonometry_rejects_non_angles() {
        let length = Value::Quantity(Quantity::parse("2 m").unwrap());
        let bare = Value::Quantity(Quantity::parse("deg").unwrap());

        assert!(matches!(cos(&[length]), Err(RuntimeError::InvalidArgument { .. })));
        assert_eq!(cos(&[bare]), Err(RuntimeError::UnitWithoutValue { parameter: "x" }));
    }

    #[test]
    fn round_validates_its_digit_count() {
        assert!(round(&[Value::Number(1.0), Value::Number(16.0)]).is_err());
        assert!(round(&[Value::Number(1.0), Value::Number(1.5)]).is_err());
        assert_eq!(round(&[Value::Number(-2.5)]).unwrap(), Value::Number(-3.0));
    }

    #[test]
    fn abs_keeps_units() {
        let negative = Value::Quantity(Quantity::parse("-3 km").unwrap());

        assert_eq!(abs(&[negative]).unwrap().to_string(), "3 km");
    }
}
