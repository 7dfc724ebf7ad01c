use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Computes the natural logarithm, or the logarithm to a given base.
///
/// Accepts one argument, `value`, or two, `value` and `base`:
/// `log_base(value) = ln(value) / ln(base)`.
///
/// Negative values yield `NaN`, zero yields negative infinity.
/// Non-numeric arguments produce an `UnexpectedType` error.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::log::log, value::core::Value};
///
/// // log_e(e) = 1
/// let e = std::f64::consts::E;
/// assert_eq!(log(&[Value::Number(e)]).unwrap(), Value::Number(1.0));
///
/// let r = log(&[Value::Number(1000.0), Value::Number(10.0)]).unwrap();
/// assert!((r.as_number("log", 0).unwrap() - 3.0).abs() < 1e-12);
/// ```
pub fn log(args: &[Value]) -> EvalResult<Value> {
    let mut numbers = args.iter()
                          .enumerate()
                          .map(|(index, arg)| arg.as_number("log", index));

    let value = numbers.next().transpose()?.unwrap_or(f64::NAN);
    match numbers.next().transpose()? {
        Some(base) => Ok(Value::Number(value.ln() / base.ln())),
        None => Ok(Value::Number(value.ln())),
    }
}
