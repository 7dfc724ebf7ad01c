use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Computes the minimum or maximum of its arguments.
///
/// Either all arguments are plain numbers, or all are quantities of the same
/// dimensions. Quantities are compared by their SI magnitude and the winning
/// argument is returned with its own units.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: At least one argument.
///
/// # Errors
/// - `UnexpectedType` when numbers and quantities are mixed.
/// - `IncompatibleUnits` when quantities measure different dimensions.
/// - `UnitWithoutValue` for a bare unit.
///
/// # Example
/// ```
/// use lmath::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Number(3.0), Value::Number(7.0)]).unwrap();
/// assert_eq!(r, 3.0.into());
///
/// let r = min_max("max", &[Value::Number(2.5), Value::Number(1.0), Value::Number(2.0)]).unwrap();
/// assert_eq!(r, 2.5.into());
/// ```
pub fn min_max(name: &str, args: &[Value]) -> EvalResult<Value> {
    let Some((first, rest)) = args.split_first() else {
        return Err(RuntimeError::ArgumentCountMismatch { function: name.to_string(),
                                                         expected: "at least 1".to_string(),
                                                         actual:   0, });
    };

    let mut best = first;
    let mut best_key = sort_key(name, first, first, 0)?;
    for (offset, candidate) in rest.iter().enumerate() {
        let key = sort_key(name, first, candidate, offset + 1)?;
        let better = if name == "min" {
            key < best_key
        } else {
            key > best_key
        };
        if better {
            best = candidate;
            best_key = key;
        }
    }

    Ok(best.clone())
}

/// The magnitude `candidate` is compared by, checked against the kind of the
/// first argument.
fn sort_key(name: &str, first: &Value, candidate: &Value, index: usize) -> EvalResult<f64> {
    match (first, candidate) {
        (Value::Number(_), Value::Number(n)) => Ok(*n),
        (Value::Quantity(reference), Value::Quantity(q)) => {
            if !reference.equal_base(q) {
                return Err(RuntimeError::IncompatibleUnits);
            }
            q.value()
             .ok_or(RuntimeError::UnitWithoutValue { parameter: "x" })
        },
        (Value::Quantity(_), _) => Err(candidate.unexpected(name, "Unit", index)),
        _ => Err(candidate.unexpected(name, "number", index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::quantity::Quantity;

    fn quantity(text: &str) -> Value {
        Value::Quantity(Quantity::parse(text).unwrap())
    }

    #[test]
    fn quantities_compare_by_si_magnitude() {
        let longest = min_max("max", &[quantity("1 km"), quantity("900 m")]).unwrap();
        let shortest = min_max("min", &[quantity("1 km"), quantity("900 m")]).unwrap();

        assert_eq!(longest.to_string(), "1 km");
        assert_eq!(shortest.to_string(), "900 m");
    }

    #[test]
    fn mixed_arguments_are_rejected() {
        assert!(matches!(min_max("min", &[Value::Number(1.0), quantity("1 m")]),
                         Err(RuntimeError::UnexpectedType { index: 1, .. })));
        assert_eq!(min_max("min", &[quantity("1 m"), quantity("1 s")]),
                   Err(RuntimeError::IncompatibleUnits));
    }
}
