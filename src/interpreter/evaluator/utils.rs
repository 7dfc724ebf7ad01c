use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer whose factorial is still finite in `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Checks if the argument list matches the expected count.
/// Returns an error naming `function` if the argument count does not match.
///
/// ## Example
/// ```
/// use lmath::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let arg_vals = vec![Value::Number(2.0), Value::Number(1.0)];
///
/// assert!(check_arity("pow", &arg_vals, 2).is_ok()); // Requires exactly 2 arguments.
/// assert!(check_arity("pow", &arg_vals, 1).is_err());
/// ```
pub fn check_arity<T>(function: &str, args: &[T], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { function: function.to_string(),
                                                  expected: expected.to_string(),
                                                  actual:   args.len(), })
    }
}

/// Computes the factorial of a non-negative integer as an `f64`.
///
/// Values above 170 overflow to infinity.
///
/// ## Example
/// ```
/// use lmath::interpreter::evaluator::utils::factorial;
///
/// assert_eq!(factorial(5.0), 120.0);
/// assert_eq!(factorial(0.0), 1.0);
/// assert!(factorial(171.0).is_infinite());
/// ```
#[must_use]
pub fn factorial(n: f64) -> f64 {
    if n > MAX_FACTORIAL {
        return f64::INFINITY;
    }
    let mut result = 1.0;
    let mut k = 2.0;
    while k <= n {
        result *= k;
        k += 1.0;
    }
    result
}

/// Computes the gamma function using the Lanczos approximation.
///
/// Uses the reflection formula for `z < 0.5`.
///
/// ## Example
/// ```
/// use lmath::interpreter::evaluator::utils::euler_gamma;
///
/// // Γ(5) = 4! = 24
/// let g = euler_gamma(5.0);
/// assert!((g - 24.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn euler_gamma(z: f64) -> f64 {
    // Lanczos coefficients, g = 7, n = 9.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        return std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * euler_gamma(1.0 - z));
    }

    let z_minus_1 = z - 1.0;
    let x = COEFFS.iter()
                  .skip(1)
                  .zip(1_u8..)
                  .fold(COEFFS[0], |acc, (c, i)| acc + c / (z_minus_1 + f64::from(i)));
    let t = z_minus_1 + G + 0.5;

    std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
}
