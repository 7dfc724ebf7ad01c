/// Built-in function implementations.
///
/// Contains the single-argument mathematical functions available by default,
/// including the trigonometric functions that accept angle quantities.
pub mod builtin;
/// Logarithm function implementations.
///
/// Supports the natural logarithm and logarithms to an arbitrary base.
pub mod log;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;
/// The `sqrt` (square root) function implementation.
///
/// Computes the square root of numbers and quantities.
pub mod sqrt;

pub mod core;
