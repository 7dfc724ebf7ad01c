/// Number rendering helpers.
///
/// This module provides the textual renderings of `f64` values that the rest
/// of the crate builds on: the default shortest decimal form, fixed and
/// exponential notation with an explicit digit count, significant-digit
/// rounding, and the automatic notation used when printing formulas and
/// quantities.
///
/// All helpers are pure and total. Non-finite values render as `NaN`,
/// `Infinity` and `-Infinity` in every notation.
pub mod num;
