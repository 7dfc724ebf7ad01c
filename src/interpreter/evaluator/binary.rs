/// Operator dispatch.
pub mod core;
/// Addition, subtraction, multiplication, division and modulo on numbers and
/// quantities.
pub mod scalar;
/// Exponentiation and unit conversion.
pub mod power;
