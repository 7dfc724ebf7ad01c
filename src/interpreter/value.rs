/// The unit registry.
///
/// Declares the base dimensions, the prefix sets and the static table of
/// known units, and resolves possibly prefixed unit names such as `km` or
/// `dm2`.
///
/// # Responsibilities
/// - Defines every unit with its dimensions, size, offset and prefix set.
/// - Resolves unit names, longest exact match first.
/// - Provides the preferred SI units used for simplification.
pub mod units;
/// Physical quantities.
///
/// Defines `Quantity`, a magnitude stored in SI units together with the
/// compound unit it is displayed in, and its arithmetic, conversion and
/// formatting.
pub mod quantity;
/// Unit string parsing.
///
/// Parses conversion targets such as `km/h` or `J / (mol K)`.
pub mod unit_parser;

pub mod core;
