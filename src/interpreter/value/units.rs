use std::f64::consts::PI;

/// Number of base dimensions a quantity is measured in.
pub const DIMENSION_COUNT: usize = 9;

/// Exponents of the base dimensions, indexed like [`BASE_DIMENSIONS`].
pub type Dimensions = [f64; DIMENSION_COUNT];

/// Names of the base dimensions, in storage order.
pub const BASE_DIMENSIONS: [&str; DIMENSION_COUNT] = ["MASS",
                                                      "LENGTH",
                                                      "TIME",
                                                      "CURRENT",
                                                      "TEMPERATURE",
                                                      "LUMINOUS_INTENSITY",
                                                      "AMOUNT_OF_SUBSTANCE",
                                                      "ANGLE",
                                                      "BIT"];

/// Tolerance used when comparing dimension exponents.
pub const DIMENSION_EPSILON: f64 = 1e-12;

/// A unit prefix such as `k` (1e3) or `milli` (1e-3).
#[derive(Debug, PartialEq)]
pub struct Prefix {
    /// The prefix as written in front of the unit name.
    pub name:       &'static str,
    /// The factor the prefix stands for.
    pub value:      f64,
    /// Whether the prefix is a power of 1000; only those are picked
    /// automatically when formatting.
    pub scientific: bool,
}

/// A unit known to the evaluator.
#[derive(Debug, PartialEq)]
pub struct UnitDef {
    /// The unit name, e.g. `m` or `degC`.
    pub name:       &'static str,
    /// The dimensions the unit measures.
    pub dimensions: Dimensions,
    /// The prefixes the unit accepts; always contains the empty prefix first.
    pub prefixes:   &'static [Prefix],
    /// The size of the unit relative to the SI unit of its dimensions.
    pub value:      f64,
    /// Offset added before scaling, used by `degC` and `degF`.
    pub offset:     f64,
}

const fn prefix(name: &'static str, value: f64, scientific: bool) -> Prefix {
    Prefix { name,
             value,
             scientific }
}

const NONE: [Prefix; 1] = [prefix("", 1.0, true)];

const SHORT: [Prefix; 25] = [prefix("", 1.0, true),
                             prefix("da", 1e1, false),
                             prefix("h", 1e2, false),
                             prefix("k", 1e3, true),
                             prefix("M", 1e6, true),
                             prefix("G", 1e9, true),
                             prefix("T", 1e12, true),
                             prefix("P", 1e15, true),
                             prefix("E", 1e18, true),
                             prefix("Z", 1e21, true),
                             prefix("Y", 1e24, true),
                             prefix("R", 1e27, true),
                             prefix("Q", 1e30, true),
                             prefix("d", 1e-1, false),
                             prefix("c", 1e-2, false),
                             prefix("m", 1e-3, true),
                             prefix("u", 1e-6, true),
                             prefix("n", 1e-9, true),
                             prefix("p", 1e-12, true),
                             prefix("f", 1e-15, true),
                             prefix("a", 1e-18, true),
                             prefix("z", 1e-21, true),
                             prefix("y", 1e-24, true),
                             prefix("r", 1e-27, true),
                             prefix("q", 1e-30, true)];

const LONG: [Prefix; 25] = [prefix("", 1.0, true),
                            prefix("deca", 1e1, false),
                            prefix("hecto", 1e2, false),
                            prefix("kilo", 1e3, true),
                            prefix("mega", 1e6, true),
                            prefix("giga", 1e9, true),
                            prefix("tera", 1e12, true),
                            prefix("peta", 1e15, true),
                            prefix("exa", 1e18, true),
                            prefix("zetta", 1e21, true),
                            prefix("yotta", 1e24, true),
                            prefix("ronna", 1e27, true),
                            prefix("quetta", 1e30, true),
                            prefix("deci", 1e-1, false),
                            prefix("centi", 1e-2, false),
                            prefix("milli", 1e-3, true),
                            prefix("micro", 1e-6, true),
                            prefix("nano", 1e-9, true),
                            prefix("pico", 1e-12, true),
                            prefix("femto", 1e-15, true),
                            prefix("atto", 1e-18, true),
                            prefix("zepto", 1e-21, true),
                            prefix("yocto", 1e-24, true),
                            prefix("ronto", 1e-27, true),
                            prefix("quecto", 1e-30, true)];

const SQUARED: [Prefix; 25] = [prefix("", 1.0, true),
                               prefix("da", 1e2, false),
                               prefix("h", 1e4, false),
                               prefix("k", 1e6, true),
                               prefix("M", 1e12, true),
                               prefix("G", 1e18, true),
                               prefix("T", 1e24, true),
                               prefix("P", 1e30, true),
                               prefix("E", 1e36, true),
                               prefix("Z", 1e42, true),
                               prefix("Y", 1e48, true),
                               prefix("R", 1e54, true),
                               prefix("Q", 1e60, true),
                               prefix("d", 1e-2, false),
                               prefix("c", 1e-4, false),
                               prefix("m", 1e-6, true),
                               prefix("u", 1e-12, true),
                               prefix("n", 1e-18, true),
                               prefix("p", 1e-24, true),
                               prefix("f", 1e-30, true),
                               prefix("a", 1e-36, true),
                               prefix("z", 1e-42, true),
                               prefix("y", 1e-48, true),
                               prefix("r", 1e-54, true),
                               prefix("q", 1e-60, true)];

const CUBED: [Prefix; 25] = [prefix("", 1.0, true),
                             prefix("da", 1e3, false),
                             prefix("h", 1e6, false),
                             prefix("k", 1e9, true),
                             prefix("M", 1e18, true),
                             prefix("G", 1e27, true),
                             prefix("T", 1e36, true),
                             prefix("P", 1e45, true),
                             prefix("E", 1e54, true),
                             prefix("Z", 1e63, true),
                             prefix("Y", 1e72, true),
                             prefix("R", 1e81, true),
                             prefix("Q", 1e90, true),
                             prefix("d", 1e-3, false),
                             prefix("c", 1e-6, false),
                             prefix("m", 1e-9, true),
                             prefix("u", 1e-18, true),
                             prefix("n", 1e-27, true),
                             prefix("p", 1e-36, true),
                             prefix("f", 1e-45, true),
                             prefix("a", 1e-54, true),
                             prefix("z", 1e-63, true),
                             prefix("y", 1e-72, true),
                             prefix("r", 1e-81, true),
                             prefix("q", 1e-90, true)];

const DIMENSIONLESS: Dimensions = [0.0; DIMENSION_COUNT];
const MASS: Dimensions = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const LENGTH: Dimensions = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const TIME: Dimensions = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const CURRENT: Dimensions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const TEMPERATURE: Dimensions = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
const LUMINOUS_INTENSITY: Dimensions = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
const AMOUNT_OF_SUBSTANCE: Dimensions = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
const ANGLE: Dimensions = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
const BIT: Dimensions = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
const SURFACE: Dimensions = [0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const VOLUME: Dimensions = [0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const FREQUENCY: Dimensions = [0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const FORCE: Dimensions = [1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ENERGY: Dimensions = [1.0, 2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const POWER: Dimensions = [1.0, 2.0, -3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const PRESSURE: Dimensions = [1.0, -1.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_CHARGE: Dimensions = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_CAPACITANCE: Dimensions = [-1.0, -2.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_POTENTIAL: Dimensions = [1.0, 2.0, -3.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_RESISTANCE: Dimensions = [1.0, 2.0, -3.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_INDUCTANCE: Dimensions = [1.0, 2.0, -2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const ELECTRIC_CONDUCTANCE: Dimensions = [-1.0, -2.0, 3.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const MAGNETIC_FLUX: Dimensions = [1.0, 2.0, -2.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const MAGNETIC_FLUX_DENSITY: Dimensions = [1.0, 0.0, -2.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

/// Generates the static unit table.
///
/// Each entry provides the unit name, its dimensions, its prefix set, its
/// size relative to SI and, optionally, an offset.
macro_rules! unit_table {
    (
        $(
            $name:literal => {
                dimensions: $dimensions:expr,
                prefixes: $prefixes:expr,
                value: $value:expr
                $(, offset: $offset:expr)? $(,)?
            }
        ),* $(,)?
    ) => {
        /// All units, in lookup order.
        pub static UNITS: &[UnitDef] = &[
            $(
                UnitDef { name:       $name,
                          dimensions: $dimensions,
                          prefixes:   &$prefixes,
                          value:      $value,
                          offset:     unit_table!(@offset $($offset)?) },
            )*
        ];
    };
    (@offset) => { 0.0 };
    (@offset $offset:expr) => { $offset };
}

unit_table! {
    // Length
    "m"        => { dimensions: LENGTH, prefixes: SHORT, value: 1.0 },
    "meter"    => { dimensions: LENGTH, prefixes: LONG, value: 1.0 },
    "metre"    => { dimensions: LENGTH, prefixes: LONG, value: 1.0 },
    "inch"     => { dimensions: LENGTH, prefixes: NONE, value: 0.0254 },
    "in"       => { dimensions: LENGTH, prefixes: NONE, value: 0.0254 },
    "ft"       => { dimensions: LENGTH, prefixes: NONE, value: 0.3048 },
    "foot"     => { dimensions: LENGTH, prefixes: NONE, value: 0.3048 },
    "feet"     => { dimensions: LENGTH, prefixes: NONE, value: 0.3048 },
    "yd"       => { dimensions: LENGTH, prefixes: NONE, value: 0.9144 },
    "yard"     => { dimensions: LENGTH, prefixes: NONE, value: 0.9144 },
    "mi"       => { dimensions: LENGTH, prefixes: NONE, value: 1609.344 },
    "mile"     => { dimensions: LENGTH, prefixes: NONE, value: 1609.344 },
    "angstrom" => { dimensions: LENGTH, prefixes: NONE, value: 1e-10 },
    // Surface
    "m2"       => { dimensions: SURFACE, prefixes: SQUARED, value: 1.0 },
    "sqin"     => { dimensions: SURFACE, prefixes: NONE, value: 6.4516e-4 },
    "sqft"     => { dimensions: SURFACE, prefixes: NONE, value: 0.092_903_04 },
    "acre"     => { dimensions: SURFACE, prefixes: NONE, value: 4_046.856_422_4 },
    "hectare"  => { dimensions: SURFACE, prefixes: NONE, value: 10_000.0 },
    // Volume
    "m3"       => { dimensions: VOLUME, prefixes: CUBED, value: 1.0 },
    "L"        => { dimensions: VOLUME, prefixes: SHORT, value: 0.001 },
    "l"        => { dimensions: VOLUME, prefixes: SHORT, value: 0.001 },
    "litre"    => { dimensions: VOLUME, prefixes: LONG, value: 0.001 },
    "liter"    => { dimensions: VOLUME, prefixes: LONG, value: 0.001 },
    "cc"       => { dimensions: VOLUME, prefixes: NONE, value: 1e-6 },
    "gal"      => { dimensions: VOLUME, prefixes: NONE, value: 0.003_785_411_8 },
    "gallon"   => { dimensions: VOLUME, prefixes: NONE, value: 0.003_785_411_8 },
    // Mass
    "g"        => { dimensions: MASS, prefixes: SHORT, value: 0.001 },
    "gram"     => { dimensions: MASS, prefixes: LONG, value: 0.001 },
    "t"        => { dimensions: MASS, prefixes: SHORT, value: 1000.0 },
    "tonne"    => { dimensions: MASS, prefixes: LONG, value: 1000.0 },
    "lb"       => { dimensions: MASS, prefixes: NONE, value: 0.453_592_37 },
    "lbs"      => { dimensions: MASS, prefixes: NONE, value: 0.453_592_37 },
    "oz"       => { dimensions: MASS, prefixes: NONE, value: 0.028_349_523_125 },
    // Time
    "s"        => { dimensions: TIME, prefixes: SHORT, value: 1.0 },
    "second"   => { dimensions: TIME, prefixes: LONG, value: 1.0 },
    "min"      => { dimensions: TIME, prefixes: NONE, value: 60.0 },
    "minute"   => { dimensions: TIME, prefixes: NONE, value: 60.0 },
    "h"        => { dimensions: TIME, prefixes: NONE, value: 3600.0 },
    "hour"     => { dimensions: TIME, prefixes: NONE, value: 3600.0 },
    "day"      => { dimensions: TIME, prefixes: NONE, value: 86_400.0 },
    "week"     => { dimensions: TIME, prefixes: NONE, value: 604_800.0 },
    "year"     => { dimensions: TIME, prefixes: NONE, value: 31_557_600.0 },
    // Frequency
    "Hz"       => { dimensions: FREQUENCY, prefixes: SHORT, value: 1.0 },
    "hertz"    => { dimensions: FREQUENCY, prefixes: LONG, value: 1.0 },
    // Angle
    "rad"      => { dimensions: ANGLE, prefixes: SHORT, value: 1.0 },
    "radian"   => { dimensions: ANGLE, prefixes: LONG, value: 1.0 },
    "deg"      => { dimensions: ANGLE, prefixes: SHORT, value: PI / 180.0 },
    "degree"   => { dimensions: ANGLE, prefixes: LONG, value: PI / 180.0 },
    // Electric current
    "A"        => { dimensions: CURRENT, prefixes: SHORT, value: 1.0 },
    "ampere"   => { dimensions: CURRENT, prefixes: LONG, value: 1.0 },
    // Temperature
    "K"        => { dimensions: TEMPERATURE, prefixes: SHORT, value: 1.0 },
    "kelvin"   => { dimensions: TEMPERATURE, prefixes: LONG, value: 1.0 },
    "degC"     => { dimensions: TEMPERATURE, prefixes: SHORT, value: 1.0, offset: 273.15 },
    "celsius"  => { dimensions: TEMPERATURE, prefixes: LONG, value: 1.0, offset: 273.15 },
    "degF"     => { dimensions: TEMPERATURE, prefixes: SHORT, value: 1.0 / 1.8, offset: 459.67 },
    "fahrenheit" => { dimensions: TEMPERATURE, prefixes: LONG, value: 1.0 / 1.8, offset: 459.67 },
    // Amount of substance and luminous intensity
    "mol"      => { dimensions: AMOUNT_OF_SUBSTANCE, prefixes: SHORT, value: 1.0 },
    "mole"     => { dimensions: AMOUNT_OF_SUBSTANCE, prefixes: LONG, value: 1.0 },
    "cd"       => { dimensions: LUMINOUS_INTENSITY, prefixes: NONE, value: 1.0 },
    "candela"  => { dimensions: LUMINOUS_INTENSITY, prefixes: NONE, value: 1.0 },
    // Force
    "N"        => { dimensions: FORCE, prefixes: SHORT, value: 1.0 },
    "newton"   => { dimensions: FORCE, prefixes: LONG, value: 1.0 },
    "lbf"      => { dimensions: FORCE, prefixes: NONE, value: 4.448_221_615_260_5 },
    // Energy
    "J"        => { dimensions: ENERGY, prefixes: SHORT, value: 1.0 },
    "joule"    => { dimensions: ENERGY, prefixes: LONG, value: 1.0 },
    "Wh"       => { dimensions: ENERGY, prefixes: SHORT, value: 3600.0 },
    "eV"       => { dimensions: ENERGY, prefixes: SHORT, value: 1.602_176_565e-19 },
    // Power
    "W"        => { dimensions: POWER, prefixes: SHORT, value: 1.0 },
    "watt"     => { dimensions: POWER, prefixes: LONG, value: 1.0 },
    "hp"       => { dimensions: POWER, prefixes: NONE, value: 745.699_871_538_6 },
    // Pressure
    "Pa"       => { dimensions: PRESSURE, prefixes: SHORT, value: 1.0 },
    "bar"      => { dimensions: PRESSURE, prefixes: SHORT, value: 100_000.0 },
    "atm"      => { dimensions: PRESSURE, prefixes: NONE, value: 101_325.0 },
    "psi"      => { dimensions: PRESSURE, prefixes: NONE, value: 6_894.757_293_168_36 },
    // Electromagnetism
    "C"        => { dimensions: ELECTRIC_CHARGE, prefixes: SHORT, value: 1.0 },
    "coulomb"  => { dimensions: ELECTRIC_CHARGE, prefixes: LONG, value: 1.0 },
    "F"        => { dimensions: ELECTRIC_CAPACITANCE, prefixes: SHORT, value: 1.0 },
    "farad"    => { dimensions: ELECTRIC_CAPACITANCE, prefixes: LONG, value: 1.0 },
    "V"        => { dimensions: ELECTRIC_POTENTIAL, prefixes: SHORT, value: 1.0 },
    "volt"     => { dimensions: ELECTRIC_POTENTIAL, prefixes: LONG, value: 1.0 },
    "ohm"      => { dimensions: ELECTRIC_RESISTANCE, prefixes: SHORT, value: 1.0 },
    "H"        => { dimensions: ELECTRIC_INDUCTANCE, prefixes: SHORT, value: 1.0 },
    "henry"    => { dimensions: ELECTRIC_INDUCTANCE, prefixes: LONG, value: 1.0 },
    "S"        => { dimensions: ELECTRIC_CONDUCTANCE, prefixes: SHORT, value: 1.0 },
    "siemens"  => { dimensions: ELECTRIC_CONDUCTANCE, prefixes: LONG, value: 1.0 },
    "Wb"       => { dimensions: MAGNETIC_FLUX, prefixes: SHORT, value: 1.0 },
    "weber"    => { dimensions: MAGNETIC_FLUX, prefixes: LONG, value: 1.0 },
    "T"        => { dimensions: MAGNETIC_FLUX_DENSITY, prefixes: SHORT, value: 1.0 },
    "tesla"    => { dimensions: MAGNETIC_FLUX_DENSITY, prefixes: LONG, value: 1.0 },
    // Binary
    "b"        => { dimensions: BIT, prefixes: SHORT, value: 1.0 },
    "bits"     => { dimensions: BIT, prefixes: LONG, value: 1.0 },
    "B"        => { dimensions: BIT, prefixes: SHORT, value: 8.0 },
    "bytes"    => { dimensions: BIT, prefixes: LONG, value: 8.0 },
}

/// Units preferred when simplifying a derived quantity, as `(dimensions,
/// unit, prefix)`, in priority order.
static SI_SYSTEM: &[(Dimensions, &str, &str)] = &[(LENGTH, "m", ""),
                                                  (MASS, "g", "k"),
                                                  (TIME, "s", ""),
                                                  (CURRENT, "A", ""),
                                                  (TEMPERATURE, "K", ""),
                                                  (LUMINOUS_INTENSITY, "cd", ""),
                                                  (AMOUNT_OF_SUBSTANCE, "mol", ""),
                                                  (ANGLE, "rad", ""),
                                                  (BIT, "bits", ""),
                                                  (FORCE, "N", ""),
                                                  (ENERGY, "J", ""),
                                                  (POWER, "W", ""),
                                                  (PRESSURE, "Pa", ""),
                                                  (ELECTRIC_CHARGE, "C", ""),
                                                  (ELECTRIC_CAPACITANCE, "F", ""),
                                                  (ELECTRIC_POTENTIAL, "V", ""),
                                                  (ELECTRIC_RESISTANCE, "ohm", ""),
                                                  (ELECTRIC_INDUCTANCE, "H", ""),
                                                  (ELECTRIC_CONDUCTANCE, "S", ""),
                                                  (MAGNETIC_FLUX, "Wb", ""),
                                                  (MAGNETIC_FLUX_DENSITY, "T", ""),
                                                  (FREQUENCY, "Hz", "")];

/// The SI units of the base dimensions, indexed like [`BASE_DIMENSIONS`].
static SI_BASE_UNITS: [(&str, &str); DIMENSION_COUNT] = [("g", "k"),
                                                         ("m", ""),
                                                         ("s", ""),
                                                         ("A", ""),
                                                         ("K", ""),
                                                         ("cd", ""),
                                                         ("mol", ""),
                                                         ("rad", ""),
                                                         ("bits", "")];

/// Resolves a possibly prefixed unit name.
///
/// Exact names win; otherwise the first unit (in table order) whose name is a
/// suffix of `name` and whose prefix set contains the remaining characters is
/// chosen.
///
/// # Parameters
/// - `name`: The unit as written, e.g. `km` or `dm2`.
///
/// # Returns
/// The unit and prefix, or `None` if the name is not a unit.
///
/// # Example
/// ```
/// use lmath::interpreter::value::units::find_unit;
///
/// let (unit, prefix) = find_unit("dm2").unwrap();
/// assert_eq!(unit.name, "m2");
/// assert_eq!(prefix.name, "d");
///
/// assert!(find_unit("x").is_none());
/// ```
#[must_use]
pub fn find_unit(name: &str) -> Option<(&'static UnitDef, &'static Prefix)> {
    if let Some(unit) = UNITS.iter().find(|unit| unit.name == name) {
        return unit.prefixes.first().map(|prefix| (unit, prefix));
    }

    UNITS.iter().find_map(|unit| {
                    let prefix_name = name.strip_suffix(unit.name)?;
                    find_prefix(unit, prefix_name).map(|prefix| (unit, prefix))
                })
}

/// Looks up a prefix by name within a unit's prefix set.
#[must_use]
pub fn find_prefix(unit: &'static UnitDef, name: &str) -> Option<&'static Prefix> {
    unit.prefixes.iter().find(|prefix| prefix.name == name)
}

/// Returns the preferred SI unit measuring exactly `dimensions`, if any.
#[must_use]
pub fn si_unit_for(dimensions: &Dimensions) -> Option<(&'static UnitDef, &'static Prefix)> {
    SI_SYSTEM.iter()
             .find(|(candidate, ..)| dimensions_equal(candidate, dimensions))
             .and_then(|(_, unit, prefix)| resolve(unit, prefix))
}

/// Returns the SI unit of the base dimension at `index`.
#[must_use]
pub fn si_base_unit(index: usize) -> Option<(&'static UnitDef, &'static Prefix)> {
    SI_BASE_UNITS.get(index)
                 .and_then(|(unit, prefix)| resolve(unit, prefix))
}

/// Compares two dimension vectors within [`DIMENSION_EPSILON`].
#[must_use]
pub fn dimensions_equal(left: &Dimensions, right: &Dimensions) -> bool {
    left.iter()
        .zip(right)
        .all(|(l, r)| (l - r).abs() < DIMENSION_EPSILON)
}

/// Whether all dimension exponents are zero.
#[must_use]
pub fn is_dimensionless(dimensions: &Dimensions) -> bool {
    dimensions_equal(dimensions, &DIMENSIONLESS)
}

/// Dimensions of a plane angle, accepted by the trigonometric builtins.
#[must_use]
pub const fn angle_dimensions() -> Dimensions {
    ANGLE
}

fn resolve(unit: &str, prefix: &str) -> Option<(&'static UnitDef, &'static Prefix)> {
    let unit = UNITS.iter().find(|candidate| candidate.name == unit)?;
    find_prefix(unit, prefix).map(|prefix| (unit, prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unit_accepts_the_empty_prefix_first() {
        for unit in UNITS {
            assert_eq!(unit.prefixes.first().map(|p| p.name), Some(""), "{}", unit.name);
        }
    }

    #[test]
    fn unit_names_are_unique() {
        for (i, unit) in UNITS.iter().enumerate() {
            assert!(UNITS[i + 1..].iter().all(|other| other.name != unit.name),
                    "duplicate unit {}",
                    unit.name);
        }
    }

    #[test]
    fn prefixed_names_resolve_to_their_base_unit() {
        let (unit, prefix) = find_unit("km").unwrap();
        assert_eq!((unit.name, prefix.name), ("m", "k"));

        let (unit, prefix) = find_unit("kWh").unwrap();
        assert_eq!((unit.name, prefix.name), ("Wh", "k"));

        let (unit, prefix) = find_unit("min").unwrap();
        assert_eq!((unit.name, prefix.name), ("min", ""));

        assert!(find_unit("kft").is_none());
        assert!(find_unit("unknown").is_none());
    }

    #[test]
    fn si_system_prefers_named_units() {
        let (unit, _) = si_unit_for(&FORCE).unwrap();
        assert_eq!(unit.name, "N");

        let (unit, prefix) = si_unit_for(&MASS).unwrap();
        assert_eq!((unit.name, prefix.name), ("g", "k"));

        assert!(si_unit_for(&SURFACE).is_none());
    }
}
