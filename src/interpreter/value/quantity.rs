use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            unit_parser::parse_unit,
            units::{
                DIMENSION_COUNT, Dimensions, Prefix, UnitDef, dimensions_equal, find_unit,
                is_dimensionless, si_base_unit, si_unit_for,
            },
        },
    },
    util::num::{format_auto, to_js_string},
};

/// Exponents closer than this to one are treated as one.
const POWER_EPSILON: f64 = 1e-15;
/// Offset of the preferred mantissa magnitude used when picking a prefix.
const PREFIX_BIAS: f64 = 1.2;
/// Range of `log10(mantissa) - PREFIX_BIAS` in which the current prefix is
/// kept.
const PREFIX_KEEP_RANGE: (f64, f64) = (-2.200_001, 1.800_001);

/// One factor of a compound unit, e.g. `km^2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTerm {
    /// The unit.
    pub unit:   &'static UnitDef,
    /// The prefix applied to the unit.
    pub prefix: &'static Prefix,
    /// The exponent of the factor.
    pub power:  f64,
}

/// A physical quantity: an optional magnitude together with a compound unit.
///
/// The magnitude is stored in SI units. A quantity without a magnitude is a
/// bare unit such as `cm`, usable as a factor or as a conversion target.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value:        Option<f64>,
    terms:        Vec<UnitTerm>,
    dimensions:   Dimensions,
    fixed_prefix: bool,
    simplify:     bool,
}

impl Quantity {
    /// Creates a bare unit from a single unit and prefix.
    #[must_use]
    pub fn from_unit(unit: &'static UnitDef, prefix: &'static Prefix) -> Self {
        Self { value:        None,
               terms:        vec![UnitTerm { unit,
                                             prefix,
                                             power: 1.0 }],
               dimensions:   unit.dimensions,
               fixed_prefix: false,
               simplify:     false, }
    }

    /// Builds a quantity from unit terms and an optional magnitude expressed
    /// in those terms.
    pub(crate) fn from_terms(value: Option<f64>, terms: Vec<UnitTerm>) -> Self {
        let mut dimensions = [0.0; DIMENSION_COUNT];
        for term in &terms {
            for (total, dimension) in dimensions.iter_mut().zip(term.unit.dimensions) {
                *total += dimension * term.power;
            }
        }
        let mut quantity = Self { value: None,
                                  terms,
                                  dimensions,
                                  fixed_prefix: false,
                                  simplify: false };
        quantity.value = value.map(|value| quantity.normalize(value));
        quantity
    }

    /// Resolves a symbol such as `km` to a bare unit.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::value::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::lookup("km").unwrap().to_string(), "km");
    /// assert!(Quantity::lookup("x").is_none());
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        find_unit(name).map(|(unit, prefix)| Self::from_unit(unit, prefix))
    }

    /// Parses a unit string such as `km/h` or `kg m^2 / s^2`.
    ///
    /// # Errors
    /// See [`parse_unit`].
    pub fn parse(text: &str) -> EvalResult<Self> {
        parse_unit(text)
    }

    /// The magnitude in SI units, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Whether the quantity carries a magnitude.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The unit terms in written order.
    #[must_use]
    pub fn terms(&self) -> &[UnitTerm] {
        &self.terms
    }

    /// The dimensions of the quantity.
    #[must_use]
    pub const fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Whether all dimension exponents cancel out.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        is_dimensionless(&self.dimensions)
    }

    /// Whether `other` measures the same dimensions.
    #[must_use]
    pub fn equal_base(&self, other: &Self) -> bool {
        dimensions_equal(&self.dimensions, &other.dimensions)
    }

    /// The magnitude expressed in the quantity's own units.
    #[must_use]
    pub fn magnitude(&self) -> Option<f64> {
        self.value.map(|value| self.denormalize(value))
    }

    /// Multiplies the magnitude by a plain number. A bare unit takes the
    /// number as its magnitude.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        let mut result = self.clone();
        result.value = Some(match self.value {
                                Some(value) => value * factor,
                                None => self.normalize(factor),
                            });
        result
    }

    /// Divides the magnitude by a plain number.
    #[must_use]
    pub fn divide_scalar(&self, divisor: f64) -> Self {
        let mut result = self.clone();
        result.value = Some(self.value.unwrap_or_else(|| self.normalize(1.0)) / divisor);
        result
    }

    /// Applies `f` to the SI magnitude, keeping the units.
    #[must_use]
    pub fn map_value(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut result = self.clone();
        result.value = self.value.map(f);
        result
    }

    /// Negates the magnitude.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.map_value(|value| -value)
    }

    /// Adds two quantities of equal dimensions.
    ///
    /// The result keeps the units of `self`.
    ///
    /// # Errors
    /// - `UnitWithoutValue` if either side is a bare unit.
    /// - `IncompatibleUnits` if the dimensions differ.
    pub fn add(&self, other: &Self) -> EvalResult<Self> {
        self.combine(other, |left, right| left + right)
    }

    /// Subtracts two quantities of equal dimensions.
    ///
    /// # Errors
    /// Same as [`Quantity::add`].
    pub fn subtract(&self, other: &Self) -> EvalResult<Self> {
        self.combine(other, |left, right| left - right)
    }

    /// Multiplies two quantities, concatenating their unit terms.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.product(other, 1.0, |left, right| left * right)
    }

    /// Divides two quantities; the terms of `other` are appended with negated
    /// powers.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        self.product(other, -1.0, |left, right| left / right)
    }

    /// Raises the quantity to a power.
    #[must_use]
    pub fn pow(&self, exponent: f64) -> Self {
        let mut result = self.clone();
        for dimension in &mut result.dimensions {
            *dimension *= exponent;
        }
        for term in &mut result.terms {
            term.power *= exponent;
        }
        result.value = self.value.map(|value| value.powf(exponent));
        result.simplify = true;
        result
    }

    /// Converts the quantity into the units of `target`.
    ///
    /// # Parameters
    /// - `target`: A bare unit of the same dimensions.
    ///
    /// # Returns
    /// A quantity expressed in exactly the target's terms, with its prefix
    /// fixed.
    ///
    /// # Errors
    /// - `UnitsDoNotMatch` if the dimensions differ.
    /// - `ConversionTargetHasValue` if `target` has a magnitude.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::value::quantity::Quantity;
    ///
    /// let length = Quantity::lookup("cm").unwrap().scale(254.0);
    /// let inches = length.to(&Quantity::lookup("inch").unwrap()).unwrap();
    ///
    /// assert_eq!(inches.to_string(), "100 inch");
    /// ```
    pub fn to(&self, target: &Self) -> EvalResult<Self> {
        if !self.equal_base(target) {
            return Err(RuntimeError::UnitsDoNotMatch { target: target.to_string(),
                                                       units:  self.to_string(), });
        }
        if target.has_value() {
            return Err(RuntimeError::ConversionTargetHasValue);
        }

        let mut result = target.clone();
        result.value = Some(self.value.unwrap_or_else(|| self.normalize(1.0)));
        result.fixed_prefix = true;
        result.simplify = false;
        Ok(result)
    }

    /// Expresses the quantity in its most readable units: simplified where
    /// allowed, with the best fitting prefix, which is then fixed.
    #[must_use]
    pub fn to_best(&self) -> Self {
        let mut best = self.display_form();
        best.fixed_prefix = true;
        best.simplify = false;
        best
    }

    /// Renders the quantity, formatting the magnitude with `format_value`.
    ///
    /// # Example
    /// ```
    /// use lmath::{interpreter::value::quantity::Quantity, util::num::to_fixed};
    ///
    /// let length = Quantity::lookup("cm").unwrap().scale(2.5);
    ///
    /// assert_eq!(length.render_with(&|v| to_fixed(v, 2)), "2.50 cm");
    /// ```
    pub fn render_with(&self, format_value: &dyn Fn(f64) -> String) -> String {
        let shown = self.display_form();
        let value = shown.magnitude().map(format_value).unwrap_or_default();
        let units = shown.format_units();
        match (value.is_empty(), units.is_empty()) {
            (false, false) => format!("{value} {units}"),
            (true, _) => units,
            (false, true) => value,
        }
    }

    /// Renders the unit terms, e.g. `kg m^2 / s^2` or `(m s) / (kg A)`.
    #[must_use]
    pub fn format_units(&self) -> String {
        let numerator: Vec<&UnitTerm> = self.terms.iter().filter(|t| t.power > 0.0).collect();
        let denominator: Vec<&UnitTerm> = self.terms.iter().filter(|t| t.power < 0.0).collect();

        let mut numerator_text = numerator.iter()
                                          .map(|term| {
                                              format_term(term, term.power, (term.power - 1.0).abs())
                                          })
                                          .collect::<Vec<_>>()
                                          .join(" ");
        let mut denominator_text =
            denominator.iter()
                       .map(|term| {
                           if numerator.is_empty() {
                               format_term(term, term.power, f64::INFINITY)
                           } else {
                               format_term(term, -term.power, (term.power + 1.0).abs())
                           }
                       })
                       .collect::<Vec<_>>()
                       .join(" ");

        if numerator.len() > 1 && !denominator.is_empty() {
            numerator_text = format!("({numerator_text})");
        }
        if denominator.len() > 1 && !numerator.is_empty() {
            denominator_text = format!("({denominator_text})");
        }
        match (numerator.is_empty(), denominator.is_empty()) {
            (false, false) => format!("{numerator_text} / {denominator_text}"),
            (true, _) => denominator_text,
            (false, true) => numerator_text,
        }
    }

    fn combine(&self, other: &Self, operation: impl Fn(f64, f64) -> f64) -> EvalResult<Self> {
        let left = self.value
                       .ok_or(RuntimeError::UnitWithoutValue { parameter: "x" })?;
        let right = other.value
                         .ok_or(RuntimeError::UnitWithoutValue { parameter: "y" })?;
        if !self.equal_base(other) {
            return Err(RuntimeError::IncompatibleUnits);
        }

        let mut result = self.clone();
        result.value = Some(operation(left, right));
        result.fixed_prefix = false;
        Ok(result)
    }

    fn product(&self, other: &Self, sign: f64, operation: impl Fn(f64, f64) -> f64) -> Self {
        let mut result = self.clone();
        for (total, dimension) in result.dimensions.iter_mut().zip(other.dimensions) {
            *total += sign * dimension;
        }
        result.terms.extend(other.terms.iter().map(|term| UnitTerm { power: sign * term.power,
                                                                     ..*term }));
        result.value = if self.value.is_some() || other.value.is_some() {
            let left = self.value.unwrap_or_else(|| self.normalize(1.0));
            let right = other.value.unwrap_or_else(|| other.normalize(1.0));
            Some(operation(left, right))
        } else {
            None
        };
        result.simplify = true;
        result
    }

    /// Whether the unit is compound or raised to a power other than one.
    fn is_derived(&self) -> bool {
        match self.terms.as_slice() {
            [] => false,
            [term] => (term.power - 1.0).abs() > POWER_EPSILON,
            _ => true,
        }
    }

    /// Converts a magnitude in the quantity's units to SI.
    fn normalize(&self, value: f64) -> f64 {
        match self.terms.as_slice() {
            [] => value,
            [term] if !self.is_derived() => {
                (value + term.unit.offset) * term.unit.value * term.prefix.value
            },
            terms => terms.iter().fold(value, |acc, term| acc * term_scale(term)),
        }
    }

    /// Converts an SI magnitude to the quantity's units.
    fn denormalize(&self, value: f64) -> f64 {
        match self.terms.as_slice() {
            [] => value,
            [term] if !self.is_derived() => {
                value / term.unit.value / term.prefix.value - term.unit.offset
            },
            terms => terms.iter().fold(value, |acc, term| acc / term_scale(term)),
        }
    }

    /// The form used for display: simplified when allowed, with the best
    /// prefix unless the prefix is fixed.
    fn display_form(&self) -> Self {
        let mut shown = if self.simplify && self.value.is_some() {
            self.simplified()
        } else {
            self.clone()
        };
        if !shown.fixed_prefix
           && let [term] = shown.terms.as_slice()
           && (term.power - term.power.round()).abs() < 1e-14
           && term.unit.offset == 0.0
        {
            let prefix = shown.best_prefix(term);
            shown.terms[0].prefix = prefix;
        }
        shown
    }

    /// Replaces the terms with preferred SI units where that is shorter.
    fn simplified(&self) -> Self {
        let mut result = self.clone();
        if self.is_dimensionless() {
            result.terms.clear();
            return result;
        }
        if let Some((unit, prefix)) = si_unit_for(&self.dimensions) {
            result.terms = vec![UnitTerm { unit,
                                           prefix,
                                           power: 1.0 }];
            return result;
        }

        let mut proposed = Vec::new();
        for (index, power) in self.dimensions.iter().enumerate() {
            if power.abs() <= 1e-12 {
                continue;
            }
            match si_base_unit(index) {
                Some((unit, prefix)) => proposed.push(UnitTerm { unit,
                                                                 prefix,
                                                                 power: *power }),
                None => return result,
            }
        }
        if proposed.len() < result.terms.len() {
            result.terms = proposed;
        }
        result
    }

    /// Picks the scientific prefix that brings the mantissa closest to
    /// `10^1.2`.
    fn best_prefix(&self, term: &UnitTerm) -> &'static Prefix {
        let magnitude = self.value.map_or(0.0, f64::abs);
        if magnitude == 0.0 {
            return term.prefix;
        }

        let unit_value = term.unit.value.abs();
        let distance =
            |prefix: &Prefix| (magnitude / (prefix.value * unit_value).powf(term.power)).log10() - PREFIX_BIAS;

        let current = distance(term.prefix);
        if current > PREFIX_KEEP_RANGE.0 && current < PREFIX_KEEP_RANGE.1 {
            return term.prefix;
        }

        let mut best = term.prefix;
        let mut best_distance = current.abs();
        for prefix in term.unit.prefixes.iter().filter(|prefix| prefix.scientific) {
            let candidate = distance(prefix).abs();
            if candidate < best_distance
               || (candidate == best_distance && prefix.name.len() < best.name.len())
            {
                best = prefix;
                best_distance = candidate;
            }
        }
        best
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&format_auto))
    }
}

fn term_scale(term: &UnitTerm) -> f64 {
    (term.unit.value * term.prefix.value).powf(term.power)
}

/// Renders `prefix unit`, followed by `^power` when `distance_from_one` is
/// significant.
fn format_term(term: &UnitTerm, power: f64, distance_from_one: f64) -> String {
    let name = format!("{}{}", term.prefix.name, term.unit.name);
    if distance_from_one > POWER_EPSILON {
        format!("{name}^{}", to_js_string(power))
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str) -> Quantity {
        Quantity::lookup(name).unwrap()
    }

    #[test]
    fn scaling_a_bare_unit_stores_the_si_value() {
        let length = unit("cm").scale(5.0);

        assert!((length.value().unwrap() - 0.05).abs() < 1e-15);
        assert_eq!(length.to_string(), "5 cm");
    }

    #[test]
    fn best_prefix_is_chosen_for_large_values() {
        assert_eq!(unit("m").scale(5000.0).to_string(), "5 km");
        assert_eq!(unit("m").scale(0.002).to_string(), "2 mm");
    }

    #[test]
    fn addition_keeps_left_units() {
        let sum = unit("m").scale(1.0).add(&unit("cm").scale(50.0)).unwrap();

        assert_eq!(sum.to_string(), "1.5 m");
    }

    #[test]
    fn addition_rejects_bare_units_and_mismatched_dimensions() {
        assert_eq!(unit("m").add(&unit("m").scale(1.0)),
                   Err(RuntimeError::UnitWithoutValue { parameter: "x" }));
        assert_eq!(unit("m").scale(1.0).add(&unit("m")),
                   Err(RuntimeError::UnitWithoutValue { parameter: "y" }));
        assert_eq!(unit("m").scale(1.0).add(&unit("s").scale(1.0)),
                   Err(RuntimeError::IncompatibleUnits));
    }

    #[test]
    fn products_simplify_to_named_units() {
        let force = unit("kg").scale(2.0)
                              .multiply(&unit("m"))
                              .divide(&unit("s").pow(2.0));

        assert_eq!(force.to_string(), "2 N");
    }

    #[test]
    fn areas_fall_back_to_base_units() {
        let area = unit("dm").scale(5.0).multiply(&unit("dm").scale(5.0));

        assert_eq!(area.to_string(), "0.25 m^2");
    }

    #[test]
    fn bare_compound_units_keep_their_terms() {
        assert_eq!(unit("km").divide(&unit("h")).to_string(), "km / h");
        assert_eq!(unit("s").pow(-1.0).to_string(), "s^-1");
    }

    #[test]
    fn conversion_uses_target_terms() {
        let speed = unit("m").scale(10.0).divide(&unit("s"));
        let target = Quantity::parse("km/h").unwrap();

        assert_eq!(speed.to(&target).unwrap().to_string(), "36 km / h");
    }

    #[test]
    fn conversion_between_offset_units() {
        let temperature = unit("degC").scale(100.0);

        assert_eq!(temperature.to(&unit("degF")).unwrap().render_with(&|v| format!("{v:.1}")),
                   "212.0 degF");
    }

    #[test]
    fn conversion_errors() {
        let length = unit("m").scale(1.0);

        assert_eq!(length.to(&unit("s")),
                   Err(RuntimeError::UnitsDoNotMatch { target: "s".to_string(),
                                                       units:  "1 m".to_string(), }));
        assert_eq!(length.to(&unit("cm").scale(1.0)),
                   Err(RuntimeError::ConversionTargetHasValue));
    }

    #[test]
    fn to_best_fixes_the_chosen_prefix() {
        let best = unit("m").scale(2500.0).to_best();

        assert_eq!(best.to_string(), "2.5 km");
        assert_eq!(best.add(&unit("m").scale(500.0)).unwrap().to_string(), "3 km");
    }
}
