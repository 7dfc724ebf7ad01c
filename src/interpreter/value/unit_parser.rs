use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            quantity::{Quantity, UnitTerm},
            units::find_unit,
        },
    },
};

/// Parses a unit string such as `km/h`, `kg m^2 / s^2` or `5 J / (mol K)`.
///
/// Units are separated by whitespace or `*` and divided with `/`; every `/`
/// only applies to the unit directly following it unless that unit is
/// parenthesized. An optional leading number becomes the magnitude.
///
/// Grammar (simplified):
/// ```text
///     units := NUMBER? factor (("*" | "/")? factor)*
///     factor := "("* NAME ("^" NUMBER)? ")"*
/// ```
///
/// # Parameters
/// - `text`: The unit string.
///
/// # Returns
/// The parsed [`Quantity`].
///
/// # Errors
/// - `InvalidUnitString` for a character that cannot start a unit name.
/// - `UnitNotFound` for an unknown unit name.
/// - `MalformedUnit` for dangling operators, unbalanced parentheses, a `^`
///   without exponent or a string without units.
///
/// # Example
/// ```
/// use lmath::interpreter::value::unit_parser::parse_unit;
///
/// let speed = parse_unit("km / h").unwrap();
/// assert_eq!(speed.to_string(), "km / h");
///
/// assert!(parse_unit("m#").is_err());
/// ```
pub fn parse_unit(text: &str) -> EvalResult<Quantity> {
    UnitParser::new(text).parse()
}

struct UnitParser<'t> {
    text:  &'t str,
    chars: Vec<char>,
    index: usize,
}

impl<'t> UnitParser<'t> {
    fn new(text: &'t str) -> Self {
        Self { text,
               chars: text.chars().collect(),
               index: 0 }
    }

    fn parse(mut self) -> EvalResult<Quantity> {
        self.skip_whitespace();
        let value = self.parse_number();

        let mut terms = Vec::new();
        let mut multiplier = 1.0;
        let mut multiplier_stack: Vec<f64> = Vec::new();
        let mut expecting_unit = false;

        loop {
            self.skip_whitespace();
            while self.current() == Some('(') {
                multiplier_stack.push(multiplier);
                multiplier = 1.0;
                self.index += 1;
                self.skip_whitespace();
            }

            let Some(first) = self.current() else { break };
            let start = self.index;
            let name = self.parse_name()
                           .ok_or_else(|| RuntimeError::InvalidUnitString { character: first,
                                                                            text:      self.text.to_string(),
                                                                            index:     start, })?;
            let (unit, prefix) =
                find_unit(&name).ok_or(RuntimeError::UnitNotFound { name })?;

            let mut power = multiplier * multiplier_stack.iter().product::<f64>();
            self.skip_whitespace();
            if self.eat('^') {
                self.skip_whitespace();
                let exponent = self.parse_number().ok_or_else(|| {
                    malformed(format!("In \"{}\", \"^\" must be followed by a floating-point \
                                            number",
                                           self.text))
                })?;
                power *= exponent;
            }
            terms.push(UnitTerm { unit,
                                  prefix,
                                  power });

            self.skip_whitespace();
            while self.current() == Some(')') {
                if multiplier_stack.pop().is_none() {
                    return Err(malformed(format!("Unmatched \")\" in \"{}\" at index {}",
                                                      self.text, self.index)));
                }
                self.index += 1;
                self.skip_whitespace();
            }

            expecting_unit = true;
            multiplier = if self.eat('*') {
                1.0
            } else if self.eat('/') {
                -1.0
            } else {
                expecting_unit = false;
                1.0
            };
        }

        if expecting_unit {
            return Err(malformed(format!("Trailing characters: \"{}\"", self.text)));
        }
        if !multiplier_stack.is_empty() {
            return Err(malformed(format!("Unmatched \"(\" in \"{}\"", self.text)));
        }
        if terms.is_empty() {
            return Err(malformed(format!("\"{}\" contains no units", self.text)));
        }
        Ok(Quantity::from_terms(value, terms))
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.index += 1;
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(' ' | '\t')) {
            self.index += 1;
        }
    }

    fn skip_digits(&mut self) -> bool {
        let start = self.index;
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.index += 1;
        }
        self.index > start
    }

    /// Reads a unit name: letters and digits, starting with a letter.
    fn parse_name(&mut self) -> Option<String> {
        if !self.current().is_some_and(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let start = self.index;
        while self.current().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.index += 1;
        }
        Some(self.chars[start..self.index].iter().collect())
    }

    /// Reads a signed decimal number with optional exponent, restoring the
    /// position if there is none.
    fn parse_number(&mut self) -> Option<f64> {
        let start = self.index;
        if matches!(self.current(), Some('+' | '-')) {
            self.index += 1;
        }

        let integer = self.skip_digits();
        let fraction = self.eat('.') && self.skip_digits();
        if !integer && !fraction {
            self.index = start;
            return None;
        }

        if matches!(self.current(), Some('e' | 'E')) {
            let mantissa_end = self.index;
            self.index += 1;
            if matches!(self.current(), Some('+' | '-')) {
                self.index += 1;
            }
            if !self.skip_digits() {
                self.index = mantissa_end;
            }
        }

        let literal: String = self.chars[start..self.index].iter()
                                                           .filter(|c| **c != '+')
                                                           .collect();
        literal.parse().ok()
    }
}

const fn malformed(details: String) -> RuntimeError {
    RuntimeError::MalformedUnit { details }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_units() {
        let unit = parse_unit("kg m^2 / s^2").unwrap();

        assert_eq!(unit.terms().len(), 3);
        assert_eq!(unit.to_string(), "(kg m^2) / s^2");
    }

    #[test]
    fn division_binds_to_the_next_unit_only() {
        let unit = parse_unit("m/s*kg").unwrap();
        let powers: Vec<f64> = unit.terms().iter().map(|t| t.power).collect();

        assert_eq!(powers, vec![1.0, -1.0, 1.0]);
    }

    #[test]
    fn parenthesized_groups_share_a_division() {
        let unit = parse_unit("J / (mol K)").unwrap();
        let powers: Vec<f64> = unit.terms().iter().map(|t| t.power).collect();

        assert_eq!(powers, vec![1.0, -1.0, -1.0]);
    }

    #[test]
    fn leading_number_becomes_the_value() {
        let unit = parse_unit("5 cm").unwrap();

        assert!(unit.has_value());
        assert_eq!(unit.to_string(), "5 cm");
    }

    #[test]
    fn rejects_bad_characters_and_unknown_units() {
        assert_eq!(parse_unit("m#"),
                   Err(RuntimeError::InvalidUnitString { character: '#',
                                                         text:      "m#".to_string(),
                                                         index:     1, }));
        assert_eq!(parse_unit("furlong"),
                   Err(RuntimeError::UnitNotFound { name: "furlong".to_string() }));
    }

    #[test]
    fn rejects_malformed_structure() {
        let details = |text: &str| match parse_unit(text) {
            Err(RuntimeError::MalformedUnit { details }) => details,
            other => panic!("unexpected result {other:?}"),
        };

        assert_eq!(details("m^"), "In \"m^\", \"^\" must be followed by a floating-point number");
        assert_eq!(details("m/"), "Trailing characters: \"m/\"");
        assert_eq!(details("(m"), "Unmatched \"(\" in \"(m\"");
        assert_eq!(details("m)"), "Unmatched \")\" in \"m)\" at index 1");
        assert_eq!(details("5"), "\"5\" contains no units");
    }
}
