use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    error::{EvaluationError, RuntimeError},
    interpreter::{evaluator::core::EvalResult, value::quantity::Quantity},
    literate::engine::{EngineValue, Notation},
    util::num::{format_auto, to_exponential, to_exponential_shortest, to_fixed},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values a formula can evaluate to and a scope can
/// hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A plain number.
    Number(f64),
    /// A number with a unit, or a bare unit.
    Quantity(Quantity),
    /// A user-defined function. Definitions are immutable and shared between
    /// scope copies.
    Function(Rc<FunctionDef>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<FunctionDef> for Value {
    fn from(def: FunctionDef) -> Self {
        Self::Function(Rc::new(def))
    }
}

impl Value {
    /// Wraps a quantity, collapsing it to a plain number when its dimensions
    /// cancel out and it carries a magnitude.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::value::{core::Value, quantity::Quantity};
    ///
    /// let metre = Quantity::lookup("m").unwrap();
    /// let ratio = metre.scale(3.0).divide(&Quantity::lookup("cm").unwrap());
    ///
    /// assert_eq!(Value::from_quantity(ratio), Value::Number(300.0));
    /// ```
    #[must_use]
    pub fn from_quantity(quantity: Quantity) -> Self {
        match quantity.value() {
            Some(value) if quantity.is_dimensionless() => Self::Number(value),
            _ => Self::Quantity(quantity),
        }
    }

    /// The name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Quantity(_) => "Unit",
            Self::Function(_) => "function",
        }
    }

    /// Returns the number, or an `UnexpectedType` error naming `function` and
    /// the argument `index`.
    ///
    /// # Example
    /// ```
    /// use lmath::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.0).as_number("sqrt", 0).unwrap(), 2.0);
    /// ```
    pub fn as_number(&self, function: &str, index: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.unexpected(function, "number", index)),
        }
    }

    /// Builds the `UnexpectedType` error for this value.
    #[must_use]
    pub fn unexpected(&self, function: &str, expected: &'static str, index: usize) -> RuntimeError {
        RuntimeError::UnexpectedType { function: function.to_string(),
                                       expected,
                                       actual: self.type_name(),
                                       index }
    }

    /// Returns `true` if the value is a [`Value::Number`].
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if the value is a [`Value::Quantity`].
    #[must_use]
    pub const fn is_quantity(&self) -> bool {
        matches!(self, Self::Quantity(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_auto(*n)),
            Self::Quantity(q) => write!(f, "{q}"),
            Self::Function(def) => write!(f, "{}({})", def.name, def.params.join(", ")),
        }
    }
}

impl EngineValue for Value {
    fn has_unit(&self) -> bool {
        self.is_quantity()
    }

    fn scalar(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn to_unit(&self, unit: &str) -> Result<Self, EvaluationError> {
        match self {
            Self::Quantity(q) => {
                let target = Quantity::parse(unit)?;
                Ok(Self::Quantity(q.to(&target)?))
            },
            _ => Err(self.unexpected("to", "Unit", 0).into()),
        }
    }

    fn to_best(&self) -> Self {
        match self {
            Self::Quantity(q) => Self::Quantity(q.to_best()),
            _ => self.clone(),
        }
    }

    fn render(&self, notation: Notation, digits: usize) -> String {
        match notation {
            Notation::Fixed => self.render_with(&|v| to_fixed(v, digits)),
            Notation::Exponential if digits == 0 => self.render_with(&to_exponential_shortest),
            Notation::Exponential => self.render_with(&|v| to_exponential(v, digits - 1)),
        }
    }

    fn render_with(&self, format: &dyn Fn(f64) -> String) -> String {
        match self {
            Self::Number(n) => format(*n),
            Self::Quantity(q) => q.render_with(format),
            Self::Function(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity(text: &str) -> Value {
        Value::Quantity(Quantity::parse(text).unwrap())
    }

    #[test]
    fn renders_numbers_and_quantities_in_notations() {
        assert_eq!(Value::Number(25.06).render(Notation::Fixed, 1), "25.1");
        assert_eq!(Value::Number(25.06).render(Notation::Exponential, 3), "2.51e+1");
        assert_eq!(Value::Number(25.06).render(Notation::Exponential, 0), "2.506e+1");
        assert_eq!(quantity("2 km").render(Notation::Fixed, 2), "2.00 km");
    }

    #[test]
    fn converts_quantities_to_named_units() {
        let converted = quantity("1500 m").to_unit("km").unwrap();

        assert_eq!(converted.to_string(), "1.5 km");
        assert!(matches!(quantity("1 m").to_unit("s"),
                         Err(EvaluationError::Runtime(RuntimeError::UnitsDoNotMatch { .. }))));
        assert!(Value::Number(3.0).to_unit("m").is_err());
    }

    #[test]
    fn best_fit_only_touches_quantities() {
        assert_eq!(Value::Number(1234.0).to_best(), Value::Number(1234.0));
        assert_eq!(quantity("2500 m").to_best().to_string(), "2.5 km");
    }

    #[test]
    fn functions_display_their_signature() {
        let def = FunctionDef { name:   "f".to_string(),
                                params: vec!["x".to_string(), "y".to_string()],
                                body:   crate::ast::Expr::Number(1.0), };

        assert_eq!(Value::from(def).to_string(), "f(x, y)");
    }
}
