use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A symbol is neither in scope, nor a constant, nor a unit.
    #[error("Undefined symbol {name}")]
    UndefinedSymbol {
        /// The name of the symbol.
        name: String,
    },
    /// Called a function that is neither user defined nor builtin.
    #[error("Undefined function {name}")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// Called a scope entry that does not hold a function.
    #[error("{name} is not a function")]
    NotAFunction {
        /// The name of the called symbol.
        name: String,
    },
    /// An operator or builtin received an argument of the wrong type.
    #[error("Unexpected type of argument in function {function} (expected: {expected}, actual: \
             {actual}, index: {index})")]
    UnexpectedType {
        /// The operation or builtin name, e.g. `add`.
        function: String,
        /// The accepted type.
        expected: &'static str,
        /// The type that was found.
        actual:   &'static str,
        /// The zero-based argument index.
        index:    usize,
    },
    /// Two quantities of different dimensions were combined or converted.
    #[error("Units do not match ('{target}' != '{units}')")]
    UnitsDoNotMatch {
        /// The requested unit.
        target: String,
        /// The unit of the value.
        units:  String,
    },
    /// A unit name could not be resolved.
    #[error("Unit \"{name}\" not found.")]
    UnitNotFound {
        /// The unresolved name.
        name: String,
    },
    /// A conversion target could not be parsed as a unit.
    #[error("Unexpected \"{character}\" in \"{text}\" at index {index}")]
    InvalidUnitString {
        /// The offending character.
        character: char,
        /// The full conversion target.
        text:      String,
        /// The zero-based character index.
        index:     usize,
    },
    /// A conversion target is structurally malformed, e.g. `m^` or `(m`.
    #[error("{details}")]
    MalformedUnit {
        /// The full description, quoting the conversion target.
        details: String,
    },
    /// Two quantities of different dimensions were added or subtracted.
    #[error("Units do not match")]
    IncompatibleUnits,
    /// The right hand side of `to` carries a value.
    #[error("Cannot convert to a unit with a value")]
    ConversionTargetHasValue,
    /// A bare unit such as `m` was used where a quantity with a value is
    /// required.
    #[error("Parameter {parameter} contains a unit with undefined value")]
    UnitWithoutValue {
        /// Which operand, `x` or `y`.
        parameter: &'static str,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Wrong number of arguments in function {function} ({actual} provided, {expected} \
             expected)")]
    ArgumentCountMismatch {
        /// The function name.
        function: String,
        /// The accepted argument count(s).
        expected: String,
        /// The supplied argument count.
        actual:   usize,
    },
    /// User-defined functions called each other too deeply, usually through
    /// unbounded recursion.
    #[error("Maximum call depth exceeded in function {function}")]
    CallDepthExceeded {
        /// The function whose call exceeded the limit.
        function: String,
    },
    /// Attempted to define a function under a builtin name.
    #[error("Cannot redefine built-in function '{name}'")]
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
    },
    /// An argument was outside the domain of an operation.
    #[error("Invalid argument: {details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
}
