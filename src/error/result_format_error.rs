use thiserror::Error;

/// A malformed explicit result-format clause (`={...}`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultFormatError {
    /// The number-format token is not of the form `.Nf` or `.Ng`.
    #[error("Format should be \".Nf\" or \".Ng\" where N is a number, found \"{token}\"")]
    InvalidNumberFormat {
        /// The trimmed offending token.
        token: String,
    },
    /// The number format asks for more digits than can be rendered.
    #[error("Number of digits in \"{token}\" must be at most {max}")]
    TooManyDigits {
        /// The trimmed offending token.
        token: String,
        /// The largest accepted digit count.
        max:   usize,
    },
    /// The unit token contains one of `. = + # $ " ; :`.
    #[error("Found forbidden character \"{character}\" in unit \"{unit}\".")]
    ForbiddenUnitCharacter {
        /// The first forbidden character, in blacklist order.
        character: char,
        /// The trimmed unit token.
        unit:      String,
    },
}
