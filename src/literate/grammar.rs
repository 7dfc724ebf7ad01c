use serde::Serialize;

use crate::{error::ResultFormatError, util::num::MAX_FORMAT_DIGITS};

/// Characters that may not appear in an explicit unit.
const FORBIDDEN_UNIT_CHARACTERS: [char; 8] = ['.', '=', '+', '#', '$', '"', ';', ':'];

/// How a block is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFormat {
    /// The prefix exactly as it appeared in the body, e.g. `$@={.2f}`.
    pub raw_format:      String,
    /// Show the assigned name (`$`).
    pub show_assign:     bool,
    /// Show the expression (`@`, or the default when no prefix is given).
    pub show_expression: bool,
    /// Show the evaluated result (`=`).
    pub show_result:     ShowResult,
}

/// Whether and how the evaluated result is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowResult {
    /// The result is not shown.
    Disabled,
    /// The result is shown with the given unit policy and number format.
    Enabled {
        /// Which unit the result is expressed in.
        unit:          UnitPolicy,
        /// How the numeric part is rendered.
        number_format: NumberFormat,
    },
}

/// Which unit a shown result is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// Best-fit for values with units, untouched for plain numbers.
    Auto,
    /// The result must be a plain number (`-`).
    Unitless,
    /// Convert to the named unit.
    Named(String),
}

/// How the numeric part of a shown result is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// The default number formatter.
    Auto,
    /// Fixed notation with the given number of decimals (`.Nf`).
    Fixed(usize),
    /// Exponential notation with the given number of significant digits
    /// (`.Ng`).
    General(usize),
}

/// A body split into its display format and its formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedBody {
    /// The text following the prefix, unmodified.
    pub formula: String,
    /// The display format described by the prefix.
    pub format:  ParsedFormat,
}

impl ParsedFormat {
    /// The format of a body without prefix: only the expression is shown.
    #[must_use]
    pub const fn expression_only() -> Self {
        Self { raw_format:      String::new(),
               show_assign:     false,
               show_expression: true,
               show_result:     ShowResult::Disabled, }
    }

    /// The format of a `!` body: nothing is shown.
    #[must_use]
    pub fn silent() -> Self {
        Self { raw_format:      "!".to_string(),
               show_assign:     false,
               show_expression: false,
               show_result:     ShowResult::Disabled, }
    }

    /// Whether the block produces no display output at all.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        !self.show_assign
        && !self.show_expression
        && matches!(self.show_result, ShowResult::Disabled)
    }
}

/// Splits a raw body into its format prefix and its formula.
///
/// The prefix is either `!` alone, or any of `$`, `@` and `=` in that order.
/// The `=` may be followed by `{number format; unit}`, where either part may be
/// omitted. A body without any prefix shows its expression only.
///
/// # Parameters
/// - `raw`: The text of the formula site.
///
/// # Returns
/// The [`ParsedBody`] with the remaining formula text left untouched.
///
/// # Errors
/// - `InvalidNumberFormat` if the number format is not `.Nf` or `.Ng`.
/// - `TooManyDigits` if `N` exceeds [`MAX_FORMAT_DIGITS`].
/// - `ForbiddenUnitCharacter` if the unit contains one of `. = + # $ " ; :`.
///
/// # Example
/// ```
/// use lmath::literate::grammar::{NumberFormat, ShowResult, UnitPolicy, parse_body};
///
/// let body = parse_body("@={.2f; km} 1500 m").unwrap();
///
/// assert_eq!(body.formula, " 1500 m");
/// assert_eq!(body.format.raw_format, "@={.2f; km}");
/// assert!(body.format.show_expression);
/// assert_eq!(body.format.show_result,
///            ShowResult::Enabled { unit:          UnitPolicy::Named("km".to_string()),
///                                  number_format: NumberFormat::Fixed(2), });
/// ```
pub fn parse_body(raw: &str) -> Result<ParsedBody, ResultFormatError> {
    if let Some(formula) = raw.strip_prefix('!') {
        return Ok(ParsedBody { formula: formula.to_string(),
                               format:  ParsedFormat::silent(), });
    }

    let prefix = scan_prefix(raw);
    let (raw_format, formula) = raw.split_at(prefix.length);
    if raw_format.is_empty() {
        return Ok(ParsedBody { formula: formula.to_string(),
                               format:  ParsedFormat::expression_only(), });
    }

    let show_result = match prefix.result {
        None => ShowResult::Disabled,
        Some(None) => ShowResult::Enabled { unit:          UnitPolicy::Auto,
                                            number_format: NumberFormat::Auto, },
        Some(Some(clause)) => parse_result_clause(clause)?,
    };
    Ok(ParsedBody { formula: formula.to_string(),
                    format:  ParsedFormat { raw_format: raw_format.to_string(),
                                            show_assign: prefix.assign,
                                            show_expression: prefix.expression,
                                            show_result }, })
}

/// The markers found at the start of a body.
#[derive(Debug, PartialEq, Eq)]
struct Prefix<'a> {
    assign:     bool,
    expression: bool,
    /// `None` without `=`, `Some(None)` for a bare `=`, otherwise the text
    /// between the braces.
    result:     Option<Option<&'a str>>,
    /// Number of bytes the prefix occupies.
    length:     usize,
}

/// Scans the `$`, `@` and `=` markers in that order.
///
/// A `{` after `=` only belongs to the prefix if a matching `}` follows;
/// otherwise it stays in the formula.
fn scan_prefix(raw: &str) -> Prefix<'_> {
    let mut rest = raw;
    let assign = eat(&mut rest, '$');
    let expression = eat(&mut rest, '@');
    let result = if eat(&mut rest, '=') {
        match rest.strip_prefix('{').and_then(|inner| inner.split_once('}')) {
            Some((clause, remainder)) => {
                rest = remainder;
                Some(Some(clause))
            },
            None => Some(None),
        }
    } else {
        None
    };

    Prefix { assign,
             expression,
             result,
             length: raw.len() - rest.len() }
}

fn eat(rest: &mut &str, marker: char) -> bool {
    match rest.strip_prefix(marker) {
        Some(remainder) => {
            *rest = remainder;
            true
        },
        None => false,
    }
}

/// Parses the contents of `{...}` into a unit policy and number format.
fn parse_result_clause(clause: &str) -> Result<ShowResult, ResultFormatError> {
    let clause = clause.trim();
    let (number_format, unit) = match clause.split_once(';') {
        Some((number_format, unit)) => (number_format, Some(unit)),
        None => (clause, None),
    };

    let number_format = parse_number_format(number_format)?;
    let unit = match unit {
        Some(unit) => parse_unit_policy(unit)?,
        None => UnitPolicy::Auto,
    };
    Ok(ShowResult::Enabled { unit, number_format })
}

/// Parses `.Nf` / `.Ng` (case-insensitive); an empty token selects the
/// default formatter.
fn parse_number_format(token: &str) -> Result<NumberFormat, ResultFormatError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(NumberFormat::Auto);
    }

    let invalid = || ResultFormatError::InvalidNumberFormat { token: token.to_string() };
    let body = token.strip_prefix('.').ok_or_else(invalid)?;
    let Some(kind) = body.chars().last() else {
        return Err(invalid());
    };
    let digits = &body[..body.len() - kind.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits: usize = digits.parse().map_err(|_| invalid())?;
    if digits > MAX_FORMAT_DIGITS {
        return Err(ResultFormatError::TooManyDigits { token: token.to_string(),
                                                      max:   MAX_FORMAT_DIGITS, });
    }

    match kind {
        'f' | 'F' => Ok(NumberFormat::Fixed(digits)),
        'g' | 'G' => Ok(NumberFormat::General(digits)),
        _ => Err(invalid()),
    }
}

/// Validates the unit token: empty selects best-fit, `-` forbids units.
fn parse_unit_policy(token: &str) -> Result<UnitPolicy, ResultFormatError> {
    let token = token.trim();
    if let Some(character) = FORBIDDEN_UNIT_CHARACTERS.into_iter()
                                                      .find(|c| token.contains(*c))
    {
        return Err(ResultFormatError::ForbiddenUnitCharacter { character,
                                                               unit: token.to_string() });
    }

    Ok(match token {
        "" => UnitPolicy::Auto,
        "-" => UnitPolicy::Unitless,
        unit => UnitPolicy::Named(unit.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn enabled(unit: UnitPolicy, number_format: NumberFormat) -> ShowResult {
        ShowResult::Enabled { unit, number_format }
    }

    fn format(raw: &str, assign: bool, expression: bool, result: ShowResult) -> ParsedFormat {
        ParsedFormat { raw_format:      raw.to_string(),
                       show_assign:     assign,
                       show_expression: expression,
                       show_result:     result, }
    }

    fn assert_body(raw: &str, formula: &str, expected: ParsedFormat) {
        assert_eq!(parse_body(raw),
                   Ok(ParsedBody { formula: formula.to_string(),
                                   format:  expected, }),
                   "body {raw:?}");
    }

    #[test]
    fn markers() {
        use ShowResult::Disabled;
        let auto = || enabled(UnitPolicy::Auto, NumberFormat::Auto);

        assert_body("hello", "hello", format("", false, true, Disabled));
        assert_body("!hello", "hello", format("!", false, false, Disabled));
        assert_body("$hello", "hello", format("$", true, false, Disabled));
        assert_body("$!hello", "!hello", format("$", true, false, Disabled));
        assert_body("$@hello", "hello", format("$@", true, true, Disabled));
        assert_body("$@=hello", "hello", format("$@=", true, true, auto()));
        assert_body("$=hello", "hello", format("$=", true, false, auto()));
        assert_body("=hello", "hello", format("=", false, false, auto()));
        assert_body("@=hello", "hello", format("@=", false, true, auto()));
    }

    #[test]
    fn markers_must_appear_in_order() {
        assert_body("@$hello", "$hello", format("@", false, true, ShowResult::Disabled));
        assert_body("=$hello",
                    "$hello",
                    format("=", false, false, enabled(UnitPolicy::Auto, NumberFormat::Auto)));
    }

    #[test]
    fn number_formats() {
        let cases = [("={.1f}hello", "={.1f}", NumberFormat::Fixed(1)),
                     ("={.1F}hello", "={.1F}", NumberFormat::Fixed(1)),
                     ("={.15F  ; }hello", "={.15F  ; }", NumberFormat::Fixed(15)),
                     ("={.0F}hello", "={.0F}", NumberFormat::Fixed(0)),
                     ("={.1g;}hello", "={.1g;}", NumberFormat::General(1)),
                     ("={.1G}hello", "={.1G}", NumberFormat::General(1)),
                     ("={ .15G}hello", "={ .15G}", NumberFormat::General(15)),
                     ("={.0G }hello", "={.0G }", NumberFormat::General(0))];

        for (raw, prefix, number_format) in cases {
            assert_body(raw,
                        "hello",
                        format(prefix, false, false, enabled(UnitPolicy::Auto, number_format)));
        }
    }

    #[test]
    fn units() {
        let named = |unit: &str| UnitPolicy::Named(unit.to_string());

        assert_body("={; m^2}hello",
                    "hello",
                    format("={; m^2}", false, false, enabled(named("m^2"), NumberFormat::Auto)));
        assert_body("={.5G; m^2}hello",
                    "hello",
                    format("={.5G; m^2}",
                           false,
                           false,
                           enabled(named("m^2"), NumberFormat::General(5))));
        assert_body("={;-} 3m",
                    " 3m",
                    format("={;-}", false, false, enabled(UnitPolicy::Unitless, NumberFormat::Auto)));
        assert_body("={}x",
                    "x",
                    format("={}", false, false, enabled(UnitPolicy::Auto, NumberFormat::Auto)));
    }

    #[test]
    fn unterminated_clause_stays_in_formula() {
        assert_body("={.2f x",
                    "{.2f x",
                    format("=", false, false, enabled(UnitPolicy::Auto, NumberFormat::Auto)));
    }

    #[test]
    fn invalid_number_formats() {
        for token in ["2f", ".f", ".2", ".2x", ". 2f", "abc"] {
            let raw = format!("={{{token}}}x");
            assert_eq!(parse_body(&raw),
                       Err(ResultFormatError::InvalidNumberFormat { token: token.to_string() }),
                       "body {raw:?}");
        }
    }

    #[test]
    fn digit_counts_are_bounded() {
        assert!(parse_body("={.100f}x").is_ok());
        assert_eq!(parse_body("={.101f}x"),
                   Err(ResultFormatError::TooManyDigits { token: ".101f".to_string(),
                                                          max:   100, }));
        assert_eq!(parse_body("={.70000g}x"),
                   Err(ResultFormatError::TooManyDigits { token: ".70000g".to_string(),
                                                          max:   100, }));
        assert_eq!(parse_body("={.99999999999999999999999f}x"),
                   Err(ResultFormatError::InvalidNumberFormat { token: ".99999999999999999999999f".to_string() }));
    }

    #[test]
    fn empty_body_shows_its_expression() {
        assert_body("", "", ParsedFormat::expression_only());
    }

    #[test]
    fn semicolon_in_unit_is_rejected() {
        assert_eq!(parse_body("={; m ; 2}hello"),
                   Err(ResultFormatError::ForbiddenUnitCharacter { character: ';',
                                                                   unit:      "m ; 2".to_string(), }));
    }

    #[test]
    fn forbidden_unit_characters() {
        assert_eq!(parse_body("={;m.s}x"),
                   Err(ResultFormatError::ForbiddenUnitCharacter { character: '.',
                                                                   unit:      "m.s".to_string(), }));
        assert_eq!(parse_body("={; a:b=c }x"),
                   Err(ResultFormatError::ForbiddenUnitCharacter { character: '=',
                                                                   unit:      "a:b=c".to_string(), }));
        assert_eq!(parse_body("={;m;s}x"),
                   Err(ResultFormatError::ForbiddenUnitCharacter { character: ';',
                                                                   unit:      "m;s".to_string(), }));
    }

    #[test]
    fn prefix_scanner_reports_consumed_length() {
        assert_eq!(scan_prefix("$@={;km}rest"),
                   Prefix { assign:     true,
                            expression: true,
                            result:     Some(Some(";km")),
                            length:     8, });
        assert_eq!(scan_prefix("rest"),
                   Prefix { assign:     false,
                            expression: false,
                            result:     None,
                            length:     0, });
    }
}
