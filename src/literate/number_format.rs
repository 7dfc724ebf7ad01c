use crate::util::num::{to_exponential, to_fixed, to_js_string, to_precision};

/// Renderings shorter than this are returned unchanged.
const MAX_NUMBER_LENGTH: usize = 5;
/// Magnitudes from `10^MAX_NUMBER_LENGTH+1` use exponential notation.
const LARGE_EXPONENTIAL_BOUND: f64 = 1e6;
/// Magnitudes below this use exponential notation.
const SMALL_EXPONENTIAL_BOUND: f64 = 1e-4;
/// Magnitudes from here on are rounded to integers.
const INTEGER_BOUND: f64 = 1e3;
/// Significant digits shown for everything else.
const MIN_PRECISION: usize = 3;
/// Mantissa decimals in exponential notation.
const EXPONENTIAL_DECIMALS: usize = 3;

/// Renders a plain number when no explicit number format was requested.
///
/// Short renderings are kept as they are. Longer ones are shortened: very
/// large and very small magnitudes to exponential notation with three
/// mantissa decimals, magnitudes from 1000 on to integers, and everything
/// else to three significant digits. Trailing fractional zeros and a
/// dangling decimal point are removed afterwards.
///
/// # Parameters
/// - `n`: The number to render.
///
/// # Returns
/// The rendered string.
///
/// # Example
/// ```
/// use lmath::literate::number_format::format_number;
///
/// assert_eq!(format_number(100000.0), "100000");
/// assert_eq!(format_number(1234567.0), "1.235e+6");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1e-5), "1e-5");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    let naive = to_js_string(n);
    if naive.chars().count() < MAX_NUMBER_LENGTH {
        return naive;
    }

    let magnitude = n.abs();
    let rendered = if magnitude >= LARGE_EXPONENTIAL_BOUND || magnitude < SMALL_EXPONENTIAL_BOUND {
        to_exponential(n, EXPONENTIAL_DECIMALS)
    } else if magnitude >= INTEGER_BOUND {
        to_fixed(n, 0)
    } else {
        to_precision(n, MIN_PRECISION)
    };
    strip_insignificant_zeros(&rendered)
}

/// Removes trailing zeros of a fractional mantissa and a trailing decimal
/// point, keeping any exponent as it is.
fn strip_insignificant_zeros(rendered: &str) -> String {
    let (mantissa, exponent) = match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (rendered, None),
    };

    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0')
    } else {
        mantissa
    };
    let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa);

    match exponent {
        Some(exponent) => format!("{mantissa}e{exponent}"),
        None => mantissa.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exact_renderings() {
        let cases = [(1e5, "100000"),
                     (1e6, "1e+6"),
                     (123_456.0, "123456"),
                     (1_234_567.0, "1.235e+6"),
                     (1_200_457.0, "1.2e+6"),
                     (1_200_567.0, "1.201e+6"),
                     (1e-4, "0.0001"),
                     (1e-5, "1e-5"),
                     (0.1 + 0.2, "0.3")];

        for (n, expected) in cases {
            assert_eq!(format_number(n), expected, "formatting {n}");
        }
    }

    #[test]
    fn short_renderings_pass_through() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-12.5), "-12.5");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn medium_magnitudes() {
        assert_eq!(format_number(1234.5), "1235");
        assert_eq!(format_number(-1234.5), "-1235");
        assert_eq!(format_number(12.345), "12.3");
        assert_eq!(format_number(999.7), "1e+3");
        assert_eq!(format_number(0.25051), "0.251");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_number(1.125), "1.13");
        assert_eq!(format_number(-1.125), "-1.13");
        assert_eq!(format_number(1_234_500.0), "1.235e+6");
        assert_eq!(format_number(2500.5), "2501");
    }

    #[test]
    fn near_ties_keep_their_binary_value() {
        assert_eq!(format_number(1.005), "1");
        assert_eq!(format_number(1234.499_999_999_999_8), "1234");
    }

    #[test]
    fn zeros_are_stripped_only_from_fractions() {
        assert_eq!(strip_insignificant_zeros("1200"), "1200");
        assert_eq!(strip_insignificant_zeros("1.200e+6"), "1.2e+6");
        assert_eq!(strip_insignificant_zeros("1.000e-5"), "1e-5");
        assert_eq!(strip_insignificant_zeros("3.00"), "3");
    }
}
