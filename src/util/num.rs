/// Smallest decimal exponent that [`format_auto`] still renders in fixed
/// notation.
pub const AUTO_LOWER_EXP: i32 = -3;
/// Decimal exponent from which [`format_auto`] switches to exponential
/// notation.
pub const AUTO_UPPER_EXP: i32 = 5;

/// Magnitude from which the default rendering switches to exponential form.
const DEFAULT_UPPER_BOUND: f64 = 1e21;
/// Magnitude below which the default rendering switches to exponential form.
const DEFAULT_LOWER_BOUND: f64 = 1e-6;
/// Largest digit count accepted by [`to_fixed`], [`to_exponential`] and
/// [`to_precision`]; larger requests are clamped.
pub const MAX_FORMAT_DIGITS: usize = 100;
/// Fractional digits that hold the exact expansion of any `f64`.
const EXACT_FIXED_DIGITS: usize = 1100;
/// Mantissa digits that hold the exact expansion of any `f64`.
const EXACT_EXPONENTIAL_DIGITS: usize = 800;

/// Renders the default decimal representation of a number.
///
/// This is the shortest representation that round-trips to the same `f64`,
/// written in fixed notation for magnitudes in `[1e-6, 1e21)` and in
/// exponential notation (with an explicit exponent sign) outside of it.
/// Zero is always rendered as `0`, including negative zero.
///
/// ## Parameters
/// - `value`: The number to render.
///
/// ## Returns
/// The rendered string.
///
/// ## Example
/// ```
/// use lmath::util::num::to_js_string;
///
/// assert_eq!(to_js_string(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(to_js_string(1e21), "1e+21");
/// assert_eq!(to_js_string(1e-7), "1e-7");
/// assert_eq!(to_js_string(-0.0), "0");
/// ```
#[must_use]
pub fn to_js_string(value: f64) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (DEFAULT_LOWER_BOUND..DEFAULT_UPPER_BOUND).contains(&magnitude) {
        format!("{value}")
    } else {
        explicit_exponent_sign(format!("{value:e}"))
    }
}

/// Renders a number in fixed notation with exactly `digits` fractional
/// digits.
///
/// Exact ties are rounded away from zero. Magnitudes of `1e21` and above fall
/// back to [`to_js_string`].
///
/// ## Example
/// ```
/// use lmath::util::num::to_fixed;
///
/// assert_eq!(to_fixed(1234.5, 0), "1235");
/// assert_eq!(to_fixed(0.125, 2), "0.13");
/// assert_eq!(to_fixed(1.005, 2), "1.00");
/// assert_eq!(to_fixed(25.049999999999997, 10), "25.0500000000");
/// ```
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }
    if value.abs() >= DEFAULT_UPPER_BOUND {
        return to_js_string(value);
    }

    let value = if value == 0.0 { 0.0 } else { value };
    round_fixed(value, digits.min(MAX_FORMAT_DIGITS))
}

/// Renders a number in exponential notation with `fraction_digits` digits
/// after the mantissa's decimal point.
///
/// ## Example
/// ```
/// use lmath::util::num::to_exponential;
///
/// assert_eq!(to_exponential(1234567.0, 3), "1.235e+6");
/// assert_eq!(to_exponential(1234500.0, 3), "1.235e+6");
/// assert_eq!(to_exponential(0.00001, 3), "1.000e-5");
/// ```
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }

    let value = if value == 0.0 { 0.0 } else { value };
    explicit_exponent_sign(round_exponential(value, fraction_digits.min(MAX_FORMAT_DIGITS)))
}

/// Renders a number in exponential notation with as many digits as needed to
/// round-trip.
///
/// ## Example
/// ```
/// use lmath::util::num::to_exponential_shortest;
///
/// assert_eq!(to_exponential_shortest(25.05), "2.505e+1");
/// assert_eq!(to_exponential_shortest(0.0), "0e+0");
/// ```
#[must_use]
pub fn to_exponential_shortest(value: f64) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }

    let value = if value == 0.0 { 0.0 } else { value };
    explicit_exponent_sign(format!("{value:e}"))
}

/// Renders a number rounded to `precision` significant digits.
///
/// Fixed notation is used unless the rounded exponent is below `-6` or not
/// smaller than `precision`, in which case exponential notation is used. A
/// precision of zero is treated as one.
///
/// ## Example
/// ```
/// use lmath::util::num::to_precision;
///
/// assert_eq!(to_precision(0.30000000000000004, 3), "0.300");
/// assert_eq!(to_precision(12.345, 3), "12.3");
/// assert_eq!(to_precision(1.125, 3), "1.13");
/// assert_eq!(to_precision(999.7, 3), "1.00e+3");
/// ```
#[must_use]
pub fn to_precision(value: f64, precision: usize) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }

    let value = if value == 0.0 { 0.0 } else { value };
    let precision = precision.clamp(1, MAX_FORMAT_DIGITS);
    let exponential = round_exponential(value, precision - 1);
    let exponent = exponent_of(&exponential);
    let significant = i32::try_from(precision).unwrap_or(i32::MAX);

    if exponent < -6 || exponent >= significant {
        return explicit_exponent_sign(exponential);
    }

    let decimals = usize::try_from(significant - 1 - exponent).unwrap_or(0);
    round_fixed(value, decimals)
}

/// Renders a number in automatic notation.
///
/// All significant digits are kept. Numbers whose decimal exponent lies in
/// `[AUTO_LOWER_EXP, AUTO_UPPER_EXP)` are written in fixed notation, the rest
/// in exponential notation. This is the rendering used for numeric literals
/// inside formulas and for the numeric part of quantities.
///
/// ## Example
/// ```
/// use lmath::util::num::format_auto;
///
/// assert_eq!(format_auto(12345.5), "12345.5");
/// assert_eq!(format_auto(100000.0), "1e+5");
/// assert_eq!(format_auto(0.001), "0.001");
/// assert_eq!(format_auto(0.0001), "1e-4");
/// ```
#[must_use]
pub fn format_auto(value: f64) -> String {
    if let Some(rendered) = render_non_finite(value) {
        return rendered;
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let exponential = format!("{value:e}");
    if (AUTO_LOWER_EXP..AUTO_UPPER_EXP).contains(&exponent_of(&exponential)) {
        format!("{value}")
    } else {
        explicit_exponent_sign(exponential)
    }
}

/// Safely converts an `f64` to `i32` if the value is finite, within range and
/// not fractional.
///
/// ## Returns
/// - `Some(i32)`: The converted value.
/// - `None`: If the value is fractional, non-finite or out of range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked(value: f64) -> Option<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// Fixed notation with `digits` decimals, rounding exact ties away from zero.
///
/// `{:.N}` already rounds to the nearest representable decimal but breaks
/// exact ties to even, so only ties are handled here.
fn round_fixed(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_FIXED_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, dropped) = fraction.split_at(digits.min(fraction.len()));
    if !is_tie(dropped) {
        return format!("{value:.digits$}");
    }

    let bumped = increment_digits(&format!("{integer}{kept}"));
    let (integer, fraction) = bumped.split_at(bumped.len() - kept.len());
    let sign = if value < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}

/// Rust style exponential notation (`1.235e6`) with `fraction_digits`
/// mantissa decimals, rounding exact ties away from zero.
fn round_exponential(value: f64, fraction_digits: usize) -> String {
    let rounded = format!("{value:.fraction_digits$e}");
    let exact = format!("{:.*e}", EXACT_EXPONENTIAL_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return rounded;
    };
    let significant: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let (kept, dropped) = significant.split_at((fraction_digits + 1).min(significant.len()));
    if !is_tie(dropped) {
        return rounded;
    }

    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut bumped = increment_digits(kept);
    if bumped.len() > kept.len() {
        bumped.truncate(kept.len());
        exponent += 1;
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let (lead, rest) = bumped.split_at(1.min(bumped.len()));
    if rest.is_empty() {
        format!("{sign}{lead}e{exponent}")
    } else {
        format!("{sign}{lead}.{rest}e{exponent}")
    }
}

/// Whether the dropped digits of an exact expansion are exactly one half.
fn is_tie(dropped: &str) -> bool {
    dropped.strip_prefix('5')
           .is_some_and(|rest| rest.bytes().all(|digit| digit == b'0'))
}

/// Adds one to a string of decimal digits, growing it on carry.
fn increment_digits(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for digit in bytes.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }

    let mut incremented: String = bytes.into_iter().map(char::from).collect();
    if carry {
        incremented.insert(0, '1');
    }
    incremented
}

/// Renders `NaN` and the infinities, or `None` for finite values.
fn render_non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

/// Reads the exponent of a rendering produced by Rust's `{:e}` formatting.
fn exponent_of(exponential: &str) -> i32 {
    exponential.split_once('e')
               .and_then(|(_, exponent)| exponent.parse().ok())
               .unwrap_or(0)
}

/// Turns `1.5e7` into `1.5e+7`; negative exponents are left as they are.
fn explicit_exponent_sign(rendered: String) -> String {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        },
        _ => rendered,
    }
}
