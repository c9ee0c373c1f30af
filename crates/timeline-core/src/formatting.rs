/// Largest magnitude below which an `f64` can still hold a fraction.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// Midpoints round away from zero, so `0.25` with one decimal becomes `"0.3"`.
/// A value that rounds to zero is never printed with a minus sign.
///
/// # Examples
///
/// ```
/// use timeline_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let plain = format_decimal(value, decimals);
    if !value.is_finite() {
        return plain;
    }

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let grouped = group_thousands(integer);
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a floating-point number with a fixed number of decimal places and
/// no thousands separators.
///
/// Rounding matches [`format_number`]: midpoints go away from zero and a
/// value that rounds to zero carries no minus sign.
///
/// # Examples
///
/// ```
/// use timeline_core::formatting::format_decimal;
///
/// assert_eq!(format_decimal(1234.5, 1), "1234.5");
/// assert_eq!(format_decimal(0.25, 1), "0.3");
/// assert_eq!(format_decimal(-0.04, 1), "0.0");
/// ```
pub fn format_decimal(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let negative = value < 0.0;
    let abs_value = value.abs();

    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let scaled = abs_value * factor;
    // Past 2^53 every f64 is already an integer at this precision.
    let rounded = if scaled >= MAX_EXACT_INTEGER {
        abs_value
    } else {
        let epsilon = f64::EPSILON * scaled;
        (scaled + epsilon).round() / factor
    };

    let digits = format!("{:.prec$}", rounded, prec = decimals as usize);
    if negative && rounded != 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Relative change of `value` against `reference`, in percent.
///
/// Returns `0.0` when `reference` is zero instead of propagating an infinite
/// or NaN result.
///
/// # Examples
///
/// ```
/// use timeline_core::formatting::relative_percent;
///
/// assert!((relative_percent(12.0, 10.0) - 20.0).abs() < 1e-9);
/// assert!((relative_percent(5.0, 10.0) + 50.0).abs() < 1e-9);
/// assert_eq!(relative_percent(3.0, 0.0), 0.0);
/// ```
pub fn relative_percent(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (value - reference) / reference * 100.0
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
