//! Decimal rounding and formatting for reported statistics.
//!
//! Reported percentages and interval bounds are rounded to a fixed number of
//! decimals and printed in shortest form with at least one fractional digit,
//! so `0.5` stays `0.5` and a whole number prints as `60.0`.

/// Rounds `value` to `decimals` fractional digits.
///
/// Rounding is decided on the exact binary value, so halfway cases that are
/// not representable round toward the nearer neighbour and exact ties round
/// to even. Non-finite values pass through unchanged.
///
/// # Examples
///
/// ```
/// use epi_common::round_to;
///
/// assert_eq!(round_to(66.666_666, 1), 66.7);
/// assert_eq!(round_to(0.098, 2), 0.1);
/// ```
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Formats a float in shortest round-trip form, always with a fractional part.
///
/// # Examples
///
/// ```
/// use epi_common::format_decimal;
///
/// assert_eq!(format_decimal(0.5), "0.5");
/// assert_eq!(format_decimal(60.0), "60.0");
/// assert_eq!(format_decimal(-0.05), "-0.05");
/// ```
pub fn format_decimal(value: f64) -> String {
    let s = format!("{value}");
    if value.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}
