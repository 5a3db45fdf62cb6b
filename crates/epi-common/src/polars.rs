//! Polars `AnyValue` helpers.
//!
//! Category keys in the breakdown report come from arbitrary scalar columns;
//! these helpers turn a single cell into the label used to identify it.

use polars::prelude::AnyValue;

use crate::numeric::format_decimal;

/// Converts a Polars `AnyValue` into a category label.
///
/// Returns `None` for `Null` so callers can route missing keys into an
/// explicit "unknown" group. Floats keep a fractional digit (`2.0`, not `2`),
/// booleans render as `true`/`false`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use epi_common::any_to_label;
///
/// assert_eq!(any_to_label(AnyValue::Null), None);
/// assert_eq!(any_to_label(AnyValue::Int32(42)).as_deref(), Some("42"));
/// assert_eq!(any_to_label(AnyValue::String("65-74")).as_deref(), Some("65-74"));
/// ```
pub fn any_to_label(value: AnyValue<'_>) -> Option<String> {
    let label = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_decimal(f64::from(v)),
        AnyValue::Float64(v) => format_decimal(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        // Categoricals and other exotic dtypes: Display, minus the quotes
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_label_null() {
        assert_eq!(any_to_label(AnyValue::Null), None);
    }

    #[test]
    fn test_any_to_label_integers() {
        assert_eq!(any_to_label(AnyValue::Int32(42)), Some("42".to_string()));
        assert_eq!(any_to_label(AnyValue::Int64(-100)), Some("-100".to_string()));
        assert_eq!(any_to_label(AnyValue::UInt32(0)), Some("0".to_string()));
    }

    #[test]
    fn test_any_to_label_floats() {
        assert_eq!(any_to_label(AnyValue::Float64(1.5)), Some("1.5".to_string()));
        assert_eq!(any_to_label(AnyValue::Float64(2.0)), Some("2.0".to_string()));
    }

    #[test]
    fn test_any_to_label_strings() {
        assert_eq!(
            any_to_label(AnyValue::String("urban")),
            Some("urban".to_string())
        );
        assert_eq!(any_to_label(AnyValue::String("")), Some(String::new()));
    }

    #[test]
    fn test_any_to_label_boolean() {
        assert_eq!(any_to_label(AnyValue::Boolean(true)), Some("true".to_string()));
        assert_eq!(any_to_label(AnyValue::Boolean(false)), Some("false".to_string()));
    }
}
