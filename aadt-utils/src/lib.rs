//! Shared utility functions for AADT crates.

/// Numeric coercion and rounding functions
pub mod numbers {
    use serde_json::Value;

    /// Coerce a loosely typed attribute value into a number.
    ///
    /// Mirrors the "to number" conversion feature services hand us:
    /// - numbers pass through
    /// - strings are trimmed; an empty string is `0`, anything else must parse
    ///   as a plain decimal float
    /// - `null` is `0`, booleans are `1`/`0`
    /// - arrays, objects and non-finite results are not numbers
    ///
    /// Returns `None` when the value is not a number. Callers decide what to
    /// substitute.
    pub fn coerce_number(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => parse_number_str(s)?,
            Value::Array(_) | Value::Object(_) => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Parse a string attribute into a number.
    ///
    /// Whitespace-only strings are `0`. Rust's float parser accepts spellings
    /// like `inf` and `nan`; those are rejected here. Radix-prefixed literals
    /// (`0x1F`, `0b101`) and `Infinity` are not numbers either.
    pub fn parse_number_str(s: &str) -> Option<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Round to the nearest multiple of `step` (half away from zero).
    ///
    /// A non-positive `step` leaves the value untouched.
    pub fn round_to_step(value: f64, step: f64) -> f64 {
        if step <= 0.0 {
            return value;
        }
        (value / step).round() * step
    }

    /// Round to the nearest multiple of `step` and clamp at zero.
    ///
    /// Never returns `-0.0`.
    pub fn round_non_negative(value: f64, step: f64) -> f64 {
        let rounded = round_to_step(value, step);
        if rounded > 0.0 {
            rounded
        } else {
            0.0
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_coerce_number_variants() {
            assert_eq!(coerce_number(&json!(1234)), Some(1234.0));
            assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
            assert_eq!(coerce_number(&json!(" 4500 ")), Some(4500.0));
            assert_eq!(coerce_number(&json!("")), Some(0.0));
            assert_eq!(coerce_number(&json!(null)), Some(0.0));
            assert_eq!(coerce_number(&json!(true)), Some(1.0));
            assert_eq!(coerce_number(&json!(false)), Some(0.0));
        }

        #[test]
        fn test_coerce_number_rejects_non_numbers() {
            assert_eq!(coerce_number(&json!("n/a")), None);
            assert_eq!(coerce_number(&json!("1,200")), None);
            assert_eq!(coerce_number(&json!("inf")), None);
            assert_eq!(coerce_number(&json!("NaN")), None);
            assert_eq!(coerce_number(&json!("0x1F")), None);
            assert_eq!(coerce_number(&json!("Infinity")), None);
            assert_eq!(coerce_number(&json!([1, 2])), None);
            assert_eq!(coerce_number(&json!({"v": 1})), None);
        }

        #[test]
        fn test_round_to_step() {
            assert_eq!(round_to_step(1049.0, 100.0), 1000.0);
            assert_eq!(round_to_step(1050.0, 100.0), 1100.0);
            assert_eq!(round_to_step(12.3, 0.0), 12.3);
        }

        #[test]
        fn test_round_non_negative_clamps() {
            assert_eq!(round_non_negative(-420.0, 100.0), 0.0);
            assert!(round_non_negative(-20.0, 100.0).is_sign_positive());
            assert_eq!(round_non_negative(2260.0, 100.0), 2300.0);
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    /// A year range whose start lies after its end.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RangeError {
        pub start: i32,
        pub end: i32,
    }

    impl fmt::Display for RangeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Range error: start year {} is after end year {}",
                self.start, self.end
            )
        }
    }

    impl std::error::Error for RangeError {}
}
