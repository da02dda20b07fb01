//! Loosely typed backend values.
//!
//! The backend stores several sensor and settings fields exactly as they were
//! typed into a form, so the same key may arrive as `100` in one payload and
//! `"100"` in the next. [`Scalar`] accepts both and prints them the way the
//! browser would.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON number, string or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    /// Whether the value would count as "set" in a boolean context
    /// (`0`, `NaN`, `""` and `false` do not).
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(v) => *v != 0.0 && !v.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }

    /// Interpret the value as an integer, reading the leading digits of text
    /// values (`"12abc"` is `12`, `"0x20"` is `32`).
    #[must_use]
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Number(v) if v.is_finite() => {
                #[allow(clippy::cast_possible_truncation)]
                let truncated = v.trunc() as i64;
                Some(truncated)
            }
            Self::Number(_) => None,
            Self::Text(s) => parse_int_prefix(s, None),
            Self::Flag(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) if v.is_nan() => f.write_str("NaN"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Render an optional scalar, falling back to `default` when absent.
#[must_use]
pub fn display_or(value: Option<&Scalar>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Parse the longest integer prefix of `text`.
///
/// Leading whitespace and a sign are skipped. With `radix` set to `None` a
/// `0x` prefix selects base 16, otherwise base 10 is used. With base 16 the
/// `0x` prefix is optional. Returns `None` when no digit follows.
pub(crate) fn parse_int_prefix(text: &str, radix: Option<u32>) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let has_hex_prefix = unsigned.starts_with("0x") || unsigned.starts_with("0X");
    let (radix, digits) = match radix {
        Some(16) | None if has_hex_prefix => (16, &unsigned[2..]),
        Some(r) => (r, unsigned),
        None => (10, unsigned),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_print_whole_numbers_without_fraction() {
        assert_eq!(Scalar::Number(12.0).to_string(), "12");
        assert_eq!(Scalar::Number(12.5).to_string(), "12.5");
    }

    #[test]
    fn should_accept_numbers_and_strings_from_json() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[100, "100", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Number(100.0),
                Scalar::Text("100".to_string()),
                Scalar::Flag(true),
            ]
        );
    }

    #[test]
    fn should_treat_zero_and_empty_text_as_falsy() {
        assert!(!Scalar::Number(0.0).is_truthy());
        assert!(!Scalar::Text(String::new()).is_truthy());
        assert!(Scalar::Number(64.0).is_truthy());
        assert!(Scalar::Text("0".to_string()).is_truthy());
    }

    #[test]
    fn should_read_leading_digits_when_converting_text_to_integer() {
        assert_eq!(Scalar::from("12abc").to_integer(), Some(12));
        assert_eq!(Scalar::from("  -7").to_integer(), Some(-7));
        assert_eq!(Scalar::from("0x20").to_integer(), Some(32));
        assert_eq!(Scalar::from("abc").to_integer(), None);
        assert_eq!(Scalar::Number(64.9).to_integer(), Some(64));
    }

    #[test]
    fn should_fall_back_to_default_when_value_missing() {
        assert_eq!(display_or(None, "N/A"), "N/A");
        assert_eq!(display_or(Some(&Scalar::Number(3.3)), "N/A"), "3.3");
    }
}
