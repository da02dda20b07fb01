//! i2c address formatting and parsing.
//!
//! The backend reports addresses as plain integers; the edit form shows and
//! accepts them as hexadecimal text.

use crate::error::AddressError;
use crate::scalar::{Scalar, parse_int_prefix};

/// Address shown when a sensor has none (or a zero address).
pub const UNSET_ADDRESS: &str = "0x00";

/// Format a backend address as `0x` followed by at least two hex digits.
#[must_use]
pub fn format_address(value: Option<&Scalar>) -> String {
    match value.filter(|v| v.is_truthy()).and_then(Scalar::to_integer) {
        Some(n) if n >= 0 => format!("0x{n:02x}"),
        _ => UNSET_ADDRESS.to_string(),
    }
}

/// Parse address text typed into a form as base 16.
///
/// The `0x` prefix is optional and trailing garbage after the hex digits is
/// ignored, so `"0x40"`, `"40"` and `"40h"` are all `64`.
///
/// # Errors
///
/// Returns [`AddressError`] when the text does not start with a hex digit.
pub fn parse_hex_address(text: &str) -> Result<i64, AddressError> {
    parse_int_prefix(text, Some(16)).ok_or_else(|| AddressError {
        input: text.to_string(),
    })
}
