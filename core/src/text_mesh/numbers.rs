//! Lenient number parsing and canonical number formatting.
//!
//! Parsing never fails: malformed input yields a best-effort value and a
//! `malformed` marker so the caller can record a diagnostic.

use std::fmt::Write as _;

/// A parsed value and whether the input was well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Parsed<T> {
    pub value: T,
    pub malformed: bool,
}

impl<T> Parsed<T> {
    fn ok(value: T) -> Self {
        Self {
            value,
            malformed: false,
        }
    }

    fn malformed(value: T) -> Self {
        Self {
            value,
            malformed: true,
        }
    }
}

/// Split a whitespace token into hex digit groups of `digits` characters.
///
/// `FF8000` with 2 digits per group yields `FF`, `80`, `00`. A trailing
/// short group is returned as is.
pub(crate) fn hex_groups(token: &str, digits: usize) -> impl Iterator<Item = &[u8]> {
    token.as_bytes().chunks(digits.max(1))
}

/// Parse one hex digit group. Non-hex characters count as digit zero.
pub(crate) fn parse_hex_group(group: &[u8]) -> Parsed<u32> {
    let mut value: u32 = 0;
    let mut malformed = false;
    for &byte in group {
        let digit = match (byte as char).to_digit(16) {
            Some(digit) => digit,
            None => {
                malformed = true;
                0
            }
        };
        value = value.wrapping_mul(16).wrapping_add(digit);
    }
    Parsed { value, malformed }
}

/// Parse a decimal float, falling back to the longest valid prefix.
///
/// A `0x` token holds the raw IEEE 754 bits, as written for NaNs with a
/// sign or payload.
pub(crate) fn parse_decimal(token: &str) -> Parsed<f32> {
    if let Ok(value) = token.parse::<f32>() {
        return Parsed::ok(value);
    }

    if let Some(bits) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return match u32::from_str_radix(bits, 16) {
            Ok(bits) => Parsed::ok(f32::from_bits(bits)),
            Err(_) => Parsed::malformed(0.0),
        };
    }

    let candidate_len = token
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .map_or(token.len(), |(i, _)| i);

    (1..=candidate_len)
        .rev()
        .find_map(|len| token[..len].parse::<f32>().ok())
        .map_or(Parsed::malformed(0.0), Parsed::malformed)
}

/// Outcome of parsing one index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexValue {
    Valid(u16),
    /// Leading digits parsed, trailing garbage ignored.
    Malformed(u16),
    /// The value does not fit into 16 bits.
    OutOfRange(u64),
}

/// Parse a decimal index from the leading digits of `token`.
pub(crate) fn parse_index(token: &str) -> IndexValue {
    let digits_len = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());

    let value = token[..digits_len].bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as u64)
    });

    match u16::try_from(value) {
        Err(_) => IndexValue::OutOfRange(value),
        Ok(value) if digits_len == token.len() && digits_len > 0 => IndexValue::Valid(value),
        Ok(value) => IndexValue::Malformed(value),
    }
}

/// Append `value` as exactly `digits` uppercase hex digits.
pub(crate) fn write_hex(out: &mut String, value: u32, digits: usize) {
    let _ = write!(out, "{value:0digits$X}");
}

/// Append the shortest decimal text that parses back to exactly `value`.
///
/// Very large and very small magnitudes use exponent notation to keep lines
/// short. NaNs other than the canonical quiet NaN are written as `0x` bits
/// since `NaN` text loses the sign and payload.
pub(crate) fn write_float(out: &mut String, value: f32) {
    if value.is_nan() && value.to_bits() != f32::NAN.to_bits() {
        let _ = write!(out, "0x{:08X}", value.to_bits());
        return;
    }

    let magnitude = value.abs();
    let _ = if value != 0.0 && magnitude.is_finite() && !(1e-5..1e16).contains(&magnitude) {
        write!(out, "{value:e}")
    } else {
        write!(out, "{value}")
    };
}
