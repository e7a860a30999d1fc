//! IBM System/360 floating point conversion and SAS missing-value codes.
//!
//! Transport numerics are big-endian IBM hexadecimal floats: one sign bit,
//! a 7-bit base-16 exponent biased by 64, and a 56-bit fraction. Shortened
//! numerics (length < 8) keep the leading bytes and imply zero padding.

/// A SAS missing value: `.`, `._` or one of `.A` through `.Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingValue {
    Standard,
    Underscore,
    Special(char),
}

impl MissingValue {
    fn lead_byte(self) -> u8 {
        match self {
            Self::Standard => b'.',
            Self::Underscore => b'_',
            Self::Special(c) => c as u8,
        }
    }
}

const FRACTION_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;
const FRACTION_BITS: i32 = 56;
const EXPONENT_BIAS: i32 = 64;

/// Detect a missing-value code in a numeric field.
///
/// Missing values are a single marker byte followed by zero bytes.
pub fn missing_code(bytes: &[u8]) -> Option<MissingValue> {
    let (&lead, rest) = bytes.split_first()?;
    if rest.iter().any(|&b| b != 0) {
        return None;
    }
    match lead {
        b'.' => Some(MissingValue::Standard),
        b'_' => Some(MissingValue::Underscore),
        b'A'..=b'Z' => Some(MissingValue::Special(lead as char)),
        _ => None,
    }
}

/// Convert an 8-byte IBM float to an IEEE 754 double.
pub fn ibm_to_ieee(bytes: [u8; 8]) -> f64 {
    let raw = u64::from_be_bytes(bytes);
    let fraction = raw & FRACTION_MASK;
    if fraction == 0 {
        return 0.0;
    }
    let exponent = ((raw >> FRACTION_BITS) & 0x7F) as i32 - EXPONENT_BIAS;
    let magnitude = fraction as f64 * 2f64.powi(4 * exponent - FRACTION_BITS);
    if raw >> 63 == 1 { -magnitude } else { magnitude }
}

/// Convert an IEEE 754 double to an 8-byte IBM float.
///
/// NaN is written as the standard missing value. Magnitudes beyond the IBM
/// range saturate; magnitudes below it flush to zero.
pub fn ieee_to_ibm(value: f64) -> [u8; 8] {
    if value.is_nan() {
        return missing_bytes(MissingValue::Standard);
    }
    if value == 0.0 {
        return [0; 8];
    }

    let sign = if value.is_sign_negative() { 1u64 << 63 } else { 0 };
    let mut fraction = value.abs();
    let mut exponent = EXPONENT_BIAS;
    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 0.0625 {
        fraction *= 16.0;
        exponent -= 1;
    }

    if exponent > 127 {
        return (sign | (127u64 << FRACTION_BITS) | FRACTION_MASK).to_be_bytes();
    }
    if exponent < 0 {
        return [0; 8];
    }

    let mantissa = ((fraction * 2f64.powi(FRACTION_BITS)).round() as u64).min(FRACTION_MASK);
    (sign | ((exponent as u64) << FRACTION_BITS) | mantissa).to_be_bytes()
}

/// Encode a missing value as an 8-byte numeric field.
pub fn missing_bytes(missing: MissingValue) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes[0] = missing.lead_byte();
    bytes
}
