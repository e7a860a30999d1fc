//! Special "refused / don't know / not applicable" codes.

/// Codes that mean missing regardless of which column they appear in.
///
/// Single-digit codes apply to one-digit questions, two- and three-digit
/// codes to wider ones; the set is applied uniformly to every column.
pub const SENTINEL_CODES: [f64; 6] = [7.0, 9.0, 77.0, 99.0, 777.0, 999.0];

/// Returns true when `value` equals a sentinel code.
///
/// Integer-valued floats compare exactly, so `7` and `7.0` are the same code.
pub fn is_sentinel(value: f64) -> bool {
    SENTINEL_CODES.iter().any(|code| *code == value)
}
