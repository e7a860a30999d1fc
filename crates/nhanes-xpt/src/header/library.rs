//! Library header record handling.
//!
//! # Structure
//!
//! 1. Fixed header: `HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!...`
//! 2. Real header (80 bytes): SAS version, OS, created datetime
//! 3. Second header (80 bytes): Modified datetime

use chrono::NaiveDateTime;

use crate::error::{Result, XptError};

use super::read_string;

/// Record length in bytes.
pub const RECORD_LEN: usize = 80;

/// Library header prefix.
pub const LIBRARY_HEADER_PREFIX: &str = "HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!";

/// Library header prefix of the V8 extended format.
pub const LIBV8_HEADER_PREFIX: &str = "HEADER RECORD*******LIBV8   HEADER RECORD!!!!!!!";

/// Library header information parsed from the real header.
#[derive(Debug, Clone, Default)]
pub struct LibraryInfo {
    pub sas_version: String,
    pub os_name: String,
    pub created: Option<NaiveDateTime>,
}

/// Validate that a record starts with the V5 library header prefix.
pub fn validate_library_header(record: &[u8]) -> Result<()> {
    if record.len() < RECORD_LEN {
        return Err(XptError::invalid_format("record too short"));
    }
    if record.starts_with(LIBV8_HEADER_PREFIX.as_bytes()) {
        return Err(XptError::UnsupportedVersion("V8".to_string()));
    }
    if !record.starts_with(LIBRARY_HEADER_PREFIX.as_bytes()) {
        return Err(XptError::missing_header("LIBRARY HEADER"));
    }
    Ok(())
}

/// Parse the library real header.
///
/// | Offset | Length | Field       |
/// |--------|--------|-------------|
/// | 0-23   | 24     | "SAS" tags  |
/// | 24-31  | 8      | SAS version |
/// | 32-39  | 8      | OS name     |
/// | 64-79  | 16     | created     |
pub fn parse_real_header(record: &[u8]) -> Result<LibraryInfo> {
    if record.len() < RECORD_LEN {
        return Err(XptError::invalid_format("real header too short"));
    }
    Ok(LibraryInfo {
        sas_version: read_string(record, 24, 8),
        os_name: read_string(record, 32, 8),
        created: parse_xpt_datetime(&read_string(record, 64, 16)),
    })
}

/// Parse a `ddMMMyy:hh:mm:ss` transport timestamp.
pub fn parse_xpt_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.len() != 16 || !text.is_ascii() {
        return None;
    }
    // chrono expects a capitalised month abbreviation.
    let normalized = format!("{}{}{}", &text[..3], text[3..5].to_ascii_lowercase(), &text[5..]);
    NaiveDateTime::parse_from_str(&normalized, "%d%b%y:%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_validate_library_header() {
        let mut record = [b' '; RECORD_LEN];
        record[..48].copy_from_slice(LIBRARY_HEADER_PREFIX.as_bytes());
        assert!(validate_library_header(&record).is_ok());

        record[..48].copy_from_slice(LIBV8_HEADER_PREFIX.as_bytes());
        assert!(matches!(
            validate_library_header(&record),
            Err(XptError::UnsupportedVersion(_))
        ));

        let bad = [b'X'; RECORD_LEN];
        assert!(validate_library_header(&bad).is_err());
    }

    #[test]
    fn test_parse_xpt_datetime() {
        let parsed = parse_xpt_datetime("13JUL20:10:12:33").unwrap();
        assert_eq!(parsed.year(), 2020);
        assert_eq!(parsed.month(), 7);
        assert_eq!(parsed.day(), 13);
        assert_eq!(parsed.hour(), 10);
        assert!(parse_xpt_datetime("").is_none());
        assert!(parse_xpt_datetime("not a timestamp!").is_none());
    }
}
