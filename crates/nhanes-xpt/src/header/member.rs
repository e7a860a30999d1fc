//! Member header record handling.
//!
//! Each dataset (member) in an XPT file has its own set of header records:
//!
//! 1. Member header: `HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!...`
//! 2. DSCRPTR header
//! 3. Member data (80 bytes): dataset name, version
//! 4. Member second (80 bytes): modified datetime, label, type
//! 5. NAMESTR header carrying the variable count
//! 6. NAMESTR records
//! 7. OBS header, then observation data

use crate::error::{Result, XptError};

use super::library::RECORD_LEN;
use super::read_string;

pub const MEMBER_HEADER_PREFIX: &str = "HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!";
pub const DSCRPTR_HEADER_PREFIX: &str = "HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!";
pub const NAMESTR_HEADER_PREFIX: &str = "HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!";
pub const OBS_HEADER_PREFIX: &str = "HEADER RECORD*******OBS     HEADER RECORD!!!!!!!";

fn validate_prefix(record: &[u8], prefix: &str, expected: &'static str) -> Result<()> {
    if record.len() < RECORD_LEN {
        return Err(XptError::invalid_format(format!(
            "{} too short",
            expected.to_ascii_lowercase()
        )));
    }
    if !record.starts_with(prefix.as_bytes()) {
        return Err(XptError::missing_header(expected));
    }
    Ok(())
}

pub fn validate_member_header(record: &[u8]) -> Result<()> {
    validate_prefix(record, MEMBER_HEADER_PREFIX, "MEMBER HEADER")
}

pub fn validate_dscrptr_header(record: &[u8]) -> Result<()> {
    validate_prefix(record, DSCRPTR_HEADER_PREFIX, "DSCRPTR HEADER")
}

pub fn validate_namestr_header(record: &[u8]) -> Result<()> {
    validate_prefix(record, NAMESTR_HEADER_PREFIX, "NAMESTR HEADER")
}

pub fn validate_obs_header(record: &[u8]) -> Result<()> {
    validate_prefix(record, OBS_HEADER_PREFIX, "OBS HEADER")
}

fn parse_digits(record: &[u8], offset: usize, field: &str) -> Result<usize> {
    read_string(record, offset, 4)
        .trim()
        .parse::<usize>()
        .map_err(|_| XptError::NumericParse {
            field: field.to_string(),
        })
}

/// Parse NAMESTR length from member header record.
///
/// The NAMESTR length is at offset 74-77 (4 ASCII digits): 140, or 136 on VAX/VMS.
pub fn parse_namestr_len(record: &[u8]) -> Result<usize> {
    parse_digits(record, 74, "NAMESTR length")
}

/// Parse variable count from NAMESTR header record (offset 54-57).
pub fn parse_variable_count(record: &[u8]) -> Result<usize> {
    parse_digits(record, 54, "variable count")
}

/// Parse dataset name from member data record (offset 8-15).
pub fn parse_dataset_name(record: &[u8]) -> Result<String> {
    if record.len() < 16 {
        return Err(XptError::invalid_format("member data too short"));
    }
    let name = read_string(record, 8, 8);
    if name.is_empty() {
        return Err(XptError::invalid_format("empty dataset name"));
    }
    Ok(name)
}

/// Parse dataset label from member second record (offset 32-71).
pub fn parse_dataset_label(record: &[u8]) -> Option<String> {
    let label = read_string(record, 32, 40);
    if label.is_empty() { None } else { Some(label) }
}

/// Round a byte offset up to the next record boundary.
pub fn align_to_record(size: usize) -> usize {
    size.div_ceil(RECORD_LEN) * RECORD_LEN
}
