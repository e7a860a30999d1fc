//! NAMESTR record parsing.
//!
//! The NAMESTR record describes a single variable. Each is 140 bytes, or
//! 136 bytes for files written on VAX/VMS.
//!
//! | Offset | Field   | Type     | Description                    |
//! |--------|---------|----------|--------------------------------|
//! | 0-1    | ntype   | short    | 1=NUMERIC, 2=CHAR              |
//! | 4-5    | nlng    | short    | Variable length in observation |
//! | 6-7    | nvar0   | short    | Variable number                |
//! | 8-15   | nname   | char[8]  | Variable name                  |
//! | 16-55  | nlabel  | char[40] | Variable label                 |
//! | 56-63  | nform   | char[8]  | Format name                    |
//! | 84-87  | npos    | long     | Position in observation        |

use std::collections::HashSet;

use crate::error::{Result, XptError};
use crate::types::{XptColumn, XptType};

use super::read_string;

/// Standard NAMESTR length.
pub const NAMESTR_LEN: usize = 140;

/// VAX/VMS NAMESTR length (shorter reserved section).
pub const NAMESTR_LEN_VAX: usize = 136;

/// Parse a single NAMESTR record into an [`XptColumn`].
pub fn parse_namestr(data: &[u8], index: usize) -> Result<XptColumn> {
    if data.len() < 88 {
        return Err(XptError::InvalidNamestr {
            index,
            message: format!("data too short: {} bytes", data.len()),
        });
    }

    let ntype = read_i16(data, 0);
    let data_type = XptType::from_ntype(ntype).ok_or_else(|| XptError::InvalidNamestr {
        index,
        message: format!("invalid ntype: {ntype}"),
    })?;

    let length = read_i16(data, 4);
    if length <= 0 {
        return Err(XptError::InvalidNamestr {
            index,
            message: format!("invalid variable length: {length}"),
        });
    }
    if data_type == XptType::Num && !(2..=8).contains(&length) {
        return Err(XptError::InvalidNamestr {
            index,
            message: format!("numeric length must be 2..=8, got {length}"),
        });
    }

    let name = read_string(data, 8, 8);
    if name.is_empty() {
        return Err(XptError::InvalidNamestr {
            index,
            message: "empty variable name".to_string(),
        });
    }

    let label = read_string(data, 16, 40);
    let format = read_string(data, 56, 8);

    Ok(XptColumn {
        name,
        label: (!label.is_empty()).then_some(label),
        data_type,
        length: length as usize,
        format: (!format.is_empty()).then_some(format),
    })
}

/// Parse `var_count` consecutive NAMESTR records.
///
/// Variable names must be unique within a member.
pub fn parse_namestr_records(
    data: &[u8],
    var_count: usize,
    namestr_len: usize,
) -> Result<Vec<XptColumn>> {
    if namestr_len != NAMESTR_LEN && namestr_len != NAMESTR_LEN_VAX {
        return Err(XptError::invalid_format(format!(
            "unsupported NAMESTR length {namestr_len}"
        )));
    }

    let mut columns = Vec::with_capacity(var_count);
    let mut seen = HashSet::with_capacity(var_count);

    for idx in 0..var_count {
        let offset = idx
            .checked_mul(namestr_len)
            .ok_or(XptError::ObservationOverflow)?;
        let record =
            data.get(offset..offset + namestr_len)
                .ok_or_else(|| XptError::InvalidNamestr {
                    index: idx,
                    message: "NAMESTR data out of bounds".to_string(),
                })?;

        let column = parse_namestr(record, idx)?;
        if !seen.insert(column.name.to_ascii_uppercase()) {
            return Err(XptError::duplicate_variable(column.name));
        }
        columns.push(column);
    }

    Ok(columns)
}

fn read_i16(data: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([data[offset], data[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namestr(ntype: i16, length: i16, name: &str, label: &str) -> Vec<u8> {
        let mut record = vec![0u8; NAMESTR_LEN];
        record[0..2].copy_from_slice(&ntype.to_be_bytes());
        record[4..6].copy_from_slice(&length.to_be_bytes());
        record[8..16].fill(b' ');
        record[8..8 + name.len()].copy_from_slice(name.as_bytes());
        record[16..56].fill(b' ');
        record[16..16 + label.len()].copy_from_slice(label.as_bytes());
        record[56..64].fill(b' ');
        record
    }

    #[test]
    fn test_parse_numeric_namestr() {
        let record = namestr(1, 8, "SEQN", "Respondent sequence number");
        let column = parse_namestr(&record, 0).unwrap();
        assert_eq!(column.name, "SEQN");
        assert_eq!(column.data_type, XptType::Num);
        assert_eq!(column.length, 8);
        assert_eq!(column.label.as_deref(), Some("Respondent sequence number"));
        assert_eq!(column.format, None);
    }

    #[test]
    fn test_rejects_bad_ntype_and_length() {
        assert!(parse_namestr(&namestr(3, 8, "X", ""), 0).is_err());
        assert!(parse_namestr(&namestr(1, 0, "X", ""), 0).is_err());
        assert!(parse_namestr(&namestr(1, 9, "X", ""), 0).is_err());
        assert!(parse_namestr(&namestr(2, 200, "X", ""), 0).is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut data = namestr(1, 8, "SEQN", "");
        data.extend(namestr(1, 8, "seqn", ""));
        let err = parse_namestr_records(&data, 2, NAMESTR_LEN).unwrap_err();
        assert!(matches!(err, XptError::DuplicateVariable { .. }));
    }
}
