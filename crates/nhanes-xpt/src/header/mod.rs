//! XPT header record parsing.
//!
//! - Library headers (file-level metadata)
//! - Member headers (dataset-level metadata)
//! - NAMESTR records (variable definitions)
//! - OBS header (marks start of observation data)

pub mod library;
pub mod member;
pub mod namestr;

pub use library::{
    LIBRARY_HEADER_PREFIX, LIBV8_HEADER_PREFIX, LibraryInfo, RECORD_LEN, parse_real_header,
    parse_xpt_datetime, validate_library_header,
};
pub use member::{
    DSCRPTR_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX, OBS_HEADER_PREFIX,
    align_to_record, parse_dataset_label, parse_dataset_name, parse_namestr_len,
    parse_variable_count, validate_dscrptr_header, validate_member_header,
    validate_namestr_header, validate_obs_header,
};
pub use namestr::{NAMESTR_LEN, NAMESTR_LEN_VAX, parse_namestr, parse_namestr_records};

/// Read a string field, trimming trailing spaces and NUL padding.
pub(crate) fn read_string(data: &[u8], offset: usize, len: usize) -> String {
    data.get(offset..offset + len)
        .map(|slice| {
            String::from_utf8_lossy(slice)
                .trim_end_matches([' ', '\0'])
                .to_string()
        })
        .unwrap_or_default()
}
