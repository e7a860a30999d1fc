//! XPT file reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Result, XptError};
use crate::float::{MissingValue, ibm_to_ieee, missing_code};
use crate::header::{
    RECORD_LEN, align_to_record, parse_dataset_label, parse_dataset_name, parse_namestr_len,
    parse_namestr_records, parse_real_header, parse_variable_count, validate_dscrptr_header,
    validate_library_header, validate_member_header, validate_namestr_header, validate_obs_header,
};
use crate::types::{XptColumn, XptDataset, XptReaderOptions, XptType, XptValue};

/// Reads the first member of a SAS Transport V5 file.
pub struct XptReader<R: Read> {
    reader: BufReader<R>,
    options: XptReaderOptions,
}

impl<R: Read> XptReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, XptReaderOptions::default())
    }

    pub fn with_options(reader: R, options: XptReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the entire input into memory and parse the first member.
    pub fn read_dataset(mut self) -> Result<XptDataset> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        parse_xpt_data(&data, &self.options)
    }
}

impl XptReader<File> {
    /// Open an XPT file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, XptReaderOptions::default())
    }

    pub fn open_with_options(path: &Path, options: XptReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                XptError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                XptError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an XPT file from a path.
pub fn read_xpt(path: &Path) -> Result<XptDataset> {
    XptReader::open(path)?.read_dataset()
}

pub fn read_xpt_with_options(path: &Path, options: XptReaderOptions) -> Result<XptDataset> {
    XptReader::open_with_options(path, options)?.read_dataset()
}

fn parse_xpt_data(data: &[u8], options: &XptReaderOptions) -> Result<XptDataset> {
    if data.len() < RECORD_LEN * 8 {
        return Err(XptError::invalid_format("file too small"));
    }
    if !data.len().is_multiple_of(RECORD_LEN) {
        return Err(XptError::invalid_format(
            "file length is not a multiple of 80",
        ));
    }

    let mut offset = 0usize;

    validate_library_header(read_record(data, offset)?)?;
    offset += RECORD_LEN;
    let library = parse_real_header(read_record(data, offset)?)?;
    // Real header, then the library modified-datetime record.
    offset += RECORD_LEN * 2;

    let member_header = read_record(data, offset)?;
    validate_member_header(member_header)?;
    let namestr_len = parse_namestr_len(member_header)?;
    offset += RECORD_LEN;

    validate_dscrptr_header(read_record(data, offset)?)?;
    offset += RECORD_LEN;

    let dataset_name = parse_dataset_name(read_record(data, offset)?)?;
    offset += RECORD_LEN;

    let dataset_label = parse_dataset_label(read_record(data, offset)?);
    offset += RECORD_LEN;

    let namestr_header = read_record(data, offset)?;
    validate_namestr_header(namestr_header)?;
    let var_count = parse_variable_count(namestr_header)?;
    offset += RECORD_LEN;

    let namestr_total = var_count
        .checked_mul(namestr_len)
        .ok_or(XptError::ObservationOverflow)?;
    let namestr_data = read_block(data, offset, namestr_total)?;
    let columns = parse_namestr_records(namestr_data, var_count, namestr_len)?;
    offset = align_to_record(offset + namestr_total);

    validate_obs_header(read_record(data, offset)?)?;
    offset += RECORD_LEN;

    let obs_len = observation_length(&columns)?;
    let (rows, special_missing) = parse_observations(data, offset, obs_len, &columns, options)?;

    Ok(XptDataset {
        name: dataset_name,
        label: dataset_label,
        created: library.created,
        columns,
        rows,
        special_missing,
    })
}

fn read_record(data: &[u8], offset: usize) -> Result<&[u8]> {
    data.get(offset..offset + RECORD_LEN)
        .ok_or(XptError::RecordOutOfBounds { offset })
}

fn read_block(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len)
        .ok_or(XptError::RecordOutOfBounds { offset })
}

fn observation_length(columns: &[XptColumn]) -> Result<usize> {
    columns.iter().try_fold(0usize, |total, column| {
        total
            .checked_add(column.length)
            .ok_or(XptError::ObservationOverflow)
    })
}

/// Parse observation data into rows.
///
/// The final record is padded with spaces to 80 bytes, so trailing all-space
/// rows are dropped.
fn parse_observations(
    data: &[u8],
    offset: usize,
    obs_len: usize,
    columns: &[XptColumn],
    options: &XptReaderOptions,
) -> Result<(Vec<Vec<XptValue>>, usize)> {
    if obs_len == 0 {
        return Ok((Vec::new(), 0));
    }
    if offset > data.len() {
        return Err(XptError::RecordOutOfBounds { offset });
    }

    let data_len = data.len() - offset;
    let mut rows_total = data_len / obs_len;
    let remainder = &data[offset + rows_total * obs_len..];
    if remainder.iter().any(|&b| b != b' ') {
        return Err(XptError::TrailingBytes);
    }

    while rows_total > 0 {
        let start = offset + (rows_total - 1) * obs_len;
        if data[start..start + obs_len].iter().all(|&b| b == b' ') {
            rows_total -= 1;
        } else {
            break;
        }
    }

    let mut special_missing = 0usize;
    let mut output = Vec::with_capacity(rows_total);
    for row_idx in 0..rows_total {
        let start = offset + row_idx * obs_len;
        let row_bytes = &data[start..start + obs_len];
        output.push(parse_row(row_bytes, columns, options, &mut special_missing));
    }

    Ok((output, special_missing))
}

fn parse_row(
    row_bytes: &[u8],
    columns: &[XptColumn],
    options: &XptReaderOptions,
    special_missing: &mut usize,
) -> Vec<XptValue> {
    let mut values = Vec::with_capacity(columns.len());
    let mut pos = 0usize;

    for column in columns {
        let slice = &row_bytes[pos..pos + column.length];
        let value = match column.data_type {
            XptType::Char => XptValue::Char(decode_char(slice, options.trim_strings)),
            XptType::Num => {
                let (value, missing) = decode_numeric(slice);
                if matches!(missing, Some(code) if code != MissingValue::Standard) {
                    *special_missing += 1;
                }
                XptValue::Num(value)
            }
        };
        values.push(value);
        pos += column.length;
    }

    values
}

fn decode_char(bytes: &[u8], trim: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if trim {
        text.trim_end().to_string()
    } else {
        text.to_string()
    }
}

fn decode_numeric(bytes: &[u8]) -> (Option<f64>, Option<MissingValue>) {
    if bytes.is_empty() {
        return (None, Some(MissingValue::Standard));
    }
    if let Some(missing) = missing_code(bytes) {
        return (None, Some(missing));
    }

    let mut buf = [0u8; 8];
    let len = bytes.len().min(8);
    buf[..len].copy_from_slice(&bytes[..len]);
    (Some(ibm_to_ieee(buf)), None)
}
