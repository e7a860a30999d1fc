//! Loads complete raw directories from CSV exports and transport files.

use std::fs;
use std::path::Path;

use nhanes_ingest::{DataSourceError, SourceFormat, load_survey_tables, source_status};
use nhanes_model::SurveyTopic;
use nhanes_xpt::header::{
    DSCRPTR_HEADER_PREFIX, LIBRARY_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX,
    NAMESTR_LEN, OBS_HEADER_PREFIX, RECORD_LEN,
};
use nhanes_xpt::ieee_to_ibm;
use polars::prelude::DataType;
use tempfile::TempDir;

fn write_csv_cycle(dir: &Path) {
    fs::write(
        dir.join("DEMO_J.csv"),
        "SEQN,RIAGENDR,RIDAGEYR,INDFMPIR\n1,1,34,0.9\n2,2,61,\n3,1,19,4.2\n",
    )
    .unwrap();
    fs::write(dir.join("SLQ_J.csv"), "SEQN,SLD012,SLD013,SLQ050,SLQ120\n1,7.5,9,2,1\n2,5,6,1,3\n").unwrap();
    fs::write(dir.join("ALQ_J.csv"), "SEQN,ALQ111,ALQ130,ALQ151\n1,1,2,2\n2,2,,\n3,1,5,1\n").unwrap();
    fs::write(dir.join("SMQ_J.csv"), "SEQN,SMQ020,SMQ040,SMD641\n2,1,1,10\n3,2,,\n").unwrap();
    fs::write(dir.join("DPQ_J.csv"), "SEQN,DPQ010\n1,0\n2,1\n3,0\n").unwrap();
}

fn record(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(RECORD_LEN, b' ');
    bytes
}

/// A numeric-only single-member transport file.
fn numeric_xpt(member: &str, names: &[&str], rows: &[Vec<Option<f64>>]) -> Vec<u8> {
    let zeros = "0".repeat(30);
    let mut out = Vec::new();
    out.extend(record(&format!("{LIBRARY_HEADER_PREFIX}{zeros}")));
    out.extend(record("SAS     SAS     SASLIB  9.4"));
    out.extend(record(""));
    out.extend(record(&format!("{MEMBER_HEADER_PREFIX}000000000000000001600000000140")));
    out.extend(record(&format!("{DSCRPTR_HEADER_PREFIX}{zeros}")));
    out.extend(record(&format!("SAS     {member:<8}SASDATA")));
    out.extend(record(""));
    out.extend(record(&format!(
        "{NAMESTR_HEADER_PREFIX}000000{:04}00000000000000000000",
        names.len()
    )));
    for name in names {
        let mut namestr = vec![b' '; NAMESTR_LEN];
        namestr[0..8].copy_from_slice(&[0, 1, 0, 0, 0, 8, 0, 0]);
        namestr[8..16].copy_from_slice(format!("{name:<8}").as_bytes());
        out.extend(namestr);
    }
    out.resize(out.len().div_ceil(RECORD_LEN) * RECORD_LEN, b' ');
    out.extend(record(&format!("{OBS_HEADER_PREFIX}{zeros}")));
    for row in rows {
        for value in row {
            out.extend(value.map_or([b'.', 0, 0, 0, 0, 0, 0, 0], ieee_to_ibm));
        }
    }
    out.resize(out.len().div_ceil(RECORD_LEN) * RECORD_LEN, b' ');
    out
}

#[test]
fn loads_all_five_tables_from_csv() {
    let dir = TempDir::new().unwrap();
    write_csv_cycle(dir.path());

    let tables = load_survey_tables(dir.path(), true).unwrap();
    assert_eq!(tables.demographics.row_count(), 3);
    assert_eq!(tables.sleep.row_count(), 2);
    assert_eq!(tables.smoking.row_count(), 2);
    assert_eq!(tables.iter().count(), 5);
    assert_eq!(tables.sleep.format, SourceFormat::Csv);
    assert_eq!(
        tables.demographics.data.column("INDFMPIR").unwrap().dtype(),
        &DataType::Float64
    );
}

#[test]
fn depression_is_optional() {
    let dir = TempDir::new().unwrap();
    write_csv_cycle(dir.path());
    fs::remove_file(dir.path().join("DPQ_J.csv")).unwrap();

    let tables = load_survey_tables(dir.path(), false).unwrap();
    assert!(tables.depression.is_none());
    assert_eq!(tables.iter().count(), 4);

    let err = load_survey_tables(dir.path(), true).unwrap_err();
    assert!(matches!(
        err,
        DataSourceError::FileNotFound { topic: SurveyTopic::Depression, .. }
    ));
}

#[test]
fn missing_directory_is_a_data_source_error() {
    let dir = TempDir::new().unwrap();
    let err = load_survey_tables(&dir.path().join("raw"), true).unwrap_err();
    assert!(matches!(err, DataSourceError::DirectoryNotFound { .. }));
}

#[test]
fn transport_file_takes_precedence_over_csv() {
    let dir = TempDir::new().unwrap();
    write_csv_cycle(dir.path());
    fs::write(
        dir.path().join("SLQ_J.xpt"),
        numeric_xpt(
            "SLQ_J",
            &["SEQN", "SLD012", "SLD013"],
            &[
                vec![Some(1.0), Some(6.5), None],
                vec![Some(2.0), Some(8.0), Some(9.5)],
                vec![Some(3.0), None, Some(7.0)],
            ],
        ),
    )
    .unwrap();

    let tables = load_survey_tables(dir.path(), true).unwrap();
    let sleep = &tables.sleep;
    assert_eq!(sleep.format, SourceFormat::Xpt);
    assert_eq!(sleep.row_count(), 3);
    assert_eq!(sleep.data.column("SLD012").unwrap().null_count(), 1);
    assert_eq!(
        sleep.data.column("SLD013").unwrap().f64().unwrap().get(1),
        Some(9.5)
    );
}

#[test]
fn corrupt_transport_file_names_topic_and_path() {
    let dir = TempDir::new().unwrap();
    write_csv_cycle(dir.path());
    fs::write(dir.path().join("ALQ_J.xpt"), vec![b'x'; 800]).unwrap();

    let err = load_survey_tables(dir.path(), true).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("alq"), "{message}");
    assert!(message.contains("ALQ_J.xpt"), "{message}");
}

#[test]
fn source_status_lists_present_and_missing_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("DEMO_J.csv"), "SEQN\n1\n").unwrap();

    let status = source_status(dir.path());
    let present: Vec<_> = status.iter().filter(|s| s.is_present()).map(|s| s.topic).collect();
    assert_eq!(present, vec![SurveyTopic::Demographics]);
}
