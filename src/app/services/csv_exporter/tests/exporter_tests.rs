//! Tests for extract writing and counter continuity

use super::*;
use crate::constants::ROW_COUNTER_COLUMN;
use tempfile::TempDir;

#[test]
fn test_header_written_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut exporter = CsvExporter::new(temp_dir.path(), run_date());

    exporter.append(Some("ADT"), &create_test_row("1001")).unwrap();
    exporter.append(Some("ADT"), &create_test_row("1002")).unwrap();
    let path = exporter.output_path(Some("ADT"));
    exporter.finish().unwrap();

    let records = read_records(&path);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0][0], ROW_COUNTER_COLUMN);
    assert_eq!(records[0][1], "id");
    assert_eq!(records[0].len(), OUTPUT_COLUMNS.len() + 1);
    assert_eq!(records[1][..2], ["1".to_string(), "1001".to_string()]);
    assert_eq!(records[2][..2], ["2".to_string(), "1002".to_string()]);
}

#[test]
fn test_counter_continues_across_runs() {
    let temp_dir = TempDir::new().unwrap();

    let mut first_run = CsvExporter::new(temp_dir.path(), run_date());
    assert_eq!(first_run.append(Some("ADT"), &create_test_row("a")).unwrap(), 1);
    assert_eq!(first_run.append(Some("ADT"), &create_test_row("b")).unwrap(), 2);
    first_run.finish().unwrap();
    drop(first_run);

    let mut second_run = CsvExporter::new(temp_dir.path(), run_date());
    assert_eq!(second_run.append(Some("ADT"), &create_test_row("c")).unwrap(), 3);
    let summaries = second_run.finish().unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].rows_appended, 1);
    assert_eq!(summaries[0].total_rows, 3);

    let records = read_records(&summaries[0].path);
    let headers = records
        .iter()
        .filter(|record| record[0] == ROW_COUNTER_COLUMN)
        .count();
    assert_eq!(headers, 1);
    assert_eq!(
        records[1..].iter().map(|r| r[0].as_str()).collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );
}

#[test]
fn test_rows_routed_by_message_type() {
    let temp_dir = TempDir::new().unwrap();
    let mut exporter = CsvExporter::new(temp_dir.path(), run_date());

    assert_eq!(exporter.append(Some("ADT"), &create_test_row("1")).unwrap(), 1);
    assert_eq!(exporter.append(Some("ORU"), &create_test_row("2")).unwrap(), 1);
    assert_eq!(exporter.append(None, &create_test_row("3")).unwrap(), 1);
    assert_eq!(exporter.append(Some("ADT"), &create_test_row("4")).unwrap(), 2);

    let files = exporter.output_files();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "ADT_20240105_Modified_file.csv",
            "ORU_20240105_Modified_file.csv",
            "UNKNOWN_20240105_Modified_file.csv",
        ]
    );
    exporter.finish().unwrap();
}

#[test]
fn test_values_are_quoted() {
    let temp_dir = TempDir::new().unwrap();
    let mut exporter = CsvExporter::new(temp_dir.path(), run_date());

    let row = create_test_row("Doe, John \"JJ\"");
    exporter.append(Some("ADT"), &row).unwrap();
    let path = exporter.output_path(Some("ADT"));
    exporter.finish().unwrap();

    let records = read_records(&path);
    assert_eq!(records[1][1], "Doe, John \"JJ\"");
    assert_eq!(records[1].len(), OUTPUT_COLUMNS.len() + 1);
}

#[test]
fn test_existing_empty_file_gets_header() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = CsvExporter::new(temp_dir.path(), run_date());
    let path = exporter.output_path(Some("ADT"));
    std::fs::write(&path, "").unwrap();

    let mut exporter = exporter;
    assert_eq!(exporter.append(Some("ADT"), &create_test_row("x")).unwrap(), 1);
    exporter.finish().unwrap();

    let records = read_records(&path);
    assert_eq!(records[0][0], ROW_COUNTER_COLUMN);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_missing_output_dir_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut exporter = CsvExporter::new(temp_dir.path().join("missing"), run_date());

    assert!(exporter.append(Some("ADT"), &create_test_row("x")).is_err());
}
