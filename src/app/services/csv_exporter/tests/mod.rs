//! Shared fixtures for CSV exporter tests

use super::*;
use crate::app::services::record_projector::OUTPUT_COLUMNS;
use crate::models::OutputRow;
use chrono::NaiveDate;
use std::path::Path;

pub mod exporter_tests;

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

/// Full-width row whose first column carries `id`
pub fn create_test_row(id: &str) -> OutputRow {
    let mut values = vec![String::new(); OUTPUT_COLUMNS.len()];
    values[0] = id.to_string();
    OutputRow { values }
}

/// All records of an extract file, header included
pub fn read_records(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}
