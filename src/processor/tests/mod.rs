//! Integration tests for the processor module
//!
//! Runs the batch pipeline over temporary intake and archive directories
//! using the bundled specification.

use crate::config::ExtractConfig;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


pub fn bundled_spec_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("spec/hl7_spec.json")
}

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

/// Intake directory plus a configuration pointing at a sibling archive
pub fn create_workspace(temp_dir: &TempDir) -> ExtractConfig {
    let intake = temp_dir.path().join("intake");
    fs::create_dir_all(&intake).unwrap();

    ExtractConfig::new(intake)
        .with_archive_dir(temp_dir.path().join("Archive"))
        .with_spec_path(bundled_spec_path())
        .with_max_concurrent_files(2)
}

/// Admission message for one patient living in `state`
pub fn create_message(control_id: &str, message_type: &str, state: &str, charges: &str) -> String {
    let pid = format!(
        "PID|1||{id}^^^HOSP||Doe^John^A||19800101|M|||1 Main St^^Springfield^{state}^62701",
        id = control_id,
        state = state
    );
    let pv1 = format!("PV1|1|I{}|{}", "|".repeat(44), charges);

    format!(
        "MSH|^~\\&|EPIC|NORTHSIDE|BILLING|ACME|20240105083000||{}|{}|P|2.3\n{}\n{}\n",
        message_type, control_id, pid, pv1
    )
}

pub fn write_intake(config: &ExtractConfig, name: &str, content: &str) -> PathBuf {
    let path = config.intake_dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Data rows of an extract file, header excluded
pub fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|record| record.unwrap()).collect()
}
