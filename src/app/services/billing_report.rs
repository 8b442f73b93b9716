//! State billing report over the CSV extracts
//!
//! Sums the `bill_amount` column of every extract in the `Modified`
//! directory by `patient_state` and writes a plain-text breakdown with a
//! grand total to the `Reports` directory.

use crate::constants::{
    BILL_AMOUNT_COLUMN, EXTRACT_EXTENSION, PATIENT_STATE_COLUMN, STATE_REPORT_FILE_NAME,
    UNKNOWN_STATE_LABEL,
};
use crate::{ExtractError, Result};
use indexmap::IndexMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Billed amounts per patient state, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingSummary {
    totals: IndexMap<String, f64>,
    rows_read: usize,
    files_read: usize,
}

impl BillingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every extract directly inside `modified_dir`
    ///
    /// Files are visited in name order so the state order is stable between
    /// runs over the same directory.
    pub fn collect_from_dir(modified_dir: &Path) -> Result<Self> {
        let mut summary = Self::new();

        let mut files = Vec::new();
        for entry in WalkDir::new(modified_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == EXTRACT_EXTENSION)
            {
                files.push(path.to_path_buf());
            }
        }

        for path in &files {
            summary.read_file(path)?;
        }

        info!(
            "Billing summary: {} rows from {} extracts, {} states",
            summary.rows_read,
            summary.files_read,
            summary.totals.len()
        );
        Ok(summary)
    }

    /// Add the rows of one extract file
    ///
    /// Files without the state or amount columns are skipped with a warning.
    pub fn read_file(&mut self, path: &Path) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| ExtractError::csv(path, e))?;

        let headers = reader.headers().map_err(|e| ExtractError::csv(path, e))?;
        let state_index = headers.iter().position(|h| h == PATIENT_STATE_COLUMN);
        let amount_index = headers.iter().position(|h| h == BILL_AMOUNT_COLUMN);

        let (Some(state_index), Some(amount_index)) = (state_index, amount_index) else {
            warn!(
                "Skipping {}: missing {} or {} column",
                path.display(),
                PATIENT_STATE_COLUMN,
                BILL_AMOUNT_COLUMN
            );
            return Ok(());
        };

        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| ExtractError::csv(path, e))?;
            let state = record.get(state_index).unwrap_or("");
            let raw_amount = record.get(amount_index).unwrap_or("").trim();

            let amount = match raw_amount.parse::<f64>() {
                Ok(amount) if amount.is_finite() => amount,
                _ => {
                    warn!(
                        "{} row {}: unusable bill amount '{}', counted as 0.00",
                        path.display(),
                        line + 1,
                        raw_amount
                    );
                    0.0
                }
            };

            self.add(state, amount);
        }

        self.files_read += 1;
        debug!("Read billing rows from {}", path.display());
        Ok(())
    }

    /// Add one amount; a blank state is reported as `N/A`
    pub fn add(&mut self, state: &str, amount: f64) {
        let state = match state.trim() {
            "" => UNKNOWN_STATE_LABEL,
            state => state,
        };

        *self.totals.entry(state.to_string()).or_insert(0.0) += amount;
        self.rows_read += 1;
    }

    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn state_total(&self, state: &str) -> Option<f64> {
        self.totals.get(state).copied()
    }

    pub fn states(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(state, amount)| (state.as_str(), *amount))
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Report body: one tab-separated line per state, then the total
    pub fn render(&self) -> String {
        let mut report = String::new();
        for (state, amount) in self.states() {
            let _ = writeln!(report, "{}\t\t\t\t-\t{:.2}", state, amount);
        }
        let _ = writeln!(report, "Total Billed\t-\t{:.2}", self.total());
        report
    }

    /// Write the report into `reports_dir`, returning its path
    pub fn write_state_report(&self, reports_dir: &Path) -> Result<PathBuf> {
        let path = reports_dir.join(STATE_REPORT_FILE_NAME);
        std::fs::write(&path, self.render()).map_err(|e| {
            ExtractError::io(format!("Failed to write report {}", path.display()), e)
        })?;

        info!("Billing report written: {}", path.display());
        Ok(path)
    }
}
