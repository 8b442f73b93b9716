//! Per-message-type CSV extract writer

use super::utils::extract_file_name;
use crate::app::services::record_projector::RecordProjector;
use crate::constants::ROW_COUNTER_COLUMN;
use crate::models::OutputRow;
use crate::{ExtractError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Open extract file and its running counter
struct ExtractSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    /// Counter value of the last row in the file
    last_row: usize,
    rows_appended: usize,
}

impl ExtractSink {
    /// Open an extract file for appending
    ///
    /// The counter resumes from the number of data rows already present; the
    /// header row is written only when the file is new or empty.
    fn open(path: PathBuf) -> Result<Self> {
        let existing_rows = count_data_rows(&path)?;
        let needs_header = std::fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                ExtractError::io(format!("Failed to open extract {}", path.display()), e)
            })?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            let header = std::iter::once(ROW_COUNTER_COLUMN).chain(RecordProjector::header());
            writer
                .write_record(header)
                .map_err(|e| ExtractError::csv(&path, e))?;
            debug!("Created extract {}", path.display());
        } else {
            debug!(
                "Resuming extract {} after {} existing rows",
                path.display(),
                existing_rows
            );
        }

        Ok(Self {
            path,
            writer,
            last_row: existing_rows,
            rows_appended: 0,
        })
    }

    fn append(&mut self, row: &OutputRow) -> Result<usize> {
        let counter = self.last_row + 1;
        let counter_text = counter.to_string();

        let record =
            std::iter::once(counter_text.as_str()).chain(row.values.iter().map(String::as_str));
        self.writer
            .write_record(record)
            .map_err(|e| ExtractError::csv(&self.path, e))?;
        self.writer
            .flush()
            .map_err(|e| ExtractError::io(format!("Failed to flush {}", self.path.display()), e))?;

        self.last_row = counter;
        self.rows_appended += 1;
        Ok(counter)
    }
}

/// Rows appended to one extract file during this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows_appended: usize,
    pub total_rows: usize,
}

/// Writer for every extract file in one output directory
pub struct CsvExporter {
    output_dir: PathBuf,
    run_date: NaiveDate,
    sinks: HashMap<PathBuf, ExtractSink>,
}

impl CsvExporter {
    /// Create an exporter writing into `output_dir`
    ///
    /// Files are opened lazily on the first row routed to them.
    pub fn new(output_dir: impl Into<PathBuf>, run_date: NaiveDate) -> Self {
        Self {
            output_dir: output_dir.into(),
            run_date,
            sinks: HashMap::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    /// Extract path for a message type; `None` routes to the unknown file
    pub fn output_path(&self, message_type: Option<&str>) -> PathBuf {
        self.output_dir.join(extract_file_name(message_type, self.run_date))
    }

    /// Append one row, returning the counter value written with it
    pub fn append(&mut self, message_type: Option<&str>, row: &OutputRow) -> Result<usize> {
        let path = self.output_path(message_type);
        let sink = match self.sinks.entry(path) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let sink = ExtractSink::open(entry.key().clone())?;
                entry.insert(sink)
            }
        };

        sink.append(row)
    }

    /// Files written during this run, in path order
    pub fn output_files(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.sinks.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Flush every open extract file and summarise this run's appends
    pub fn finish(&mut self) -> Result<Vec<ExportSummary>> {
        let mut summaries = Vec::with_capacity(self.sinks.len());

        for sink in self.sinks.values_mut() {
            sink.writer.flush().map_err(|e| {
                ExtractError::io(format!("Failed to flush {}", sink.path.display()), e)
            })?;

            info!(
                "Extract {}: {} rows appended ({} total)",
                sink.path.display(),
                sink.rows_appended,
                sink.last_row
            );

            summaries.push(ExportSummary {
                path: sink.path.clone(),
                rows_appended: sink.rows_appended,
                total_rows: sink.last_row,
            });
        }

        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(summaries)
    }
}

/// Number of data rows (excluding the header) in an existing extract
fn count_data_rows(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ExtractError::csv(path, e))?;

    let mut rows = 0;
    for record in reader.records() {
        record.map_err(|e| ExtractError::csv(path, e))?;
        rows += 1;
    }
    Ok(rows)
}
