//! CSV extract writer
//!
//! Appends projected rows to per-message-type extract files under the
//! archive's `Modified` directory. Each file gets its header row once and a
//! leading running counter column that continues across runs.
//!
//! # Architecture
//!
//! - [`exporter`] - `CsvExporter` owning one open sink per extract file
//! - [`utils`] - Extract file naming helpers
//!
//! The exporter is the single writer for its directory. Concurrent callers
//! share it behind a `tokio::sync::Mutex`.

pub mod exporter;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use exporter::{CsvExporter, ExportSummary};
pub use utils::{extract_file_name, sanitize_filename};
