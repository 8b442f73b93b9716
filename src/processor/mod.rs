//! Batch extraction engine.
//!
//! Orchestrates one run over the intake directory: discover message files,
//! decode and project each one concurrently, append the rows to the CSV
//! extracts, archive the originals, and summarise billing by state.

pub mod archive;
pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::IntakeDiscovery;

use crate::app::services::billing_report::BillingSummary;
use crate::app::services::csv_exporter::CsvExporter;
use crate::app::services::hl7_decoder::MessageDecoder;
use crate::app::services::record_projector::RecordProjector;
use crate::app::services::spec_table::SpecTable;
use crate::config::ExtractConfig;
use crate::models::ProcessingStats;
use crate::{ExtractError, Result};

use chrono::NaiveDate;
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Main processor for one extraction run
#[derive(Debug)]
pub struct BatchProcessor {
    config: ExtractConfig,
    decoder: MessageDecoder,
    projector: RecordProjector,
    discovery: IntakeDiscovery,
    show_progress: bool,
}

impl BatchProcessor {
    /// Create a processor, loading the specification once
    ///
    /// # Errors
    /// * `ExtractError::SpecLoad` if the specification cannot be loaded; the
    ///   run must not start
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let spec = Arc::new(SpecTable::load(&config.spec_path)?);

        if !spec.contains_version(&config.default_version) {
            warn!(
                "Default version {} is not defined in {}; messages without a known version will fail",
                config.default_version,
                config.spec_path.display()
            );
        }

        Ok(Self {
            decoder: MessageDecoder::new(spec, &config.default_version, config.required_only),
            projector: RecordProjector::for_today(),
            discovery: IntakeDiscovery::new(&config.intake_dir),
            show_progress: false,
            config,
        })
    }

    /// Stamp rows and name extracts with a fixed run date
    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.projector = RecordProjector::new(run_date);
        self
    }

    /// Show a progress bar while files are processed
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn run_date(&self) -> NaiveDate {
        self.projector.service_date()
    }

    /// Main processing entry point
    ///
    /// Per-file failures are logged and counted; the failed file stays in
    /// intake. Only setup failures abort the run.
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let mut stats = ProcessingStats::default();

        let files = self.discovery.discover()?;
        stats.files_found = files.len();
        info!(
            "Found {} intake files in {}",
            files.len(),
            self.config.intake_dir.display()
        );

        if self.config.dry_run {
            self.report_dry_run(&files);
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        archive::ensure_archive_dirs(&self.config).await?;

        if files.is_empty() {
            info!("Nothing to do");
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        let exporter = Arc::new(Mutex::new(CsvExporter::new(
            self.config.modified_dir(),
            self.run_date(),
        )));
        let original_dir = self.config.original_dir();
        let progress_bar = self.create_progress_bar(files.len() as u64);

        let outcomes = stream::iter(files)
            .map(|path| {
                let exporter = Arc::clone(&exporter);
                let original_dir = original_dir.clone();
                let progress_bar = progress_bar.clone();
                async move {
                    let outcome = self.process_file(&path, &exporter, &original_dir).await;
                    if let Some(pb) = &progress_bar {
                        pb.inc(1);
                    }
                    (path, outcome)
                }
            })
            .buffer_unordered(self.config.max_concurrent_files.max(1))
            .collect::<Vec<_>>()
            .await;

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("done");
        }

        for (path, outcome) in outcomes {
            match outcome {
                Ok(counter) => {
                    debug!("{} written as row {}", path.display(), counter);
                    stats.files_processed += 1;
                    stats.rows_written += 1;
                }
                Err(e) => {
                    error!("Failed to process {}: {}", path.display(), e);
                    stats.files_failed += 1;
                    stats.failures.push((path, e.to_string()));
                }
            }
        }
        stats.failures.sort();

        let summaries = exporter.lock().await.finish()?;
        stats.output_files = summaries.into_iter().map(|summary| summary.path).collect();

        if self.config.write_report {
            stats.report_path = self.write_billing_report();
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Processed {}/{} files in {}ms",
            stats.files_processed, stats.files_found, stats.processing_time_ms
        );

        Ok(stats)
    }

    /// Decode, project, export, and archive one message file
    ///
    /// Returns the counter value of the written row.
    async fn process_file(
        &self,
        path: &Path,
        exporter: &Mutex<CsvExporter>,
        original_dir: &Path,
    ) -> Result<usize> {
        let decoder = self.decoder.clone();
        let source = path.to_path_buf();
        let message = task::spawn_blocking(move || decoder.decode_file(&source))
            .await
            .map_err(|e| {
                ExtractError::decode(
                    path.display().to_string(),
                    format!("Decode task failed: {}", e),
                )
            })??;

        let row = self.projector.project(&message);
        let message_type = RecordProjector::message_type_code(&message);

        let counter = exporter
            .lock()
            .await
            .append(message_type.as_deref(), &row)?;

        archive::archive_original(path, original_dir).await?;
        Ok(counter)
    }

    /// Rebuild the state billing report; failures are logged, not returned
    fn write_billing_report(&self) -> Option<PathBuf> {
        let result = BillingSummary::collect_from_dir(&self.config.modified_dir())
            .and_then(|summary| summary.write_state_report(&self.config.reports_dir()));

        match result {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Billing report not written: {}", e);
                None
            }
        }
    }

    fn report_dry_run(&self, files: &[PathBuf]) {
        println!(
            "{} {} files would be processed",
            "Dry run:".bright_yellow().bold(),
            files.len().to_string().bright_white().bold()
        );
        for file in files {
            println!(
                "  {} -> {}",
                file.display(),
                self.config.original_dir().display()
            );
        }
        println!(
            "  {} {}",
            "Extracts:".bright_cyan(),
            self.config.modified_dir().display()
        );
    }

    fn create_progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Extracting messages");
        Some(pb)
    }
}
