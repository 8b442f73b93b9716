//! Command implementations for the HL7 extractor CLI
//!
//! This module contains the main command execution logic, logging setup,
//! and the end-of-run summary.

use crate::cli::args::Args;
use crate::models::ProcessingStats;
use crate::processor::BatchProcessor;
use crate::{ExtractError, Result};
use colored::*;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging
/// 2. Validate arguments and build the run configuration
/// 3. Load the specification and process the intake directory
/// 4. Print the summary
pub async fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    info!("Starting HL7 extraction");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    config.validate()?;

    let processor = BatchProcessor::new(config)?.with_progress(args.show_progress());
    let stats = processor.process().await?;

    if !args.quiet && !processor.config().dry_run {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides the level derived from the verbosity flags.
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hl7_extract={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| {
        ExtractError::configuration(format!("Failed to initialise logging: {}", e))
    })?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the end-of-run summary to stdout
pub fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Extraction Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );

    if stats.files_found == 0 {
        println!("  {}", "No message files in intake, nothing to do".bright_yellow());
        return;
    }

    println!(
        "  {} {}/{} ({:.1}%)",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white().bold(),
        stats.files_found,
        stats.success_rate()
    );
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_written.to_string().bright_white().bold()
    );

    for path in &stats.output_files {
        println!("  {} {}", "Extract:".bright_cyan(), path.display());
    }
    if let Some(report) = &stats.report_path {
        println!("  {} {}", "Report:".bright_cyan(), report.display());
    }

    if stats.files_failed > 0 {
        println!(
            "  {} {} (left in intake)",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
        for (path, reason) in &stats.failures {
            println!("    {} {}", path.display().to_string().red(), reason);
        }
    }
}
