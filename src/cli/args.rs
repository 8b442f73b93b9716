//! Command-line argument definitions for the HL7 extractor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ExtractConfig;
use crate::constants::{DEFAULT_ARCHIVE_DIR, DEFAULT_HL7_VERSION, DEFAULT_SPEC_PATH};
use crate::{ExtractError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Upper bound on concurrent file workers
pub const MAX_WORKERS: usize = 256;

/// CLI arguments for the HL7 batch extractor
///
/// Decodes HL7 v2.x message files from an intake directory into CSV extracts
/// and archives the originals.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hl7-extract",
    version,
    about = "Decode HL7 v2.x message files into CSV extracts",
    long_about = "Decodes every .txt HL7 v2.x message in an intake directory using a JSON \
                  field specification, appends one row per message to per-message-type CSV \
                  extracts under <archive>/Modified, moves processed messages to \
                  <archive>/Original, and writes a billing summary by patient state to \
                  <archive>/Reports."
)]
pub struct Args {
    /// Directory holding the message files to process
    #[arg(
        short = 'i',
        long = "intake",
        value_name = "DIR",
        help = "Directory holding the .txt message files to process"
    )]
    pub intake: PathBuf,

    /// Archive root for originals, extracts, and reports
    #[arg(
        short = 'a',
        long = "archive",
        value_name = "DIR",
        default_value = DEFAULT_ARCHIVE_DIR,
        help = "Archive root receiving Original/, Modified/ and Reports/"
    )]
    pub archive: PathBuf,

    /// JSON field specification
    #[arg(
        short = 's',
        long = "specification",
        value_name = "FILE",
        default_value = DEFAULT_SPEC_PATH,
        help = "JSON field specification"
    )]
    pub specification: PathBuf,

    /// Version used when a message does not declare a known version
    #[arg(
        long = "hl7-version",
        visible_alias = "target-version",
        value_name = "VERSION",
        default_value = DEFAULT_HL7_VERSION,
        help = "Fallback HL7 version for messages without a known version"
    )]
    pub hl7_version: String,

    /// Emit only the fields marked required
    #[arg(short = 'r', long = "required", help = "Emit only fields marked required")]
    pub required: bool,

    /// Number of files processed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = num_cpus::get(),
        help = "Number of files processed concurrently"
    )]
    pub workers: usize,

    /// Perform a dry run without touching any file
    #[arg(
        long = "dry-run",
        help = "List the files that would be processed without decoding or moving them"
    )]
    pub dry_run: bool,

    /// Skip the billing report
    #[arg(long = "no-report", help = "Do not write the state billing report")]
    pub no_report: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate argument values that clap cannot check
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ExtractError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(ExtractError::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if self.hl7_version.trim().is_empty() {
            return Err(ExtractError::configuration("HL7 version cannot be empty"));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the run configuration
    pub fn to_config(&self) -> ExtractConfig {
        let config = ExtractConfig::new(&self.intake)
            .with_archive_dir(&self.archive)
            .with_spec_path(&self.specification)
            .with_default_version(self.hl7_version.trim())
            .with_required_only(self.required)
            .with_max_concurrent_files(self.workers)
            .with_dry_run(self.dry_run);

        if self.no_report {
            config.without_report()
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("hl7-extract").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--intake", "in"]).unwrap();

        assert_eq!(args.intake, PathBuf::from("in"));
        assert_eq!(args.archive, PathBuf::from("./Archive/"));
        assert_eq!(args.specification, PathBuf::from("spec/hl7_spec.json"));
        assert_eq!(args.hl7_version, "2.3");
        assert!(!args.required);
        assert!(!args.dry_run);
        assert!(args.workers >= 1);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
    }

    #[test]
    fn test_intake_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&[
            "-i", "in", "-a", "out", "-s", "spec.json", "-r", "-j", "3", "-vv",
        ])
        .unwrap();

        assert_eq!(args.archive, PathBuf::from("out"));
        assert_eq!(args.specification, PathBuf::from("spec.json"));
        assert!(args.required);
        assert_eq!(args.workers, 3);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_version_option_and_alias() {
        let args = parse(&["-i", "in", "--hl7-version", "2.5.1"]).unwrap();
        assert_eq!(args.hl7_version, "2.5.1");

        let args = parse(&["-i", "in", "--target-version", "2.4"]).unwrap();
        assert_eq!(args.hl7_version, "2.4");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(parse(&["-i", "in", "-q", "-v"]).is_err());

        let args = parse(&["-i", "in", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_validate_workers() {
        let args = parse(&["-i", "in", "-j", "0"]).unwrap();
        assert!(args.validate().is_err());

        let args = parse(&["-i", "in", "-j", "1000"]).unwrap();
        assert!(args.validate().is_err());

        let args = parse(&["-i", "in", "-j", "4"]).unwrap();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_to_config() {
        let args = parse(&[
            "-i",
            "in",
            "-a",
            "arch",
            "--hl7-version",
            " 2.5.1 ",
            "-r",
            "-j",
            "2",
            "--dry-run",
            "--no-report",
        ])
        .unwrap();

        let config = args.to_config();
        assert_eq!(config.intake_dir, PathBuf::from("in"));
        assert_eq!(config.modified_dir(), PathBuf::from("arch/Modified"));
        assert_eq!(config.default_version, "2.5.1");
        assert!(config.required_only);
        assert_eq!(config.max_concurrent_files, 2);
        assert!(config.dry_run);
        assert!(!config.write_report);
    }
}
