use anyhow::{Context, anyhow};
use clap::Parser;
use hl7_extract::ExtractError;
use hl7_extract::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();
    let intake = args.intake.clone();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<_> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => {
                result.with_context(|| format!("Extraction of {} failed", intake.display()))
            }
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, shutting down...");
                    Err(ExtractError::processing_interrupted("Processing interrupted by user").into())
                }
                Err(e) => Err(anyhow!(e).context("Failed to install CTRL+C handler")),
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
