//! HL7 Extract Library
//!
//! A Rust library for decoding HL7 v2.x messages with a data-driven field
//! specification and extracting them into flat CSV files.
//!
//! This library provides tools for:
//! - Loading per-version segment and datatype definitions from JSON
//! - Resolving each message's delimiters from its MSH header
//! - Decoding messages into named segment, field, and component records
//! - Projecting decoded records onto a fixed extract schema
//! - Appending rows to per-message-type CSV extracts with running counters
//! - Summarising billed amounts by patient state

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;

// Core application modules
pub mod app {
    pub mod services {
        pub mod billing_report;
        pub mod csv_exporter;
        pub mod hl7_decoder;
        pub mod record_projector;
        pub mod spec_table;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use models::{
    DecodedMessage, DelimiterSet, FieldValue, OutputRow, ProcessingStats, SegmentRecord,
};
