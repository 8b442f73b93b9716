//! Record projection into the extract schema
//!
//! Maps a decoded message onto the fixed, ordered column list written to the
//! CSV extracts. Projection never fails: every missing segment, field, or
//! component degrades to an empty string so each row has the same width.
//!
//! # Architecture
//!
//! - [`schema`] - Ordered column list and the source of each column
//! - [`derived`] - Columns computed from one or more decoded values
//! - [`projector`] - `RecordProjector` applying the schema to a message
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hl7_extract::app::services::record_projector::RecordProjector;
//! use hl7_extract::models::DecodedMessage;
//!
//! # fn example(message: &DecodedMessage) {
//! let run_date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let projector = RecordProjector::new(run_date);
//!
//! let row = projector.project(message);
//! assert_eq!(row.len(), RecordProjector::header().len());
//! # }
//! ```

pub mod derived;
pub mod projector;
pub mod schema;

#[cfg(test)]
pub mod tests;

pub use derived::{format_message_type, lookup_text, split_phone_number};
pub use projector::RecordProjector;
pub use schema::{ColumnSource, OUTPUT_COLUMNS, OutputColumn};
