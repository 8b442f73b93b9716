//! Spec-driven HL7 v2.x message decoder
//!
//! Turns a pipe-delimited HL7 message into a structured [`DecodedMessage`]
//! using the per-version definitions held by the specification table.
//!
//! ## Architecture
//!
//! - [`delimiters`] - Encoding character extraction from the header segment
//! - [`decoder`] - Segment walk, header state tracking, and field naming
//! - [`field_parsers`] - Component and sub-component decomposition
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use hl7_extract::app::services::hl7_decoder::MessageDecoder;
//! use hl7_extract::app::services::spec_table::SpecTable;
//!
//! # fn example(spec: Arc<SpecTable>) -> hl7_extract::Result<()> {
//! let decoder = MessageDecoder::new(spec, "2.3", false);
//! let message = decoder.decode("MSH|^~\\&|APP|FAC|||20240101||ADT^A01|1|P|2.3\nPID|||123||Doe^John")?;
//!
//! println!("Decoded {} segments with version {}", message.segment_count(), message.version());
//! # Ok(())
//! # }
//! ```
//!
//! [`DecodedMessage`]: crate::models::DecodedMessage

pub mod decoder;
pub mod delimiters;
pub mod field_parsers;

#[cfg(test)]
pub mod tests;

pub use decoder::{MessageDecoder, decode_message};
pub use delimiters::resolve_delimiters;
