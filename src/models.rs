//! Core data structures for HL7 decoding and extraction.
//!
//! Defines the per-message delimiter set, the tagged field value produced by
//! the decoder, the decoded message record, projected output rows, and batch
//! processing statistics.

use crate::constants::delimiters;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Encoding characters declared by a message's header segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterSet {
    pub field: char,
    pub subfield: char,
    pub repeat: char,
    pub escape: char,
    pub composite: char,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            field: delimiters::FIELD,
            subfield: delimiters::SUBFIELD,
            repeat: delimiters::REPEAT,
            escape: delimiters::ESCAPE,
            composite: delimiters::COMPOSITE,
        }
    }
}

/// Value stored under a field name in a decoded segment
///
/// Fields without a datatype are kept as raw text. Fields with a datatype are
/// decomposed into named components; for composite-of-composite datatypes a
/// component holding several sub-components becomes a `Repeated` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Repeated(Vec<String>),
    Components(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Leaf text of this value
    ///
    /// A sequence yields its first element and a component mapping yields the
    /// text of its first component, so callers always get a scalar.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Repeated(parts) => parts.first().map(String::as_str).unwrap_or(""),
            FieldValue::Components(components) => components
                .values()
                .next()
                .map(FieldValue::as_text)
                .unwrap_or(""),
        }
    }

    /// Named component of a decomposed field
    pub fn component(&self, name: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Components(components) => components.get(name),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, FieldValue::Components(_))
    }
}

/// Field name → value mapping for one segment
pub type SegmentRecord = IndexMap<String, FieldValue>;

/// Structured record produced by decoding one message
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedMessage {
    /// Version whose tables were used to decode the message
    version: String,
    segments: IndexMap<String, SegmentRecord>,
}

impl DecodedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Store a segment record, replacing any earlier segment with the same id
    pub(crate) fn insert_segment(&mut self, segment_id: &str, record: SegmentRecord) {
        self.segments.insert(segment_id.to_string(), record);
    }

    pub fn segment(&self, segment_id: &str) -> Option<&SegmentRecord> {
        self.segments.get(segment_id)
    }

    pub fn field(&self, segment_id: &str, field_name: &str) -> Option<&FieldValue> {
        self.segment(segment_id)?.get(field_name)
    }

    /// Walk segment → field → component(s); `None` when any key is missing
    pub fn lookup(&self, path: &[&str]) -> Option<&FieldValue> {
        let (segment_id, rest) = path.split_first()?;
        let (field_name, components) = rest.split_first()?;

        let mut current = self.field(segment_id, field_name)?;
        for name in components {
            current = current.component(name)?;
        }
        Some(current)
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One projected extract row, without the leading counter column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputRow {
    pub values: Vec<String>,
}

impl OutputRow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Batch processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub rows_written: usize,
    pub output_files: Vec<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Percentage of discovered files that were decoded, exported, and archived
    pub fn success_rate(&self) -> f64 {
        if self.files_found == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.files_found as f64) * 100.0
        }
    }
}
