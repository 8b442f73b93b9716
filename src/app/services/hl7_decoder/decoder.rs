//! Segment walk and field naming
//!
//! Decoding is line oriented. Each header segment re-establishes the active
//! delimiter set and version tables; every following segment is named with
//! those tables until the next header.

use super::delimiters::resolve_delimiters;
use super::field_parsers::decompose_field;
use crate::app::services::spec_table::{SpecTable, VersionSpec};
use crate::constants::{HEADER_SEGMENT_ID, VERSION_FIELD_ORDINAL};
use crate::models::{DecodedMessage, DelimiterSet, FieldValue, SegmentRecord};
use crate::{ExtractError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Decoder bound to a loaded specification and run options
#[derive(Debug, Clone)]
pub struct MessageDecoder {
    spec: Arc<SpecTable>,
    default_version: String,
    required_only: bool,
}

impl MessageDecoder {
    pub fn new(
        spec: Arc<SpecTable>,
        default_version: impl Into<String>,
        required_only: bool,
    ) -> Self {
        Self {
            spec,
            default_version: default_version.into(),
            required_only,
        }
    }

    pub fn spec(&self) -> &SpecTable {
        &self.spec
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    pub fn required_only(&self) -> bool {
        self.required_only
    }

    /// Decode one message held in memory
    pub fn decode(&self, text: &str) -> Result<DecodedMessage> {
        decode_message(text, &self.spec, &self.default_version, self.required_only)
    }

    /// Read and decode one message file
    ///
    /// Unreadable files are reported as decode errors carrying the path;
    /// format errors pass through unchanged.
    pub fn decode_file(&self, path: &Path) -> Result<DecodedMessage> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::decode(path.display().to_string(), e.to_string()))?;

        self.decode(&text).map_err(|e| match e {
            ExtractError::Decode { reason, .. } => {
                ExtractError::decode(path.display().to_string(), reason)
            }
            other => other,
        })
    }
}

/// Decoding state carried between segments
struct ActiveHeader<'a> {
    delimiters: DelimiterSet,
    spec: Option<&'a VersionSpec>,
}

/// Decode a raw HL7 message into named segment records
///
/// `default_version` names the tables used when a header's version token is
/// absent or not present in `spec`. With `required_only`, fields not marked
/// required are left out of the output.
///
/// # Errors
/// * `ExtractError::Format` for a message with no header, a segment before
///   any header, a header too short to declare delimiters, or an
///   unresolvable version
/// * `ExtractError::Decode` when the active version has no header table or a
///   field names a datatype the version does not define
pub fn decode_message(
    text: &str,
    spec: &SpecTable,
    default_version: &str,
    required_only: bool,
) -> Result<DecodedMessage> {
    let mut message = DecodedMessage::new();
    let mut active = ActiveHeader {
        delimiters: DelimiterSet::default(),
        spec: None,
    };

    for line in text.split(['\n', '\r']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_header = is_header_line(line);
        if is_header {
            active.delimiters = resolve_delimiters(line)?;
        }

        let mut field_separator = [0u8; 4];
        let mut fields: Vec<&str> = line.split(active.delimiters.field).collect();
        let segment_id = fields[0];
        if segment_id.is_empty() {
            trace!("Skipping line with empty segment id");
            continue;
        }

        if is_header {
            // The field separator itself counts as the first header field
            let separator: &str = active.delimiters.field.encode_utf8(&mut field_separator);
            fields.insert(1, separator);

            let version_spec = select_version(&fields, &active.delimiters, spec, default_version)?;
            if !version_spec.has_segment(HEADER_SEGMENT_ID) {
                return Err(ExtractError::decode(
                    "message",
                    format!(
                        "Version {} defines no {} segment",
                        version_spec.version(),
                        HEADER_SEGMENT_ID
                    ),
                ));
            }

            message.set_version(version_spec.version());
            active.spec = Some(version_spec);
        }

        let Some(version_spec) = active.spec else {
            return Err(ExtractError::format(format!(
                "Segment {} precedes the {} header",
                segment_id, HEADER_SEGMENT_ID
            )));
        };

        let record = decode_segment(
            segment_id,
            &fields,
            version_spec,
            &active.delimiters,
            required_only,
        )?;
        trace!("Decoded {} with {} fields", segment_id, record.len());
        message.insert_segment(segment_id, record);
    }

    if active.spec.is_none() {
        return Err(ExtractError::format(format!(
            "Message has no {} header segment",
            HEADER_SEGMENT_ID
        )));
    }

    debug!(
        "Decoded message: {} segments, version {}",
        message.segment_count(),
        message.version()
    );

    Ok(message)
}

/// A header line is the header id followed by a non-alphanumeric field
/// delimiter; a bare id is also treated as a (too short) header
fn is_header_line(line: &str) -> bool {
    let Some(rest) = line.strip_prefix(HEADER_SEGMENT_ID) else {
        return false;
    };
    rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
}

/// Pick the version tables named by a header's version field
fn select_version<'a>(
    fields: &[&str],
    delimiters: &DelimiterSet,
    spec: &'a SpecTable,
    default_version: &str,
) -> Result<&'a VersionSpec> {
    let token = fields
        .get(VERSION_FIELD_ORDINAL)
        .and_then(|raw| raw.split(delimiters.subfield).next())
        .map(str::trim)
        .filter(|version| !version.is_empty());

    spec.resolve(token, default_version)
}

/// Name the fields of one segment with the active version tables
///
/// Segment ids unknown to the version produce an empty record.
fn decode_segment(
    segment_id: &str,
    fields: &[&str],
    spec: &VersionSpec,
    delimiters: &DelimiterSet,
    required_only: bool,
) -> Result<SegmentRecord> {
    let mut record = SegmentRecord::new();

    let Some(table) = spec.segment(segment_id) else {
        return Ok(record);
    };

    for (ordinal, raw) in fields.iter().enumerate().skip(1) {
        let Some(def) = table.get(&ordinal) else {
            continue;
        };
        if required_only && !def.required {
            continue;
        }

        let value = match def.datatype.as_deref() {
            None => FieldValue::Text(raw.to_string()),
            Some(datatype) => {
                let components = spec.datatype(datatype).ok_or_else(|| {
                    ExtractError::decode(
                        "message",
                        format!(
                            "Field {}-{} ({}) references undefined datatype {}",
                            segment_id, ordinal, def.name, datatype
                        ),
                    )
                })?;
                decompose_field(raw, components, def.is_composite_of_composite(), delimiters)
            }
        };

        record.insert(def.name.clone(), value);
    }

    Ok(record)
}
