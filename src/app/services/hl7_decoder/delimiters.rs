//! Delimiter resolution from the header segment
//!
//! The header segment declares its own encoding characters: the character
//! directly after the segment id is the field delimiter and the next four are
//! the subfield, repeat, escape, and composite delimiters.

use crate::constants::{HEADER_SEGMENT_ID, MIN_HEADER_LENGTH};
use crate::models::DelimiterSet;
use crate::{ExtractError, Result};

/// Extract the delimiter set declared by a raw header line
///
/// Offsets are counted in characters. A line too short to carry all five
/// encoding characters is rejected rather than patched with defaults.
pub fn resolve_delimiters(header_line: &str) -> Result<DelimiterSet> {
    let encoding: Vec<char> = header_line
        .chars()
        .skip(HEADER_SEGMENT_ID.len())
        .take(MIN_HEADER_LENGTH - HEADER_SEGMENT_ID.len())
        .collect();

    let [field, subfield, repeat, escape, composite] = encoding[..] else {
        return Err(ExtractError::format(format!(
            "Header segment too short to declare delimiters ({} characters, need {}): '{}'",
            header_line.chars().count(),
            MIN_HEADER_LENGTH,
            header_line
        )));
    };

    Ok(DelimiterSet {
        field,
        subfield,
        repeat,
        escape,
        composite,
    })
}
