//! Component decomposition for typed fields
//!
//! Splits a raw field on the subfield delimiter and names each part from the
//! datatype's component table. Composite-of-composite datatypes split each
//! part once more on the composite delimiter.

use crate::app::services::spec_table::ComponentTable;
use crate::models::{DelimiterSet, FieldValue};
use indexmap::IndexMap;

/// Decompose a raw field value into named components
///
/// Positions with no component name in `components` are dropped. An empty
/// raw value still yields its first component (as empty text) when the
/// datatype names one.
pub fn decompose_field(
    raw: &str,
    components: &ComponentTable,
    composite_of_composite: bool,
    delimiters: &DelimiterSet,
) -> FieldValue {
    let mut named = IndexMap::with_capacity(components.len());

    for (index, part) in raw.split(delimiters.subfield).enumerate() {
        let Some(name) = components.get(&(index + 1)) else {
            continue;
        };

        let value = if composite_of_composite {
            split_sub_components(part, delimiters.composite)
        } else {
            FieldValue::Text(part.to_string())
        };

        named.insert(name.clone(), value);
    }

    FieldValue::Components(named)
}

/// Split one component on the composite delimiter
///
/// A single piece stays scalar text; several pieces become a sequence.
pub fn split_sub_components(part: &str, composite: char) -> FieldValue {
    let mut pieces: Vec<String> = part.split(composite).map(str::to_string).collect();

    if pieces.len() == 1 {
        FieldValue::Text(pieces.remove(0))
    } else {
        FieldValue::Repeated(pieces)
    }
}
