//! Derived column helpers

use crate::constants::AREA_CODE_WIDTH;
use crate::models::{DecodedMessage, FieldValue};

/// Leaf text at `path`, or an empty string when any key is missing
pub fn lookup_text<'a>(message: &'a DecodedMessage, path: &[&str]) -> &'a str {
    message.lookup(path).map(FieldValue::as_text).unwrap_or("")
}

/// Join message type and trigger event as `TYPE-EVENT`
///
/// Returns `TYPE` when there is no event and an empty string when there is
/// no type.
pub fn format_message_type(message_type: &str, trigger_event: &str) -> String {
    match (message_type.trim(), trigger_event.trim()) {
        ("", _) => String::new(),
        (kind, "") => kind.to_string(),
        (kind, event) => format!("{}-{}", kind, event),
    }
}

/// Split a free-form phone number into area code and local number
///
/// Only digits are kept. The first digits form the area code and the rest
/// the number; input without digits yields two empty strings.
pub fn split_phone_number(raw: &str) -> (String, String) {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() <= AREA_CODE_WIDTH {
        return (digits, String::new());
    }

    let (area_code, number) = digits.split_at(AREA_CODE_WIDTH);
    (area_code.to_string(), number.to_string())
}
