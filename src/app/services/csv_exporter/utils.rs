//! Extract file naming helpers

use crate::constants::{EXTRACT_FILE_SUFFIX, SERVICE_DATE_FORMAT, UNKNOWN_MESSAGE_TYPE};
use chrono::NaiveDate;

/// Replace anything other than ASCII alphanumerics, `-` and `_` with `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

/// `<MSGTYPE>_<YYYYMMDD>_Modified_file.csv` for a message type and run date
pub fn extract_file_name(message_type: Option<&str>, run_date: NaiveDate) -> String {
    let message_type = message_type
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or(UNKNOWN_MESSAGE_TYPE);

    format!(
        "{}_{}_{}",
        sanitize_filename(message_type),
        run_date.format(SERVICE_DATE_FORMAT),
        EXTRACT_FILE_SUFFIX
    )
}
