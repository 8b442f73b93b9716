//! Projection of decoded messages onto output rows

use super::derived::{format_message_type, lookup_text, split_phone_number};
use super::schema::{
    ColumnSource, MESSAGE_CODE_COMPONENTS, MESSAGE_TYPE_FIELD, OUTPUT_COLUMNS, PHONE_NUMBER_PATH,
    TRIGGER_EVENT_COMPONENT, column_names,
};
use crate::constants::SERVICE_DATE_FORMAT;
use crate::models::{DecodedMessage, FieldValue, OutputRow};
use chrono::{Local, NaiveDate};
use tracing::trace;

/// Projects decoded messages onto the fixed extract columns
#[derive(Debug, Clone)]
pub struct RecordProjector {
    service_date: NaiveDate,
    service_date_text: String,
}

impl RecordProjector {
    /// Create a projector stamping rows with `service_date`
    pub fn new(service_date: NaiveDate) -> Self {
        Self {
            service_date,
            service_date_text: service_date.format(SERVICE_DATE_FORMAT).to_string(),
        }
    }

    /// Create a projector stamping rows with today's local date
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    /// Data column names, without the exporter's counter column
    pub fn header() -> Vec<&'static str> {
        column_names().collect()
    }

    /// Map a decoded message onto one output row
    pub fn project(&self, message: &DecodedMessage) -> OutputRow {
        let (area_code, number) = split_phone_number(lookup_text(message, PHONE_NUMBER_PATH));

        let values = OUTPUT_COLUMNS
            .iter()
            .map(|column| match column.source {
                ColumnSource::Lookup(path) => lookup_text(message, path).to_string(),
                ColumnSource::MessageType => Self::message_type(message),
                ColumnSource::PhoneAreaCode => area_code.clone(),
                ColumnSource::PhoneNumber => number.clone(),
                ColumnSource::ServiceDate => self.service_date_text.clone(),
            })
            .collect();

        trace!("Projected message version {}", message.version());
        OutputRow { values }
    }

    /// Bare message type from the header, used to route rows to extract files
    pub fn message_type_code(message: &DecodedMessage) -> Option<String> {
        let code = message
            .lookup(&MESSAGE_TYPE_FIELD)
            .map(message_code)
            .unwrap_or("")
            .trim();

        (!code.is_empty()).then(|| code.to_string())
    }

    fn message_type(message: &DecodedMessage) -> String {
        let Some(field) = message.lookup(&MESSAGE_TYPE_FIELD) else {
            return String::new();
        };

        let trigger_event = field
            .component(TRIGGER_EVENT_COMPONENT)
            .map(FieldValue::as_text)
            .unwrap_or("");

        format_message_type(message_code(field), trigger_event)
    }
}

/// Message code component of the header message type field
///
/// Falls back to the first component when no known code name is present.
fn message_code(field: &FieldValue) -> &str {
    MESSAGE_CODE_COMPONENTS
        .iter()
        .find_map(|name| field.component(name))
        .map_or_else(|| field.as_text(), FieldValue::as_text)
}
