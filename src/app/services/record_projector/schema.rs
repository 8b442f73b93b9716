//! Output schema definition
//!
//! One canonical column list (split-name layout, schema version 2). The
//! leading row counter column is owned by the exporter and is not listed here.

/// Where a column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Segment, field, then zero or more component names
    Lookup(&'static [&'static str]),
    /// `TYPE-EVENT` built from the header's message type
    MessageType,
    /// First digits of the home phone number
    PhoneAreaCode,
    /// Remaining digits of the home phone number
    PhoneNumber,
    /// Run date supplied to the projector
    ServiceDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputColumn {
    pub name: &'static str,
    pub source: ColumnSource,
}

const fn lookup(name: &'static str, path: &'static [&'static str]) -> OutputColumn {
    OutputColumn {
        name,
        source: ColumnSource::Lookup(path),
    }
}

const fn derived(name: &'static str, source: ColumnSource) -> OutputColumn {
    OutputColumn { name, source }
}

/// Data columns in output order
pub const OUTPUT_COLUMNS: &[OutputColumn] = &[
    lookup("id", &["PID", "patient_id", "id"]),
    lookup("site_id", &["PV1", "assigned_patient_location", "facility"]),
    lookup("service_location", &["PD1", "patient_primary_facility", "id"]),
    derived("message_type", ColumnSource::MessageType),
    lookup("message_time", &["MSH", "message_datetime"]),
    lookup("message_id", &["MSH", "message_control_id"]),
    lookup("account_number", &["PID", "patient_account_number", "id"]),
    lookup("discharge_disposition", &["PV1", "discharge_disposition"]),
    lookup("financial_class", &["PV1", "financial_class", "financial_class"]),
    lookup("patient_last_name", &["PID", "patient_name", "last_name"]),
    lookup("patient_first_name", &["PID", "patient_name", "first_name"]),
    lookup("patient_middle_name", &["PID", "patient_name", "middle_name"]),
    lookup("patient_street_address", &["PID", "patient_address", "street_address"]),
    lookup("patient_street_address_2", &["PID", "patient_address", "street_address2"]),
    lookup("patient_city", &["PID", "patient_address", "city"]),
    lookup("patient_state", &["PID", "patient_address", "state"]),
    lookup("patient_zip", &["PID", "patient_address", "zip"]),
    lookup("patient_birth_date", &["PID", "patient_birth_datetime"]),
    lookup("patient_death_date", &["PID", "patient_death_datetime"]),
    lookup("patient_sex", &["PID", "patient_sex"]),
    lookup("patient_ssn", &["PID", "patient_ssn"]),
    lookup("referring_doctor", &["PV1", "referring_doctor", "id"]),
    lookup("attending_doctor", &["PV1", "attending_doctor", "id"]),
    lookup("patient_ethnicity", &["PID", "ethnic_group"]),
    lookup("patient_race", &["PID", "race"]),
    lookup("patient_language", &["PID", "primary_language", "id"]),
    lookup("patient_email_address", &["PID", "phone_number_home", "email_address"]),
    derived("patient_phone_area_code", ColumnSource::PhoneAreaCode),
    derived("patient_phone_number", ColumnSource::PhoneNumber),
    lookup("patient_marital_status", &["PID", "marital_status"]),
    lookup("bill_amount", &["PV1", "total_charges"]),
    lookup(
        "patient_drivers_license_number",
        &["PID", "drivers_license_number", "drivers_license_number"],
    ),
    lookup("guarantor_first_name", &["GT1", "guarantor_name", "first_name"]),
    lookup("guarantor_last_name", &["GT1", "guarantor_name", "last_name"]),
    lookup("guarantor_middle_name", &["GT1", "guarantor_name", "middle_name"]),
    lookup("guarantor_street_address", &["GT1", "guarantor_address", "street_address"]),
    lookup("guarantor_street_address2", &["GT1", "guarantor_address", "street_address2"]),
    lookup("guarantor_city", &["GT1", "guarantor_address", "city"]),
    lookup("guarantor_state", &["GT1", "guarantor_address", "state"]),
    lookup("guarantor_zip", &["GT1", "guarantor_address", "zip"]),
    derived("date_of_service", ColumnSource::ServiceDate),
];

/// Lookup path of the home phone number split into the phone columns
pub const PHONE_NUMBER_PATH: &[&str] = &["PID", "phone_number_home", "telephone_number"];

/// Lookup paths of the header message type parts
pub const MESSAGE_TYPE_FIELD: [&str; 2] = ["MSH", "message_type"];
pub const TRIGGER_EVENT_COMPONENT: &str = "trigger_event";

/// Component names tried, in order, for the message code itself
pub const MESSAGE_CODE_COMPONENTS: &[&str] = &["message_type", "message_code"];

/// Column names in output order
pub fn column_names() -> impl Iterator<Item = &'static str> {
    OUTPUT_COLUMNS.iter().map(|column| column.name)
}

/// Position of a named column within a data row
pub fn column_index(name: &str) -> Option<usize> {
    OUTPUT_COLUMNS.iter().position(|column| column.name == name)
}
