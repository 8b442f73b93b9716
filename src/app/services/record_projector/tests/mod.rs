//! Shared fixtures for record projection tests

use super::*;
use crate::app::services::hl7_decoder::decode_message;
use crate::app::services::spec_table::SpecTable;
use crate::models::DecodedMessage;
use chrono::NaiveDate;
use std::path::Path;


/// Specification bundled with the crate
pub fn bundled_spec() -> SpecTable {
    let content = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/spec/hl7_spec.json"));
    SpecTable::from_json_str(content, Path::new("spec/hl7_spec.json")).unwrap()
}

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

/// Join values into a segment line, leaving unlisted ordinals empty
pub fn build_segment(segment_id: &str, fields: &[(usize, &str)]) -> String {
    let width = fields.iter().map(|(ordinal, _)| *ordinal).max().unwrap_or(0);
    let mut parts = vec![""; width + 1];
    parts[0] = segment_id;
    for (ordinal, value) in fields {
        parts[*ordinal] = *value;
    }
    parts.join("|")
}

/// Admission message populating every projected segment
pub fn create_full_message_text() -> String {
    [
        "MSH|^~\\&|EPIC|NORTHSIDE|BILLING|ACME|20240105083000||ADT^A01|MSG00001|P|2.3".to_string(),
        build_segment("EVN", &[(1, "A01"), (2, "20240105083000")]),
        build_segment(
            "PID",
            &[
                (1, "1"),
                (3, "12345^^^HOSP"),
                (5, "Doe^John^A"),
                (7, "19800101"),
                (8, "M"),
                (10, "2106-3"),
                (11, "123 Main St^Apt 4^Springfield^IL^62701"),
                (13, "(555) 123-4567^PRN^PH^jdoe@example.com"),
                (15, "ENG^English"),
                (16, "M"),
                (18, "ACC789^^^HOSP"),
                (19, "123-45-6789"),
                (20, "D1234567^IL"),
                (22, "N"),
            ],
        ),
        build_segment("PD1", &[(3, "NSC01^^1001")]),
        build_segment(
            "PV1",
            &[
                (1, "1"),
                (2, "I"),
                (3, "4WEST^401^A^NORTHSIDE"),
                (7, "1234^Smith^Adam"),
                (8, "5678^Jones^Beth"),
                (10, "MED"),
                (17, "9999^Admit^Doc"),
                (20, "FC1^20240101"),
                (36, "01"),
                (47, "1500.50"),
            ],
        ),
        build_segment(
            "GT1",
            &[
                (1, "1"),
                (3, "Doe^Jane^B"),
                (5, "123 Main St^^Springfield^IL^62701"),
            ],
        ),
    ]
    .join("\n")
}

pub fn decode(text: &str) -> DecodedMessage {
    decode_message(text, &bundled_spec(), "2.3", false).unwrap()
}

/// Value of a named column in a projected row
pub fn column<'a>(row: &'a crate::models::OutputRow, name: &str) -> &'a str {
    let index = schema::column_index(name).unwrap();
    &row.values[index]
}
