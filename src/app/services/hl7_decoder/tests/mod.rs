//! Shared fixtures for message decoder tests

use super::*;
use crate::app::services::spec_table::SpecTable;
use std::path::Path;
use std::sync::Arc;


/// Decoder specification covering header, patient, and visit segments
pub fn create_decoder_spec_json() -> &'static str {
    r#"{
        "datatype": {
            "CX": {"1": "id", "4": "assigning_authority"},
            "XPN": {"1": "last_name", "2": "first_name", "3": "middle_name"}
        },
        "2.3": {
            "datatype": {
                "CM_MSG": {"1": "message_type", "2": "trigger_event"},
                "CM_TRIO": {"1": "first", "2": "second", "3": "third"}
            },
            "MSH": {
                "1": {"field": "field_separator", "required": true},
                "2": {"field": "encoding_characters", "required": true},
                "7": {"field": "message_datetime"},
                "9": {"field": "message_type", "required": true, "datatype": "CM_MSG"},
                "10": {"field": "message_control_id", "required": true},
                "12": {"field": "version_id", "required": true}
            },
            "PID": {
                "3": {"field": "patient_id", "required": true, "datatype": "CX"},
                "5": {"field": "patient_name", "required": true, "datatype": "XPN"},
                "8": {"field": "patient_sex"},
                "20": {"field": "drivers_license_number"}
            },
            "ZCM": {
                "1": {"field": "trio", "datatype": "CM_TRIO"}
            }
        },
        "2.5.1": {
            "datatype": {
                "MSG": {"1": "message_code", "2": "trigger_event", "3": "message_structure"}
            },
            "MSH": {
                "9": {"field": "message_type", "required": true, "datatype": "MSG"},
                "12": {"field": "version_id", "required": true}
            },
            "PID": {
                "5": {"field": "patient_name", "required": true, "datatype": "XPN"}
            }
        },
        "9.0": {
            "PID": {
                "5": {"field": "patient_name", "datatype": "XPN"}
            }
        }
    }"#
}

pub fn create_decoder_spec() -> SpecTable {
    SpecTable::from_json_str(create_decoder_spec_json(), Path::new("decoder_spec.json")).unwrap()
}

pub fn create_test_decoder(required_only: bool) -> MessageDecoder {
    MessageDecoder::new(Arc::new(create_decoder_spec()), "2.3", required_only)
}

/// Version 2.3 admission message
pub fn create_adt_message() -> &'static str {
    "MSH|^~\\&|SENDAPP|SENDFAC|RECVAPP|RECVFAC|20240105083000||ADT^A01|MSG00001|P|2.3\n\
     PID|1||12345^^^HOSP||Doe^John^A||19800101|M"
}
