//! Shared fixtures for specification table tests

use super::SpecTable;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;


/// Two-version specification with shared and version-local datatypes
pub fn create_test_spec_json() -> &'static str {
    r#"{
        "datatype": {
            "XPN": {"1": "last_name", "2": "first_name", "3": "middle_name"},
            "CE": {"1": "id", "2": "text"}
        },
        "2.3": {
            "datatype": {
                "CM_MSG": {"1": "message_type", "2": "trigger_event"}
            },
            "MSH": {
                "1": {"field": "field_separator", "required": true},
                "9": {"field": "message_type", "required": true, "datatype": "CM_MSG"},
                "12": {"field": "version_id", "required": true}
            },
            "PID": {
                "5": {"field": "patient_name", "required": true, "datatype": "XPN"},
                "8": {"field": "patient_sex"}
            }
        },
        "2.5.1": {
            "datatype": {
                "XPN": {"1": "family_name", "2": "given_name"},
                "MSG": {"1": "message_code", "2": "trigger_event", "3": "message_structure"}
            },
            "MSH": {
                "9": {"field": "message_type", "required": true, "datatype": "MSG"}
            },
            "PID": {
                "5": {"field": "patient_name", "required": true, "datatype": "XPN"}
            }
        }
    }"#
}

/// Parse the fixture specification
pub fn create_test_spec() -> SpecTable {
    SpecTable::from_json_str(create_test_spec_json(), Path::new("test_spec.json")).unwrap()
}

/// Write content to a temporary specification file
pub fn create_temp_spec_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
