//! Application constants for the HL7 extractor
//!
//! Wire-format constants, default paths, and archive layout names used
//! throughout the decoder, exporter, and batch orchestrator.

// =============================================================================
// HL7 Wire Format
// =============================================================================

/// Segment id of the self-describing header segment
pub const HEADER_SEGMENT_ID: &str = "MSH";

/// Minimum header length needed to read all five encoding characters
pub const MIN_HEADER_LENGTH: usize = 8;

/// Field ordinal (after the synthetic field-separator field) carrying the version token
pub const VERSION_FIELD_ORDINAL: usize = 12;

/// Version whose tables are used when the header's version token is missing or unknown
pub const DEFAULT_HL7_VERSION: &str = "2.3";

/// Datatype name prefix marking a composite-of-composite datatype
pub const COMPOSITE_DATATYPE_PREFIX: &str = "CM_";

/// Encoding characters in effect until a header segment overrides them
pub mod delimiters {
    pub const FIELD: char = '|';
    pub const SUBFIELD: char = '^';
    pub const REPEAT: char = '~';
    pub const ESCAPE: char = '\\';
    pub const COMPOSITE: char = '&';
}

// =============================================================================
// Specification Resource
// =============================================================================

/// Key holding datatype definitions, at top level (shared) or inside a version
pub const DATATYPE_KEY: &str = "datatype";

/// Specification file shipped with the crate
pub const DEFAULT_SPEC_PATH: &str = "spec/hl7_spec.json";

// =============================================================================
// Batch Layout
// =============================================================================

/// Default archive root
pub const DEFAULT_ARCHIVE_DIR: &str = "./Archive/";

/// Archive subdirectory receiving successfully processed source messages
pub const ORIGINAL_DIR_NAME: &str = "Original";

/// Archive subdirectory receiving CSV extracts
pub const MODIFIED_DIR_NAME: &str = "Modified";

/// Archive subdirectory receiving plain-text reports
pub const REPORTS_DIR_NAME: &str = "Reports";

/// Extension of message files picked up from intake
pub const INTAKE_EXTENSION: &str = "txt";

/// Extension of extract files scanned by the billing report
pub const EXTRACT_EXTENSION: &str = "csv";

/// Suffix of every extract file name
pub const EXTRACT_FILE_SUFFIX: &str = "Modified_file.csv";

/// Routing key for messages whose header carries no message type
pub const UNKNOWN_MESSAGE_TYPE: &str = "UNKNOWN";

/// Billing report file name inside the reports directory
pub const STATE_REPORT_FILE_NAME: &str = "State_Report.txt";

// =============================================================================
// Output Schema
// =============================================================================

/// Header of the running row counter column
pub const ROW_COUNTER_COLUMN: &str = "#";

/// Number of leading digits treated as the phone area code
pub const AREA_CODE_WIDTH: usize = 3;

/// Date format of the date_of_service column and extract file names
pub const SERVICE_DATE_FORMAT: &str = "%Y%m%d";

/// Label used by the billing report for rows with no patient state
pub const UNKNOWN_STATE_LABEL: &str = "N/A";

/// Column names read by the billing report
pub const BILL_AMOUNT_COLUMN: &str = "bill_amount";
pub const PATIENT_STATE_COLUMN: &str = "patient_state";
