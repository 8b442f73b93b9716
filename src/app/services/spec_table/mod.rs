//! Specification table for version-scoped field lookups
//!
//! Holds the per-version segment and datatype definitions that drive the
//! message decoder. The table is loaded once from a JSON resource, validated
//! up front, and then shared read-only across concurrent decodes.

use crate::constants::COMPOSITE_DATATYPE_PREFIX;
use crate::{ExtractError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod loader;

#[cfg(test)]
pub mod tests;

/// Definition of one field position within a segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub required: bool,
    pub datatype: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, required: bool, datatype: Option<String>) -> Self {
        Self {
            name: name.into(),
            required,
            datatype,
        }
    }

    /// Whether this field's components are themselves decomposed one level further
    pub fn is_composite_of_composite(&self) -> bool {
        self.datatype
            .as_deref()
            .is_some_and(is_composite_of_composite)
    }
}

/// Naming convention for composite-of-composite datatypes
pub fn is_composite_of_composite(datatype: &str) -> bool {
    datatype.starts_with(COMPOSITE_DATATYPE_PREFIX)
}

/// Component position → component name
pub type ComponentTable = BTreeMap<usize, String>;

/// Field ordinal → field definition
pub type SegmentTable = BTreeMap<usize, FieldDef>;

/// Segment and datatype definitions for one HL7 version
#[derive(Debug, Clone, Default)]
pub struct VersionSpec {
    pub(crate) version: String,
    pub(crate) datatypes: HashMap<String, ComponentTable>,
    pub(crate) segments: HashMap<String, SegmentTable>,
}

impl VersionSpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Field definition for a segment ordinal (O(log n) lookup)
    pub fn field(&self, segment_id: &str, ordinal: usize) -> Option<&FieldDef> {
        self.segments.get(segment_id)?.get(&ordinal)
    }

    pub fn segment(&self, segment_id: &str) -> Option<&SegmentTable> {
        self.segments.get(segment_id)
    }

    pub fn has_segment(&self, segment_id: &str) -> bool {
        self.segments.contains_key(segment_id)
    }

    pub fn datatype(&self, name: &str) -> Option<&ComponentTable> {
        self.datatypes.get(name)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn datatype_count(&self) -> usize {
        self.datatypes.len()
    }
}

/// Loaded specification keyed by version string
#[derive(Debug, Clone)]
pub struct SpecTable {
    pub(crate) source_path: PathBuf,
    pub(crate) versions: HashMap<String, VersionSpec>,
}

impl SpecTable {
    /// Create an empty table for the given source
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            versions: HashMap::new(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn get(&self, version: &str) -> Option<&VersionSpec> {
        self.versions.get(version)
    }

    pub fn contains_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Loaded version ids in sorted order
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.versions.keys().map(String::as_str).collect();
        versions.sort_unstable();
        versions
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Select the tables for a header's version token
    ///
    /// Falls back to `default_version` when the token is absent or unknown;
    /// fails with a format error when neither resolves.
    pub fn resolve(&self, token: Option<&str>, default_version: &str) -> Result<&VersionSpec> {
        if let Some(spec) = token.and_then(|version| self.versions.get(version)) {
            return Ok(spec);
        }

        if let Some(version) = token {
            debug!(
                "Version '{}' not in specification, falling back to {}",
                version, default_version
            );
        }

        self.versions.get(default_version).ok_or_else(|| {
            ExtractError::format(format!(
                "Version {} is not defined in {} and default version {} is unavailable",
                token.unwrap_or("<none>"),
                self.source_path.display(),
                default_version
            ))
        })
    }
}
