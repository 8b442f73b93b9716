//! Specification loading and validation
//!
//! Parses the JSON specification resource into typed `VersionSpec` tables.
//! Every structural problem (unreadable file, malformed JSON, bad ordinals,
//! dangling datatype references) is reported as a specification load error
//! before any message is decoded.

use super::{ComponentTable, FieldDef, SegmentTable, SpecTable, VersionSpec};
use crate::constants::DATATYPE_KEY;
use crate::{ExtractError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Field entry as it appears in the resource
#[derive(Debug, Deserialize)]
struct RawFieldDef {
    field: String,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    datatype: Option<String>,
}

type RawDatatypes = HashMap<String, HashMap<String, String>>;

impl SpecTable {
    /// Load and validate a specification resource from disk
    ///
    /// # Errors
    /// * Returns `ExtractError::SpecLoad` if the file cannot be read, is not
    ///   well-formed JSON, or contains malformed entries
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading HL7 specification: {}", path.display());
        let start_time = Instant::now();

        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::spec_load(path, format!("unreadable: {}", e)))?;

        let table = Self::from_json_str(&content, path)?;

        info!(
            "Specification loaded: {} versions ({}) in {:.2}ms",
            table.version_count(),
            table.versions().join(", "),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(table)
    }

    /// Parse a specification document; `origin` is used in error messages
    pub fn from_json_str(content: &str, origin: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| ExtractError::spec_load(origin, format!("malformed JSON: {}", e)))?;

        let Value::Object(root) = root else {
            return Err(ExtractError::spec_load(
                origin,
                "top level must be an object keyed by version",
            ));
        };

        let shared_datatypes = match root.get(DATATYPE_KEY) {
            Some(value) => parse_datatypes(value, "shared", origin)?,
            None => HashMap::new(),
        };

        let mut table = SpecTable::new(origin);

        for (version, body) in &root {
            if version == DATATYPE_KEY {
                continue;
            }

            let spec = parse_version(version, body, &shared_datatypes, origin)?;
            debug!(
                "Version {}: {} segments, {} datatypes",
                version,
                spec.segment_count(),
                spec.datatype_count()
            );
            table.versions.insert(version.clone(), spec);
        }

        if table.versions.is_empty() {
            return Err(ExtractError::spec_load(origin, "no versions defined"));
        }

        Ok(table)
    }
}

/// Parse one version body: its own datatypes plus segment tables
fn parse_version(
    version: &str,
    body: &Value,
    shared_datatypes: &HashMap<String, ComponentTable>,
    origin: &Path,
) -> Result<VersionSpec> {
    let Value::Object(entries) = body else {
        return Err(ExtractError::spec_load(
            origin,
            format!("version {} must be an object", version),
        ));
    };

    let mut spec = VersionSpec::new(version);
    spec.datatypes = shared_datatypes.clone();

    // Version-local datatypes override shared definitions of the same name
    if let Some(value) = entries.get(DATATYPE_KEY) {
        spec.datatypes.extend(parse_datatypes(value, version, origin)?);
    }

    for (segment_id, fields) in entries {
        if segment_id == DATATYPE_KEY {
            continue;
        }
        let segment = parse_segment(version, segment_id, fields, origin)?;
        spec.segments.insert(segment_id.clone(), segment);
    }

    validate_datatype_references(&spec, origin)?;

    Ok(spec)
}

fn parse_datatypes(
    value: &Value,
    scope: &str,
    origin: &Path,
) -> Result<HashMap<String, ComponentTable>> {
    let raw: RawDatatypes = serde_json::from_value(value.clone()).map_err(|e| {
        ExtractError::spec_load(origin, format!("invalid {} datatype table: {}", scope, e))
    })?;

    let mut datatypes = HashMap::with_capacity(raw.len());
    for (name, components) in raw {
        let mut table = ComponentTable::new();
        for (ordinal, component) in components {
            let position = parse_ordinal(&ordinal).ok_or_else(|| {
                ExtractError::spec_load(
                    origin,
                    format!(
                        "datatype {} ({}) has invalid component ordinal '{}'",
                        name, scope, ordinal
                    ),
                )
            })?;
            table.insert(position, component);
        }
        datatypes.insert(name, table);
    }

    Ok(datatypes)
}

fn parse_segment(
    version: &str,
    segment_id: &str,
    fields: &Value,
    origin: &Path,
) -> Result<SegmentTable> {
    let Value::Object(fields) = fields else {
        return Err(ExtractError::spec_load(
            origin,
            format!("segment {} in version {} must be an object", segment_id, version),
        ));
    };

    let mut table = SegmentTable::new();
    for (ordinal, entry) in fields {
        let position = parse_ordinal(ordinal).ok_or_else(|| {
            ExtractError::spec_load(
                origin,
                format!(
                    "segment {} in version {} has invalid field ordinal '{}'",
                    segment_id, version, ordinal
                ),
            )
        })?;

        let raw: RawFieldDef = serde_json::from_value(entry.clone()).map_err(|e| {
            ExtractError::spec_load(
                origin,
                format!(
                    "field {}-{} in version {} is malformed: {}",
                    segment_id, ordinal, version, e
                ),
            )
        })?;

        let datatype = raw.datatype.filter(|name| !name.trim().is_empty());
        table.insert(
            position,
            FieldDef::new(raw.field, raw.required.unwrap_or(false), datatype),
        );
    }

    Ok(table)
}

/// Every datatype named by a field must be defined for the version
fn validate_datatype_references(spec: &VersionSpec, origin: &Path) -> Result<()> {
    for (segment_id, fields) in &spec.segments {
        for (ordinal, def) in fields {
            if let Some(datatype) = &def.datatype {
                if !spec.datatypes.contains_key(datatype) {
                    return Err(ExtractError::spec_load(
                        origin,
                        format!(
                            "field {}-{} ({}) in version {} references undefined datatype {}",
                            segment_id, ordinal, def.name, spec.version, datatype
                        ),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Ordinals are 1-based positive integers written as strings
fn parse_ordinal(key: &str) -> Option<usize> {
    key.trim().parse::<usize>().ok().filter(|&n| n > 0)
}
