use crate::core::directives::canonical_key;
use crate::core::policy::CspPolicy;
use crate::core::value::coerce_value;
use crate::error::CspError;
use serde_json::{Map, Value};
use std::{fs, path::Path};

impl CspPolicy {
    /// Parses a JSON object of `directive -> value` entries.
    ///
    /// Entries are applied in document order, exactly like
    /// [`from_pairs`](Self::from_pairs). A `report_only` / `report-only`
    /// entry sets the report-only flag.
    pub fn from_json_str(document: &str) -> Result<Self, CspError> {
        let value: Value = serde_json::from_str(document)?;
        match value {
            Value::Object(entries) => Self::from_json_map(&entries),
            other => Err(CspError::ImportShape(format!(
                "expected a JSON object, found {}",
                other
            ))),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CspError> {
        let path = path.as_ref();
        log::debug!("Loading CSP policy from {}", path.display());
        let document = fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    /// Raw JSON when the input starts with `{`, otherwise a file path.
    pub fn from_json(input: &str) -> Result<Self, CspError> {
        if input.trim_start().starts_with('{') {
            Self::from_json_str(input)
        } else {
            Self::from_json_file(input)
        }
    }

    pub fn from_json_map(entries: &Map<String, Value>) -> Result<Self, CspError> {
        let mut policy = Self::new();
        for (key, value) in entries {
            policy.set_value(canonical_key(key), coerce_value(value)?)?;
        }
        log::debug!("Imported CSP policy with {} directives", policy.len());
        Ok(policy)
    }
}
