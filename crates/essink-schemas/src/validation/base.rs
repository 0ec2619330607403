//! Schema definition trait and raw property helpers
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::config::SinkConfig;
use crate::validation::error::{ParseError, ParseErrors};
use crate::validation::report::ValidationReport;
use serde_json::Value;
use std::collections::HashMap;

/// Raw connector properties as supplied by the user, all values textual
pub type RawConfig = HashMap<String, String>;

/// Syntax-level schema for connector properties
///
/// Implementations resolve defaults, convert types and check per-property
/// constraints. Cross-field rules are out of their reach.
pub trait ConfigSchema: Send + Sync {
    /// Build the typed configuration, or every syntax error found
    fn parse(&self, raw: &RawConfig) -> Result<SinkConfig, ParseErrors>;

    /// One entry per known property, each with its syntax errors attached
    fn report(&self, raw: &RawConfig) -> ValidationReport;

    /// Report plus the typed configuration when the report is clean
    fn check(&self, raw: &RawConfig) -> (ValidationReport, Option<SinkConfig>) {
        let mut report = self.report(raw);
        if report.has_errors() {
            return (report, None);
        }
        match self.parse(raw) {
            Ok(config) => (report, Some(config)),
            Err(errors) => {
                for error in errors.errors {
                    report.add_syntax_error(error);
                }
                (report, None)
            }
        }
    }
}

/// Flatten a JSON object into raw properties
///
/// Strings are taken as-is, numbers and booleans are rendered, arrays of
/// scalars are joined with commas and `null` entries are skipped.
pub fn raw_config_from_json(value: &Value) -> Result<RawConfig, ParseErrors> {
    let Value::Object(map) = value else {
        return Err(ParseError::invalid(
            "$",
            value.to_string(),
            "Expected a JSON object of properties",
        )
        .into());
    };

    let mut raw = RawConfig::with_capacity(map.len());
    let mut errors = ParseErrors::new();
    for (key, entry) in map {
        match scalar_text(entry) {
            Some(Some(text)) => {
                raw.insert(key.clone(), text);
            }
            Some(None) => {}
            None => match entry {
                Value::Array(items) => {
                    let parts: Option<Vec<String>> =
                        items.iter().map(|item| scalar_text(item).flatten()).collect();
                    match parts {
                        Some(parts) => {
                            raw.insert(key.clone(), parts.join(","));
                        }
                        None => errors.add(ParseError::invalid(
                            key.as_str(),
                            entry.to_string(),
                            "List entries must be strings, numbers or booleans",
                        )),
                    }
                }
                _ => errors.add(ParseError::invalid(
                    key.as_str(),
                    entry.to_string(),
                    "Nested objects are not supported",
                )),
            },
        }
    }

    errors.into_result()?;
    Ok(raw)
}

/// `Some(Some(text))` for scalars, `Some(None)` for null, `None` for containers
fn scalar_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}
