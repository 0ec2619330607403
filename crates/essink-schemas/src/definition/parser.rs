//! Conversion of raw property text into typed values
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::definition::types::{ConfigValue, Constraint, DefaultValue, PropertyDef, PropertyType};
use crate::validation::error::ParseError;
use std::path::Path;
use url::Url;

const MAX_DATASET_LENGTH: usize = 100;
const DATASET_FORBIDDEN_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', '-', ':',
];

/// Resolve one property from its raw text, falling back to the declared default
pub fn parse_property(def: &PropertyDef, raw: Option<&str>) -> Result<ConfigValue, ParseError> {
    let text = match (raw, def.default) {
        (Some(text), _) => text,
        (None, DefaultValue::Required) => return Err(ParseError::missing(def.name)),
        (None, DefaultValue::Null) => return Ok(ConfigValue::Null),
        (None, DefaultValue::Value(text)) => text,
    };

    let value = convert(def, text)?;
    check_constraint(def, &value)?;
    Ok(value)
}

fn shown(def: &PropertyDef, text: &str) -> String {
    match def.ty {
        PropertyType::Password => "[hidden]".to_string(),
        _ => text.to_string(),
    }
}

fn convert(def: &PropertyDef, text: &str) -> Result<ConfigValue, ParseError> {
    let trimmed = text.trim();
    match def.ty {
        PropertyType::String => Ok(ConfigValue::String(trimmed.to_string())),
        PropertyType::Password => Ok(ConfigValue::Password(text.to_string())),
        PropertyType::Int => trimmed
            .parse::<i32>()
            .map(|v| ConfigValue::Int(i64::from(v)))
            .map_err(|_| ParseError::invalid(def.name, text, "Not a number of type INT")),
        PropertyType::Long => trimmed
            .parse::<i64>()
            .map(ConfigValue::Int)
            .map_err(|_| ParseError::invalid(def.name, text, "Not a number of type LONG")),
        PropertyType::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(ConfigValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(ConfigValue::Boolean(false))
            } else {
                Err(ParseError::invalid(
                    def.name,
                    text,
                    "Expected value to be either true or false",
                ))
            }
        }
        PropertyType::List => Ok(ConfigValue::List(split_list(trimmed))),
        PropertyType::Enum(allowed) => allowed
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
            .map(|canonical| ConfigValue::String(canonical.to_string()))
            .ok_or_else(|| {
                ParseError::invalid(
                    def.name,
                    shown(def, text),
                    format!("String must be one of: {}", allowed.join(", ")),
                )
            }),
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_constraint(def: &PropertyDef, value: &ConfigValue) -> Result<(), ParseError> {
    match def.constraint {
        Constraint::None => Ok(()),
        Constraint::Range { min, max } => match value.as_i64() {
            Some(v) if v < min => Err(ParseError::invalid(
                def.name,
                v.to_string(),
                format!("Value must be at least {}", min),
            )),
            Some(v) if v > max => Err(ParseError::invalid(
                def.name,
                v.to_string(),
                format!("Value must be no more than {}", max),
            )),
            _ => Ok(()),
        },
        Constraint::AtLeast(min) => match value.as_i64() {
            Some(v) if v < min => Err(ParseError::invalid(
                def.name,
                v.to_string(),
                format!("Value must be at least {}", min),
            )),
            _ => Ok(()),
        },
        Constraint::Urls => check_urls(def, value),
        Constraint::Dataset => check_dataset(def, value),
        Constraint::KeytabFile => check_keytab(def, value),
    }
}

fn check_urls(def: &PropertyDef, value: &ConfigValue) -> Result<(), ParseError> {
    let urls = value.as_list().unwrap_or_default();
    if urls.is_empty() {
        return Err(ParseError::invalid(def.name, "", "At least one URL must be specified"));
    }
    for candidate in urls {
        let parsed = Url::parse(candidate).map_err(|e| {
            ParseError::invalid(def.name, candidate.as_str(), format!("Invalid URL: {}", e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ParseError::invalid(
                def.name,
                candidate.as_str(),
                "URL must use the http or https scheme",
            ));
        }
    }
    Ok(())
}

fn check_dataset(def: &PropertyDef, value: &ConfigValue) -> Result<(), ParseError> {
    let dataset = value.as_str().unwrap_or_default();
    if dataset.is_empty() {
        return Ok(());
    }
    if dataset.chars().count() > MAX_DATASET_LENGTH {
        return Err(ParseError::invalid(
            def.name,
            dataset,
            format!("Dataset must not be longer than {} characters", MAX_DATASET_LENGTH),
        ));
    }
    if dataset
        .chars()
        .any(|c| c.is_whitespace() || DATASET_FORBIDDEN_CHARS.contains(&c))
    {
        return Err(ParseError::invalid(
            def.name,
            dataset,
            "Dataset must not contain whitespace or any of \\ / * ? \" < > | , # - :",
        ));
    }
    if dataset.chars().any(char::is_uppercase) {
        return Err(ParseError::invalid(def.name, dataset, "Dataset must be lowercase"));
    }
    Ok(())
}

fn check_keytab(def: &PropertyDef, value: &ConfigValue) -> Result<(), ParseError> {
    let Some(path) = value.as_str() else {
        return Ok(());
    };
    if !path.ends_with(".keytab") {
        return Err(ParseError::invalid(
            def.name,
            path,
            "File must have the .keytab extension",
        ));
    }
    if !Path::new(path).is_file() {
        return Err(ParseError::invalid(def.name, path, "File does not exist"));
    }
    Ok(())
}
