//! Syntax-level error types produced while parsing raw connector properties
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single property that could not be converted to its declared type
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// A required property was absent from the raw configuration
    #[error("Missing required configuration \"{property}\" which has no default value.")]
    Missing { property: String },

    /// The raw value could not be parsed or failed its constraint
    #[error("Invalid value {value} for configuration {property}: {reason}")]
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },
}

impl ParseError {
    pub fn missing<P: Into<String>>(property: P) -> Self {
        Self::Missing {
            property: property.into(),
        }
    }

    pub fn invalid<P, V, R>(property: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        Self::InvalidValue {
            property: property.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the property this error belongs to
    pub fn property(&self) -> &str {
        match self {
            Self::Missing { property } | Self::InvalidValue { property, .. } => property,
        }
    }
}

/// Every syntax error found in one raw configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
pub struct ParseErrors {
    pub errors: Vec<ParseError>,
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration has {} invalid properties:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Ok if nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<ParseError>> for ParseErrors {
    fn from(errors: Vec<ParseError>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let err = ParseError::missing("connection.url");
        assert_eq!(
            err.to_string(),
            "Missing required configuration \"connection.url\" which has no default value."
        );
        assert_eq!(err.property(), "connection.url");
    }

    #[test]
    fn test_errors_collect_in_order() {
        let mut errors = ParseErrors::new();
        errors.add(ParseError::invalid("batch.size", "abc", "Not a number of type INT"));
        errors.add(ParseError::missing("connection.url"));
        errors.add(ParseError::invalid("batch.size", "0", "Value must be at least 1"));

        assert_eq!(errors.len(), 3);
        assert!(errors.to_string().contains("3 invalid properties"));
        assert!(errors.into_result().is_err());
        assert!(ParseErrors::new().into_result().is_ok());
    }
}
