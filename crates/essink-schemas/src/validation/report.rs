//! Per-property validation report
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::ParseError;
use crate::validation::issue::{ConfigIssue, Violation};
use serde::Serialize;
use std::fmt;

/// A diagnostic attached to one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "error", rename_all = "snake_case")]
pub enum FieldError {
    /// Raised by the schema definition while parsing the raw value
    Syntax(ParseError),
    /// Raised by a cross-field rule or the connectivity checks
    Issue(ConfigIssue),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Syntax(error) => write!(f, "{}", error),
            FieldError::Issue(issue) => write!(f, "{}", issue),
        }
    }
}

/// Resolved value and ordered diagnostics for one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub value: Option<String>,
    pub errors: Vec<FieldError>,
}

impl FieldReport {
    pub fn new<N: Into<String>>(name: N, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            errors: Vec::new(),
        }
    }

    /// A property with no diagnostics is valid
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rendered diagnostics in the order they were attached
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Structured issues only, skipping syntax errors
    pub fn issues(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.errors.iter().filter_map(|e| match e {
            FieldError::Issue(issue) => Some(issue),
            FieldError::Syntax(_) => None,
        })
    }

    pub fn has_issue(&self, issue: &ConfigIssue) -> bool {
        self.issues().any(|i| i == issue)
    }
}

/// Mapping from property name to its report, kept in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    fields: Vec<FieldReport>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a property, replacing any earlier report with the same name
    pub fn insert(&mut self, report: FieldReport) {
        match self.fields.iter_mut().find(|f| f.name == report.name) {
            Some(existing) => *existing = report,
            None => self.fields.push(report),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field_mut(&mut self, name: &str) -> &mut FieldReport {
        let index = match self.fields.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.fields.push(FieldReport::new(name, None));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index]
    }

    /// Append a diagnostic to a property, creating its entry if unknown
    pub fn add_error(&mut self, property: &str, error: FieldError) {
        self.field_mut(property).errors.push(error);
    }

    pub fn add_syntax_error(&mut self, error: ParseError) {
        let property = error.property().to_string();
        self.add_error(&property, FieldError::Syntax(error));
    }

    /// Append the same issue to every property the violation names
    pub fn attach(&mut self, violation: &Violation) {
        for field in &violation.fields {
            self.add_error(field, FieldError::Issue(violation.issue.clone()));
        }
    }

    pub fn attach_all<'a, I>(&mut self, violations: I)
    where
        I: IntoIterator<Item = &'a Violation>,
    {
        for violation in violations {
            self.attach(violation);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| !f.is_valid())
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|f| f.errors.len()).sum()
    }

    /// Properties that carry at least one diagnostic
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| !f.is_valid())
    }

    /// Rendered messages for one property; empty if the property is unknown
    pub fn error_messages(&self, property: &str) -> Vec<String> {
        self.field(property)
            .map(FieldReport::error_messages)
            .unwrap_or_default()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "Configuration is valid ({} properties)", self.fields.len());
        }
        write!(f, "Configuration has {} error(s):", self.error_count())?;
        for field in self.invalid_fields() {
            for error in &field.errors {
                write!(f, "\n  - {}: {}", field.name, error)?;
            }
        }
        Ok(())
    }
}
