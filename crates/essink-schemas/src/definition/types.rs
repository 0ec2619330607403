//! Building blocks of a property definition
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::fmt;

/// Declared type of a raw property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    /// Like `String`, but never echoed back in reports
    Password,
    Int,
    Long,
    Boolean,
    /// Comma-separated, trimmed, empty entries dropped
    List,
    /// Case-insensitive match against the listed canonical values
    Enum(&'static [&'static str]),
}

impl PropertyType {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::String => "STRING",
            PropertyType::Password => "PASSWORD",
            PropertyType::Int => "INT",
            PropertyType::Long => "LONG",
            PropertyType::Boolean => "BOOLEAN",
            PropertyType::List => "LIST",
            PropertyType::Enum(_) => "STRING",
        }
    }
}

/// What a property resolves to when absent from the raw configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Absence is a syntax error
    Required,
    /// Absence resolves to `ConfigValue::Null`
    Null,
    /// Absence resolves to this raw text, parsed like user input
    Value(&'static str),
}

/// Extra syntax check run after type conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    Range { min: i64, max: i64 },
    AtLeast(i64),
    /// Non-empty list of http(s) URLs
    Urls,
    /// Data stream dataset naming rules
    Dataset,
    /// Existing file with a `.keytab` extension
    KeytabFile,
}

/// A parsed property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    String(String),
    Password(String),
    Int(i64),
    Boolean(bool),
    List(Vec<String>),
}

impl ConfigValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) | ConfigValue::Password(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text shown in reports; `None` for null
    pub fn display_value(&self) -> Option<String> {
        match self {
            ConfigValue::Null => None,
            _ => Some(self.to_string()),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Password(_) => write!(f, "[hidden]"),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

/// One recognised property
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    pub name: &'static str,
    pub ty: PropertyType,
    pub default: DefaultValue,
    pub constraint: Constraint,
    pub doc: &'static str,
}

impl PropertyDef {
    pub const fn new(name: &'static str, ty: PropertyType, default: DefaultValue) -> Self {
        Self {
            name,
            ty,
            default,
            constraint: Constraint::None,
            doc: "",
        }
    }

    pub const fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub const fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }
}
