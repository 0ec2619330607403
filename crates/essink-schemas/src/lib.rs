//! Essink Schemas - property definitions and validation reports for the
//! search sink connector
//!
//! This crate owns everything that can be decided without talking to the
//! cluster:
//! - **Definitions**: every recognised property with its type, default and
//!   per-property constraint
//! - **SinkConfig**: the typed, immutable view built from raw properties
//! - **Reports**: per-property diagnostics, both syntax errors and
//!   structured cross-field issues
//!
//! ## Quick Start
//!
//! ```rust
//! use essink_schemas::{ConfigDef, ConfigSchema, RawConfig};
//!
//! let mut raw = RawConfig::new();
//! raw.insert("connection.url".to_string(), "http://localhost:9200".to_string());
//!
//! let report = ConfigDef::new().report(&raw);
//! assert!(report.is_valid());
//!
//! let config = ConfigDef::new().parse(&raw).unwrap();
//! assert_eq!(config.batch_size(), 2000);
//! ```
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod definition;
pub mod properties;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{BehaviorOnNullValues, DataStreamType, SecurityProtocol, SinkConfig, WriteMethod};
pub use definition::{ConfigDef, ConfigValue, PropertyDef, PropertyType};
pub use validation::{
    raw_config_from_json, ConfigIssue, ConfigSchema, FieldError, FieldReport, ParseError,
    ParseErrors, RawConfig, ValidationReport, Violation,
};
