//! Validation primitives shared by the schema definition and the rule engine
//!
//! - **error**: syntax errors raised while parsing raw properties
//! - **issue**: structured cross-field and connectivity diagnostics
//! - **report**: the per-property report handed back to callers
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod issue;
pub mod report;

pub use base::{raw_config_from_json, ConfigSchema, RawConfig};
pub use error::{ParseError, ParseErrors};
pub use issue::{ConfigIssue, Violation};
pub use report::{FieldError, FieldReport, ValidationReport};
