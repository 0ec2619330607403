//! Essink Core - cross-field validation and connectivity checks for the
//! search sink connector
//!
//! This crate turns a raw property map into a per-property validation report.
//! Syntax checks come from [`essink_schemas`]; this crate adds the parts that
//! need the whole configuration or a live service.
//!
//! # Main Components
//!
//! - **Rules**: the fixed set of independent cross-field rules
//! - **Probe**: liveness and version fetch through a scoped, swappable client
//! - **Version**: dotted version comparison for the compatibility gates
//! - **Validator**: runs the stages in order and assembles the report
//!
//! # Example
//!
//! ```no_run
//! use essink_core::{Validator, ValidatorConfig};
//! use essink_schemas::RawConfig;
//!
//! let mut raw = RawConfig::new();
//! raw.insert("connection.url".to_string(), "http://localhost:9200".to_string());
//! raw.insert("data.stream.type".to_string(), "logs".to_string());
//! raw.insert("data.stream.dataset".to_string(), "orders".to_string());
//!
//! let report = Validator::new().validate(&raw);
//! for field in report.invalid_fields() {
//!     println!("{}: {:?}", field.name, field.error_messages());
//! }
//!
//! // Offline: syntax and rules only
//! let offline = Validator::new().with_config(ValidatorConfig::offline());
//! assert!(offline.validate(&raw).is_valid());
//! ```

pub mod error;
pub mod probe;
pub mod rules;
pub mod validator;
pub mod version;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use probe::{
    ClientError, ClientFactory, ConnectivityProbe, HttpClientFactory, ProbeOutcome, ProbeResult,
    ScopedClient, SearchClient, ServerInfo,
};
pub use rules::{Rule, RuleEngine};
pub use validator::{Validator, ValidatorConfig};
pub use version::{compare, VersionError, CONNECTOR_MIN_VERSION, DATA_STREAM_MIN_VERSION};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
