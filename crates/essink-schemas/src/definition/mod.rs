//! Definition table of every recognised connector property
//!
//! The table drives both the syntax-level report and the typed
//! [`SinkConfig`](crate::SinkConfig) conversion, so the two can never disagree
//! about defaults or constraints.
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

pub mod parser;
pub mod types;

pub use parser::parse_property;
pub use types::{ConfigValue, Constraint, DefaultValue, PropertyDef, PropertyType};

use crate::config::SinkConfig;
use crate::properties::*;
use crate::validation::base::{ConfigSchema, RawConfig};
use crate::validation::error::ParseErrors;
use crate::validation::report::{FieldReport, ValidationReport};

const WRITE_METHODS: &[&str] = &["INSERT", "UPSERT"];
const NULL_BEHAVIORS: &[&str] = &["IGNORE", "DELETE", "FAIL"];
const DATA_STREAM_TYPES: &[&str] = &["LOGS", "METRICS", "SYNTHETICS", "TRACES", "NONE"];
const SECURITY_PROTOCOLS: &[&str] = &["PLAINTEXT", "SSL"];

use DefaultValue::{Null, Required, Value};
use PropertyType::{Boolean, Enum, Int, List, Long, Password};

static DEFINITIONS: &[PropertyDef] = &[
    PropertyDef::new(CONNECTION_URL, List, Required)
        .with_constraint(Constraint::Urls)
        .with_doc("The comma-separated list of one or more search service URLs."),
    PropertyDef::new(CONNECTION_USERNAME, PropertyType::String, Null)
        .with_doc("The username used to authenticate with the search service."),
    PropertyDef::new(CONNECTION_PASSWORD, Password, Null)
        .with_doc("The password used to authenticate with the search service."),
    PropertyDef::new(BATCH_SIZE, Int, Value("2000"))
        .with_constraint(Constraint::Range { min: 1, max: 1_000_000 })
        .with_doc("The number of records to process as a batch when writing."),
    PropertyDef::new(MAX_IN_FLIGHT_REQUESTS, Int, Value("5"))
        .with_constraint(Constraint::Range { min: 1, max: 1000 })
        .with_doc("The maximum number of indexing requests that can be in-flight."),
    PropertyDef::new(MAX_BUFFERED_RECORDS, Int, Value("20000"))
        .with_constraint(Constraint::Range { min: 1, max: i32::MAX as i64 })
        .with_doc("The maximum number of records each task will buffer before blocking."),
    PropertyDef::new(LINGER_MS, Long, Value("1"))
        .with_constraint(Constraint::Range { min: 0, max: 604_800_000 })
        .with_doc("Linger time in milliseconds for batching."),
    PropertyDef::new(FLUSH_TIMEOUT_MS, Long, Value("180000"))
        .with_constraint(Constraint::AtLeast(1000))
        .with_doc("The timeout in milliseconds to use for periodic flushing."),
    PropertyDef::new(MAX_RETRIES, Int, Value("5"))
        .with_constraint(Constraint::AtLeast(0))
        .with_doc("The maximum number of retries allowed in case of retriable errors."),
    PropertyDef::new(RETRY_BACKOFF_MS, Long, Value("100"))
        .with_constraint(Constraint::AtLeast(0))
        .with_doc("How long to wait in milliseconds before attempting the first retry."),
    PropertyDef::new(CONNECTION_TIMEOUT_MS, Int, Value("1000"))
        .with_constraint(Constraint::AtLeast(0))
        .with_doc("How long to wait in milliseconds when establishing a connection."),
    PropertyDef::new(READ_TIMEOUT_MS, Int, Value("3000"))
        .with_constraint(Constraint::AtLeast(0))
        .with_doc("How long to wait in milliseconds for the service to return a response."),
    PropertyDef::new(IGNORE_KEY, Boolean, Value("false"))
        .with_doc("Whether to ignore the record key for the document ID."),
    PropertyDef::new(IGNORE_SCHEMA, Boolean, Value("false"))
        .with_doc("Whether to ignore schemas during indexing."),
    PropertyDef::new(IGNORE_KEY_TOPICS, List, Value(""))
        .with_doc("Topics for which the record key is ignored."),
    PropertyDef::new(IGNORE_SCHEMA_TOPICS, List, Value(""))
        .with_doc("Topics for which the value schema is ignored."),
    PropertyDef::new(WRITE_METHOD, Enum(WRITE_METHODS), Value("INSERT"))
        .with_doc("Method used for writing data: insert or upsert."),
    PropertyDef::new(BEHAVIOR_ON_NULL_VALUES, Enum(NULL_BEHAVIORS), Value("FAIL"))
        .with_doc("How to handle records with a non-null key and a null value."),
    PropertyDef::new(DATA_STREAM_TYPE, Enum(DATA_STREAM_TYPES), Value("NONE"))
        .with_doc("Generic type describing the data to be written to a data stream."),
    PropertyDef::new(DATA_STREAM_DATASET, PropertyType::String, Value(""))
        .with_constraint(Constraint::Dataset)
        .with_doc("Describes the data ingested and its structure for a data stream."),
    PropertyDef::new(DATA_STREAM_TIMESTAMP_FIELD, List, Value(""))
        .with_doc("Record fields used as the data stream's @timestamp field."),
    PropertyDef::new(PROXY_HOST, PropertyType::String, Value(""))
        .with_doc("The address of the proxy host to connect through."),
    PropertyDef::new(PROXY_PORT, Int, Value("8080"))
        .with_constraint(Constraint::Range { min: 1, max: 65535 })
        .with_doc("The port of the proxy host to connect through."),
    PropertyDef::new(PROXY_USERNAME, PropertyType::String, Value(""))
        .with_doc("The username for the proxy host."),
    PropertyDef::new(PROXY_PASSWORD, Password, Null)
        .with_doc("The password for the proxy host."),
    PropertyDef::new(SECURITY_PROTOCOL, Enum(SECURITY_PROTOCOLS), Value("PLAINTEXT"))
        .with_doc("The security protocol to use when connecting to the service."),
    PropertyDef::new(KERBEROS_PRINCIPAL, PropertyType::String, Null)
        .with_doc("The Kerberos user principal the connector may use to authenticate."),
    PropertyDef::new(KERBEROS_KEYTAB_PATH, PropertyType::String, Null)
        .with_constraint(Constraint::KeytabFile)
        .with_doc("The path to the keytab file to use for authentication with Kerberos."),
];

/// Schema definition for the sink connector
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigDef;

impl ConfigDef {
    pub fn new() -> Self {
        Self
    }

    /// Every recognised property, in display order
    pub fn definitions(&self) -> &'static [PropertyDef] {
        DEFINITIONS
    }

    pub fn definition(&self, name: &str) -> Option<&'static PropertyDef> {
        DEFINITIONS.iter().find(|def| def.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        DEFINITIONS.iter().map(|def| def.name)
    }

    /// Resolve every property, collecting all syntax errors rather than stopping at the first
    pub fn parse_values(
        &self,
        raw: &RawConfig,
    ) -> (Vec<(&'static PropertyDef, ConfigValue)>, ParseErrors) {
        let mut values = Vec::with_capacity(DEFINITIONS.len());
        let mut errors = ParseErrors::new();

        for def in DEFINITIONS {
            match parse_property(def, raw.get(def.name).map(String::as_str)) {
                Ok(value) => values.push((def, value)),
                Err(error) => errors.add(error),
            }
        }

        (values, errors)
    }
}

impl ConfigSchema for ConfigDef {
    fn parse(&self, raw: &RawConfig) -> Result<SinkConfig, ParseErrors> {
        let (values, errors) = self.parse_values(raw);
        errors.into_result()?;
        SinkConfig::from_values(&values, raw)
    }

    fn report(&self, raw: &RawConfig) -> ValidationReport {
        let (values, errors) = self.parse_values(raw);
        let mut report = ValidationReport::new();

        for def in DEFINITIONS {
            let value = values
                .iter()
                .find(|(d, _)| d.name == def.name)
                .and_then(|(_, v)| v.display_value())
                .or_else(|| match def.ty {
                    PropertyType::Password => raw.get(def.name).map(|_| "[hidden]".to_string()),
                    _ => raw.get(def.name).cloned(),
                });
            report.insert(FieldReport::new(def.name, value));
        }

        for error in errors.errors {
            report.add_syntax_error(error);
        }

        report
    }
}
