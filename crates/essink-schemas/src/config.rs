//! Strongly-typed view of a sink connector configuration
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::definition::{ConfigDef, ConfigValue, PropertyDef};
use crate::properties::*;
use crate::validation::base::{ConfigSchema, RawConfig};
use crate::validation::error::{ParseError, ParseErrors};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

macro_rules! config_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("unknown {} '{}'", stringify!($name), s))
            }
        }
    };
}

config_enum! {
    /// Insert vs. upsert semantics for outgoing records
    WriteMethod { Insert => "INSERT", Upsert => "UPSERT" }
}

config_enum! {
    /// What to do with a record whose value is null
    BehaviorOnNullValues { Ignore => "IGNORE", Delete => "DELETE", Fail => "FAIL" }
}

config_enum! {
    /// Data stream type; `None` means indices are used instead
    DataStreamType {
        Logs => "LOGS",
        Metrics => "METRICS",
        Synthetics => "SYNTHETICS",
        Traces => "TRACES",
        None => "NONE",
    }
}

config_enum! {
    SecurityProtocol { Plaintext => "PLAINTEXT", Ssl => "SSL" }
}

/// Parsed, immutable sink configuration
///
/// Built once per validation from the raw properties; every getter is
/// infallible because syntax errors are reported before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    connection_urls: Vec<String>,
    username: Option<String>,
    password: Option<String>,
    batch_size: i32,
    max_in_flight_requests: i32,
    max_buffered_records: i32,
    linger_ms: i64,
    flush_timeout_ms: i64,
    max_retries: i32,
    retry_backoff_ms: i64,
    connection_timeout_ms: i32,
    read_timeout_ms: i32,
    ignore_key: bool,
    ignore_schema: bool,
    ignore_key_topics: Vec<String>,
    ignore_schema_topics: Vec<String>,
    write_method: WriteMethod,
    behavior_on_null_values: BehaviorOnNullValues,
    data_stream_type: DataStreamType,
    data_stream_dataset: String,
    data_stream_timestamp_fields: Vec<String>,
    proxy_host: String,
    proxy_port: u16,
    proxy_username: String,
    proxy_password: Option<String>,
    security_protocol: SecurityProtocol,
    kerberos_principal: Option<String>,
    keytab_path: Option<PathBuf>,
    ssl_configs: BTreeMap<String, String>,
}

/// Typed lookups over the resolved values of one raw configuration
struct Resolved<'a> {
    values: &'a [(&'static PropertyDef, ConfigValue)],
    errors: ParseErrors,
}

impl<'a> Resolved<'a> {
    fn get(&self, name: &str) -> Option<&'a ConfigValue> {
        self.values
            .iter()
            .find(|(def, _)| def.name == name)
            .map(|(_, value)| value)
    }

    fn unresolved(&mut self, name: &str) {
        self.errors.add(ParseError::invalid(
            name,
            "",
            "Property was not resolved by the schema definition",
        ));
    }

    fn optional_string(&mut self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(ConfigValue::Null) => None,
            Some(value) => value.as_str().map(str::to_string),
            None => {
                self.unresolved(name);
                None
            }
        }
    }

    fn string(&mut self, name: &str) -> String {
        self.optional_string(name).unwrap_or_default()
    }

    fn long(&mut self, name: &str) -> i64 {
        match self.get(name).and_then(ConfigValue::as_i64) {
            Some(v) => v,
            None => {
                self.unresolved(name);
                0
            }
        }
    }

    fn int(&mut self, name: &str) -> i32 {
        let value = self.long(name);
        match i32::try_from(value) {
            Ok(v) => v,
            Err(_) => {
                self.errors.add(ParseError::invalid(
                    name,
                    value.to_string(),
                    "Not a number of type INT",
                ));
                0
            }
        }
    }

    fn boolean(&mut self, name: &str) -> bool {
        match self.get(name).and_then(ConfigValue::as_bool) {
            Some(b) => b,
            None => {
                self.unresolved(name);
                false
            }
        }
    }

    fn list(&mut self, name: &str) -> Vec<String> {
        match self.get(name).and_then(ConfigValue::as_list) {
            Some(items) => items.to_vec(),
            None => {
                self.unresolved(name);
                Vec::new()
            }
        }
    }

    fn choice<T>(&mut self, name: &str, fallback: T) -> T
    where
        T: FromStr<Err = String>,
    {
        let text = self.string(name);
        match text.parse() {
            Ok(v) => v,
            Err(reason) => {
                self.errors.add(ParseError::invalid(name, text, reason));
                fallback
            }
        }
    }
}

impl SinkConfig {
    /// Parse raw properties with the default [`ConfigDef`]
    pub fn parse(raw: &RawConfig) -> Result<Self, ParseErrors> {
        ConfigDef::new().parse(raw)
    }

    /// Assemble the typed view from values already resolved by a schema definition
    pub fn from_values(
        values: &[(&'static PropertyDef, ConfigValue)],
        raw: &RawConfig,
    ) -> Result<Self, ParseErrors> {
        let mut r = Resolved {
            values,
            errors: ParseErrors::new(),
        };

        let proxy_port = r.int(PROXY_PORT);
        let config = Self {
            connection_urls: r.list(CONNECTION_URL),
            username: r.optional_string(CONNECTION_USERNAME),
            password: r.optional_string(CONNECTION_PASSWORD),
            batch_size: r.int(BATCH_SIZE),
            max_in_flight_requests: r.int(MAX_IN_FLIGHT_REQUESTS),
            max_buffered_records: r.int(MAX_BUFFERED_RECORDS),
            linger_ms: r.long(LINGER_MS),
            flush_timeout_ms: r.long(FLUSH_TIMEOUT_MS),
            max_retries: r.int(MAX_RETRIES),
            retry_backoff_ms: r.long(RETRY_BACKOFF_MS),
            connection_timeout_ms: r.int(CONNECTION_TIMEOUT_MS),
            read_timeout_ms: r.int(READ_TIMEOUT_MS),
            ignore_key: r.boolean(IGNORE_KEY),
            ignore_schema: r.boolean(IGNORE_SCHEMA),
            ignore_key_topics: r.list(IGNORE_KEY_TOPICS),
            ignore_schema_topics: r.list(IGNORE_SCHEMA_TOPICS),
            write_method: r.choice(WRITE_METHOD, WriteMethod::Insert),
            behavior_on_null_values: r.choice(BEHAVIOR_ON_NULL_VALUES, BehaviorOnNullValues::Fail),
            data_stream_type: r.choice(DATA_STREAM_TYPE, DataStreamType::None),
            data_stream_dataset: r.string(DATA_STREAM_DATASET),
            data_stream_timestamp_fields: r.list(DATA_STREAM_TIMESTAMP_FIELD),
            proxy_host: r.string(PROXY_HOST),
            proxy_port: u16::try_from(proxy_port).unwrap_or_default(),
            proxy_username: r.string(PROXY_USERNAME),
            proxy_password: r.optional_string(PROXY_PASSWORD),
            security_protocol: r.choice(SECURITY_PROTOCOL, SecurityProtocol::Plaintext),
            kerberos_principal: r.optional_string(KERBEROS_PRINCIPAL),
            keytab_path: r.optional_string(KERBEROS_KEYTAB_PATH).map(PathBuf::from),
            ssl_configs: raw
                .iter()
                .filter(|(key, _)| key.starts_with(SSL_CONFIG_PREFIX))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };

        r.errors.into_result()?;
        Ok(config)
    }

    pub fn connection_urls(&self) -> &[String] {
        &self.connection_urls
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn batch_size(&self) -> i32 {
        self.batch_size
    }

    pub fn max_in_flight_requests(&self) -> i32 {
        self.max_in_flight_requests
    }

    pub fn max_buffered_records(&self) -> i32 {
        self.max_buffered_records
    }

    pub fn linger_ms(&self) -> i64 {
        self.linger_ms
    }

    pub fn flush_timeout_ms(&self) -> i64 {
        self.flush_timeout_ms
    }

    pub fn max_retries(&self) -> i32 {
        self.max_retries
    }

    pub fn retry_backoff_ms(&self) -> i64 {
        self.retry_backoff_ms
    }

    pub fn connection_timeout_ms(&self) -> i32 {
        self.connection_timeout_ms
    }

    pub fn read_timeout_ms(&self) -> i32 {
        self.read_timeout_ms
    }

    pub fn ignore_key(&self) -> bool {
        self.ignore_key
    }

    pub fn ignore_schema(&self) -> bool {
        self.ignore_schema
    }

    pub fn ignore_key_topics(&self) -> &[String] {
        &self.ignore_key_topics
    }

    pub fn ignore_schema_topics(&self) -> &[String] {
        &self.ignore_schema_topics
    }

    pub fn write_method(&self) -> WriteMethod {
        self.write_method
    }

    pub fn behavior_on_null_values(&self) -> BehaviorOnNullValues {
        self.behavior_on_null_values
    }

    pub fn data_stream_type(&self) -> DataStreamType {
        self.data_stream_type
    }

    pub fn data_stream_dataset(&self) -> &str {
        &self.data_stream_dataset
    }

    pub fn data_stream_timestamp_fields(&self) -> &[String] {
        &self.data_stream_timestamp_fields
    }

    pub fn proxy_host(&self) -> &str {
        &self.proxy_host
    }

    pub fn proxy_port(&self) -> u16 {
        self.proxy_port
    }

    pub fn proxy_username(&self) -> &str {
        &self.proxy_username
    }

    pub fn proxy_password(&self) -> Option<&str> {
        self.proxy_password.as_deref()
    }

    pub fn security_protocol(&self) -> SecurityProtocol {
        self.security_protocol
    }

    pub fn kerberos_principal(&self) -> Option<&str> {
        self.kerberos_principal.as_deref()
    }

    pub fn keytab_path(&self) -> Option<&std::path::Path> {
        self.keytab_path.as_deref()
    }

    /// Raw `elastic.https.`-prefixed settings, keyed by their full name
    pub fn ssl_configs(&self) -> &BTreeMap<String, String> {
        &self.ssl_configs
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    pub fn is_data_stream(&self) -> bool {
        self.data_stream_type != DataStreamType::None && !self.data_stream_dataset.is_empty()
    }

    pub fn is_kerberos_enabled(&self) -> bool {
        self.kerberos_principal.is_some() || self.keytab_path.is_some()
    }

    pub fn is_proxy_configured(&self) -> bool {
        !self.proxy_host.is_empty()
    }

    pub fn is_proxy_authenticated(&self) -> bool {
        self.is_proxy_configured()
            && !self.proxy_username.is_empty()
            && self.proxy_password.is_some()
    }

    pub fn is_ssl_enabled(&self) -> bool {
        self.security_protocol == SecurityProtocol::Ssl
    }
}
