//! Structured cross-field and connectivity diagnostics
//!
//! Issues carry only their formatting arguments; the human-readable text is
//! produced by `Display` when a report is rendered.
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::properties::*;
use serde::Serialize;
use std::fmt;

/// One diagnostic kind, independent of the properties it is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    CredentialsIncomplete,
    DataStreamIncomplete,
    UpsertWithDataStream,
    DeleteWithDataStream,
    TimestampWithoutDataStream,
    IgnoreKeyConflict,
    IgnoreSchemaConflict,
    KerberosIncomplete,
    KerberosWithCredentials,
    KerberosWithProxy,
    LingerExceedsFlushTimeout {
        linger_ms: i64,
        flush_timeout_ms: i64,
    },
    BufferTooSmall {
        max_buffered_records: i32,
        batch_size: i32,
        max_in_flight_requests: i32,
    },
    ProxyHostRequired {
        property: String,
    },
    ProxyCredentialsIncomplete,
    SslConfigsWithoutSsl,
    SslConfigsMissing {
        missing: Vec<String>,
    },
    ConnectionFailed {
        detail: String,
    },
    AuthenticationFailed {
        detail: String,
    },
    SslConnectionFailed {
        detail: String,
    },
    KerberosConnectionFailed {
        detail: String,
    },
    ProxyConnectionFailed {
        detail: String,
    },
    ClientCreationFailed {
        detail: String,
    },
    DataStreamVersionIncompatible {
        server_version: String,
        minimum_version: String,
    },
    ConnectorVersionIncompatible {
        connector_version: String,
        server_version: String,
        minimum_version: String,
    },
}

impl ConfigIssue {
    /// Stable snake_case tag, matching the serialized `kind`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialsIncomplete => "credentials_incomplete",
            Self::DataStreamIncomplete => "data_stream_incomplete",
            Self::UpsertWithDataStream => "upsert_with_data_stream",
            Self::DeleteWithDataStream => "delete_with_data_stream",
            Self::TimestampWithoutDataStream => "timestamp_without_data_stream",
            Self::IgnoreKeyConflict => "ignore_key_conflict",
            Self::IgnoreSchemaConflict => "ignore_schema_conflict",
            Self::KerberosIncomplete => "kerberos_incomplete",
            Self::KerberosWithCredentials => "kerberos_with_credentials",
            Self::KerberosWithProxy => "kerberos_with_proxy",
            Self::LingerExceedsFlushTimeout { .. } => "linger_exceeds_flush_timeout",
            Self::BufferTooSmall { .. } => "buffer_too_small",
            Self::ProxyHostRequired { .. } => "proxy_host_required",
            Self::ProxyCredentialsIncomplete => "proxy_credentials_incomplete",
            Self::SslConfigsWithoutSsl => "ssl_configs_without_ssl",
            Self::SslConfigsMissing { .. } => "ssl_configs_missing",
            Self::ConnectionFailed { .. } => "connection_failed",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::SslConnectionFailed { .. } => "ssl_connection_failed",
            Self::KerberosConnectionFailed { .. } => "kerberos_connection_failed",
            Self::ProxyConnectionFailed { .. } => "proxy_connection_failed",
            Self::ClientCreationFailed { .. } => "client_creation_failed",
            Self::DataStreamVersionIncompatible { .. } => "data_stream_version_incompatible",
            Self::ConnectorVersionIncompatible { .. } => "connector_version_incompatible",
        }
    }
}

/// Appends " Error message: <detail>" when the transport gave us one
fn write_detail(f: &mut fmt::Formatter<'_>, detail: &str) -> fmt::Result {
    if detail.is_empty() {
        Ok(())
    } else {
        write!(f, " Error message: {}", detail)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialsIncomplete => write!(
                f,
                "Both '{}' and '{}' must be set.",
                CONNECTION_USERNAME, CONNECTION_PASSWORD
            ),
            Self::DataStreamIncomplete => write!(
                f,
                "Either both or neither '{}' and '{}' must be set.",
                DATA_STREAM_DATASET, DATA_STREAM_TYPE
            ),
            Self::UpsertWithDataStream => write!(
                f,
                "Upserts are not supported with data streams. \
                 {} must not be UPSERT if {} and {} are set.",
                WRITE_METHOD, DATA_STREAM_TYPE, DATA_STREAM_DATASET
            ),
            Self::DeleteWithDataStream => write!(
                f,
                "Deletes are not supported with data streams. \
                 {} must not be DELETE if {} and {} are set.",
                BEHAVIOR_ON_NULL_VALUES, DATA_STREAM_TYPE, DATA_STREAM_DATASET
            ),
            Self::TimestampWithoutDataStream => write!(
                f,
                "Mapping a field to the '@timestamp' field is only necessary for data streams. \
                 {} must not be set if {} and {} are not set.",
                DATA_STREAM_TIMESTAMP_FIELD, DATA_STREAM_TYPE, DATA_STREAM_DATASET
            ),
            Self::IgnoreKeyConflict => write!(
                f,
                "'{}' can not be set if '{}' is true.",
                IGNORE_KEY_TOPICS, IGNORE_KEY
            ),
            Self::IgnoreSchemaConflict => write!(
                f,
                "'{}' can not be set if '{}' is true.",
                IGNORE_SCHEMA_TOPICS, IGNORE_SCHEMA
            ),
            Self::KerberosIncomplete => write!(
                f,
                "Either both or neither '{}' and '{}' must be set.",
                KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH
            ),
            Self::KerberosWithCredentials => write!(
                f,
                "Either only Kerberos ({}, {}) or connection credentials ({}, {}) must be set.",
                KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH, CONNECTION_USERNAME, CONNECTION_PASSWORD
            ),
            Self::KerberosWithProxy => write!(
                f,
                "Kerberos ({}, {}) is not supported with proxy settings ({}).",
                KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH, PROXY_HOST
            ),
            Self::LingerExceedsFlushTimeout {
                linger_ms,
                flush_timeout_ms,
            } => write!(
                f,
                "'{}' ({}) can not be larger than '{}' ({}).",
                LINGER_MS, linger_ms, FLUSH_TIMEOUT_MS, flush_timeout_ms
            ),
            Self::BufferTooSmall {
                max_buffered_records,
                batch_size,
                max_in_flight_requests,
            } => write!(
                f,
                "'{}' ({}) must be larger than or equal to '{}' ({}) x '{}' ({}).",
                MAX_BUFFERED_RECORDS,
                max_buffered_records,
                BATCH_SIZE,
                batch_size,
                MAX_IN_FLIGHT_REQUESTS,
                max_in_flight_requests
            ),
            Self::ProxyHostRequired { property } => {
                write!(f, "'{}' must be set to use '{}'.", PROXY_HOST, property)
            }
            Self::ProxyCredentialsIncomplete => write!(
                f,
                "Either both or neither '{}' and '{}' can be set.",
                PROXY_USERNAME, PROXY_PASSWORD
            ),
            Self::SslConfigsWithoutSsl => write!(
                f,
                "'{}' must be set to 'SSL' to use SSL configs.",
                SECURITY_PROTOCOL
            ),
            Self::SslConfigsMissing { missing } => {
                write!(
                    f,
                    "At least these SSL configs ('{}', '{}', '{}', and '{}') must be present \
                     for SSL support. Otherwise set '{}' to 'PLAINTEXT'.",
                    SSL_KEYSTORE_LOCATION,
                    SSL_KEYSTORE_PASSWORD,
                    SSL_TRUSTSTORE_LOCATION,
                    SSL_TRUSTSTORE_PASSWORD,
                    SECURITY_PROTOCOL
                )?;
                if !missing.is_empty() {
                    write!(f, " Missing: {}.", missing.join(", "))?;
                }
                Ok(())
            }
            Self::ConnectionFailed { detail } => {
                write!(f, "Could not connect to Elasticsearch.")?;
                write_detail(f, detail)
            }
            Self::AuthenticationFailed { detail } => {
                write!(
                    f,
                    "Could not authenticate the user. Check the '{}' and '{}'.",
                    CONNECTION_USERNAME, CONNECTION_PASSWORD
                )?;
                write_detail(f, detail)
            }
            Self::SslConnectionFailed { detail } => {
                write!(f, "Could not connect to Elasticsearch. Check your SSL settings.")?;
                write_detail(f, detail)
            }
            Self::KerberosConnectionFailed { detail } => {
                write!(f, "Could not connect to Elasticsearch. Check your Kerberos settings.")?;
                write_detail(f, detail)
            }
            Self::ProxyConnectionFailed { detail } => {
                write!(f, "Could not connect to Elasticsearch. Check your proxy settings.")?;
                write_detail(f, detail)
            }
            Self::ClientCreationFailed { detail } => {
                write!(f, "Failed to create client to verify connection. {}", detail)
            }
            Self::DataStreamVersionIncompatible {
                server_version,
                minimum_version,
            } => write!(
                f,
                "Elasticsearch version {} is not compatible with data streams. \
                 Elasticsearch version must be at least {}.",
                server_version, minimum_version
            ),
            Self::ConnectorVersionIncompatible {
                connector_version,
                server_version,
                minimum_version,
            } => write!(
                f,
                "Connector version {} is not compatible with Elasticsearch version {}. \
                 Elasticsearch version must be at least {}.",
                connector_version, server_version, minimum_version
            ),
        }
    }
}

/// An issue together with every property it is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub fields: Vec<&'static str>,
    pub issue: ConfigIssue,
}

impl Violation {
    pub fn new(issue: ConfigIssue, fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            issue,
        }
    }

    /// Whether this violation is attributed to `property`
    pub fn applies_to(&self, property: &str) -> bool {
        self.fields.iter().any(|f| *f == property)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.fields.join(", "), self.issue)
    }
}
