//! Validation orchestrator
//!
//! Runs the stages in order and folds every outcome into one
//! [`ValidationReport`]:
//!
//! 1. Syntax parsing by the [`ConfigSchema`]. Any syntax error ends the run.
//! 2. Every cross-field rule.
//! 3. Only when nothing failed so far, a single connectivity probe.
//! 4. When the probe found the service reachable and learned its version,
//!    the two compatibility gates. A server version that cannot be compared
//!    is reported on `connection.url` like any other client failure.
//!
//! [`Validator::validate`] never fails. Problems become report entries.
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use crate::probe::{
    ClientFactory, ConnectivityProbe, HttpClientFactory, ProbeOutcome, ProbeResult,
};
use crate::rules::RuleEngine;
use crate::version::{
    self, CONNECTOR_MIN_VERSION, CONNECTOR_VERSION, DATA_STREAM_MIN_VERSION,
};
use crate::Result;
use essink_schemas::properties::*;
use essink_schemas::{
    raw_config_from_json, ConfigDef, ConfigIssue, ConfigSchema, RawConfig, SinkConfig,
    ValidationReport, Violation,
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Settings of the validator itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Oldest server version accepted for data stream targets
    pub data_stream_min_version: String,
    /// Oldest server version accepted at all
    pub connector_min_version: String,
    /// Quoted in the overall compatibility message
    pub connector_version: String,
    /// Whether to contact the service once syntax and rules pass
    pub probe_connection: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            data_stream_min_version: DATA_STREAM_MIN_VERSION.to_string(),
            connector_min_version: CONNECTOR_MIN_VERSION.to_string(),
            connector_version: CONNECTOR_VERSION.to_string(),
            probe_connection: true,
        }
    }
}

impl ValidatorConfig {
    /// Syntax and rules only, never touching the network
    pub fn offline() -> Self {
        Self {
            probe_connection: false,
            ..Self::default()
        }
    }

    pub fn with_data_stream_min_version<V: Into<String>>(mut self, version: V) -> Self {
        self.data_stream_min_version = version.into();
        self
    }

    pub fn with_connector_min_version<V: Into<String>>(mut self, version: V) -> Self {
        self.connector_min_version = version.into();
        self
    }

    pub fn with_connector_version<V: Into<String>>(mut self, version: V) -> Self {
        self.connector_version = version.into();
        self
    }

    pub fn with_probe_connection(mut self, probe: bool) -> Self {
        self.probe_connection = probe;
        self
    }
}

/// Validates raw sink connector properties
pub struct Validator {
    schema: Box<dyn ConfigSchema>,
    factory: Box<dyn ClientFactory>,
    rules: RuleEngine,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Default schema, HTTP client and settings
    pub fn new() -> Self {
        Self {
            schema: Box::new(ConfigDef::new()),
            factory: Box::new(HttpClientFactory::new()),
            rules: RuleEngine::new(),
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_schema<S: ConfigSchema + 'static>(mut self, schema: S) -> Self {
        self.schema = Box::new(schema);
        self
    }

    pub fn with_client_factory<F: ClientFactory + 'static>(mut self, factory: F) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(&self, raw: &RawConfig) -> ValidationReport {
        let (mut report, config) = self.schema.check(raw);
        let Some(config) = config else {
            info!(
                errors = report.error_count(),
                "Syntax errors found, skipping further checks"
            );
            return report;
        };

        let violations = self.rules.evaluate(&config);
        report.attach_all(&violations);
        if report.has_errors() {
            info!(
                violations = violations.len(),
                "Rule violations found, skipping connectivity probe"
            );
            return report;
        }

        if !self.config.probe_connection {
            debug!("Connectivity probe disabled");
            return report;
        }

        match ConnectivityProbe::new(self.factory.as_ref()).run(&config) {
            ProbeOutcome::ClientUnavailable { detail } => {
                report.attach(&Violation::new(
                    ConfigIssue::ClientCreationFailed { detail },
                    &[CONNECTION_URL],
                ));
            }
            ProbeOutcome::Completed {
                result,
                server_version,
            } => {
                if let ProbeResult::Unreachable(detail) = &result {
                    report.attach_all(&connection_violations(&config, detail));
                }
                if let Some(server_version) = server_version {
                    match version_violations(&config, &server_version, &self.config) {
                        Ok(violations) => report.attach_all(&violations),
                        Err(e) => {
                            warn!(
                                error = %e,
                                server_version = %server_version,
                                "Version check failed"
                            );
                            report.attach(&Violation::new(
                                ConfigIssue::ClientCreationFailed {
                                    detail: e.to_string(),
                                },
                                &[CONNECTION_URL],
                            ));
                        }
                    }
                }
            }
        }

        report
    }

    /// Validate properties given as a flat JSON object
    pub fn validate_json(&self, value: &Value) -> Result<ValidationReport> {
        let raw = raw_config_from_json(value)?;
        Ok(self.validate(&raw))
    }

    /// Validate properties stored as a flat JSON object in `path`
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> Result<ValidationReport> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&text)?;
        self.validate_json(&value)
    }
}

/// Every diagnostic for an unreachable service, one per enabled feature
pub fn connection_violations(config: &SinkConfig, detail: &str) -> Vec<Violation> {
    let detail = detail.to_string();
    let mut violations = vec![Violation::new(
        ConfigIssue::ConnectionFailed {
            detail: detail.clone(),
        },
        &[CONNECTION_URL],
    )];

    if config.is_authenticated() {
        violations.push(Violation::new(
            ConfigIssue::AuthenticationFailed {
                detail: detail.clone(),
            },
            &[CONNECTION_USERNAME, CONNECTION_PASSWORD],
        ));
    }

    if config.is_ssl_enabled() {
        violations.push(Violation::new(
            ConfigIssue::SslConnectionFailed {
                detail: detail.clone(),
            },
            &[SECURITY_PROTOCOL],
        ));
    }

    if config.is_kerberos_enabled() {
        violations.push(Violation::new(
            ConfigIssue::KerberosConnectionFailed {
                detail: detail.clone(),
            },
            &[KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH],
        ));
    }

    if config.is_proxy_configured() {
        let fields: &[&'static str] = if config.is_proxy_authenticated() {
            &[PROXY_HOST, PROXY_PORT, PROXY_USERNAME, PROXY_PASSWORD]
        } else {
            &[PROXY_HOST, PROXY_PORT]
        };
        violations.push(Violation::new(ConfigIssue::ProxyConnectionFailed { detail }, fields));
    }

    violations
}

/// Compatibility gates for a known server version
///
/// Fails with [`Error::Version`](crate::Error::Version) as soon as a gate
/// cannot compare its versions.
pub fn version_violations(
    config: &SinkConfig,
    server_version: &str,
    settings: &ValidatorConfig,
) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();

    if config.is_data_stream()
        && version::is_older_than(server_version, &settings.data_stream_min_version)?
    {
        violations.push(Violation::new(
            ConfigIssue::DataStreamVersionIncompatible {
                server_version: server_version.to_string(),
                minimum_version: settings.data_stream_min_version.clone(),
            },
            &[CONNECTION_URL, DATA_STREAM_TYPE, DATA_STREAM_DATASET],
        ));
    }

    if version::is_older_than(server_version, &settings.connector_min_version)? {
        violations.push(Violation::new(
            ConfigIssue::ConnectorVersionIncompatible {
                connector_version: settings.connector_version.clone(),
                server_version: server_version.to_string(),
                minimum_version: settings.connector_min_version.clone(),
            },
            &[CONNECTION_URL],
        ));
    }

    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> SinkConfig {
        let mut raw: RawConfig = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        raw.entry(CONNECTION_URL.to_string())
            .or_insert_with(|| "http://localhost:9200".to_string());
        SinkConfig::parse(&raw).unwrap()
    }

    #[test]
    fn test_plain_connection_failure() {
        let found = connection_violations(&config(&[]), "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fields, vec![CONNECTION_URL]);
        assert_eq!(found[0].issue.to_string(), "Could not connect to Elasticsearch.");
    }

    #[test]
    fn test_connection_failure_variants_accumulate() {
        let found = connection_violations(
            &config(&[
                (CONNECTION_USERNAME, "elastic"),
                (CONNECTION_PASSWORD, "secret"),
                (SECURITY_PROTOCOL, "ssl"),
                (PROXY_HOST, "proxy.local"),
                (PROXY_USERNAME, "user"),
                (PROXY_PASSWORD, "pass"),
            ]),
            "timed out",
        );
        let kinds: Vec<_> = found.iter().map(|v| v.issue.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "connection_failed",
                "authentication_failed",
                "ssl_connection_failed",
                "proxy_connection_failed",
            ]
        );
        assert_eq!(
            found[3].fields,
            vec![PROXY_HOST, PROXY_PORT, PROXY_USERNAME, PROXY_PASSWORD]
        );
        assert!(found[2].issue.to_string().ends_with("Error message: timed out"));
    }

    #[test]
    fn test_proxy_without_auth_marks_host_and_port() {
        let found = connection_violations(&config(&[(PROXY_HOST, "proxy.local")]), "");
        assert_eq!(found[1].fields, vec![PROXY_HOST, PROXY_PORT]);
    }

    #[test]
    fn test_version_gates() {
        let settings = ValidatorConfig::default();
        let data_stream = config(&[(DATA_STREAM_TYPE, "logs"), (DATA_STREAM_DATASET, "valid")]);

        assert!(version_violations(&data_stream, "7.9.3", &settings)
            .unwrap()
            .is_empty());

        let found = version_violations(&data_stream, "1.0.1", &settings).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0].fields,
            vec![CONNECTION_URL, DATA_STREAM_TYPE, DATA_STREAM_DATASET]
        );
        assert_eq!(found[1].fields, vec![CONNECTION_URL]);

        // Without a data stream only the overall gate applies
        let found = version_violations(&config(&[]), "1.0.1", &settings).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].issue.kind(), "connector_version_incompatible");
    }

    #[test]
    fn test_gates_are_independent() {
        let settings = ValidatorConfig::default()
            .with_data_stream_min_version("7.9.0")
            .with_connector_min_version("1.2.0");
        let data_stream = config(&[(DATA_STREAM_TYPE, "logs"), (DATA_STREAM_DATASET, "valid")]);

        let found = version_violations(&data_stream, "7.0.0", &settings).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].issue.kind(), "data_stream_version_incompatible");
    }

    #[test]
    fn test_unparseable_server_version_is_an_error() {
        let settings = ValidatorConfig::default();
        let data_stream = config(&[(DATA_STREAM_TYPE, "logs"), (DATA_STREAM_DATASET, "valid")]);

        let err = version_violations(&data_stream, "garbage.1.0", &settings).unwrap_err();
        assert!(matches!(err, crate::Error::Version(_)));
        assert_eq!(
            err.to_string(),
            "Invalid version segment 'garbage' in 'garbage.1.0'"
        );

        // The overall gate applies without a data stream too
        assert!(version_violations(&config(&[]), "x.y", &settings).is_err());
    }

    #[test]
    fn test_validator_config_builders() {
        let settings = ValidatorConfig::offline().with_connector_version("9.9.9");
        assert!(!settings.probe_connection);
        assert_eq!(settings.connector_version, "9.9.9");
        assert_eq!(settings.data_stream_min_version, DATA_STREAM_MIN_VERSION);
        assert_eq!(
            ValidatorConfig::default().with_probe_connection(false),
            ValidatorConfig::offline()
        );
    }

    #[test]
    fn test_offline_validation_never_probes() {
        let factory = |_: &SinkConfig| -> std::result::Result<
            Box<dyn crate::probe::SearchClient>,
            crate::probe::ClientError,
        > { panic!("client requested while offline") };
        let validator = Validator::new()
            .with_client_factory(factory)
            .with_config(ValidatorConfig::offline());

        let mut raw = RawConfig::new();
        raw.insert(CONNECTION_URL.to_string(), "http://localhost:9200".to_string());
        assert!(validator.validate(&raw).is_valid());
    }
}
