//! Cross-field rule engine
//!
//! Each rule is a pure function from the typed configuration to the
//! violations it finds. Rules never see each other's results, so every rule
//! runs on every evaluation and one failure cannot hide another.
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

use essink_schemas::properties::*;
use essink_schemas::{
    BehaviorOnNullValues, ConfigIssue, DataStreamType, SinkConfig, Violation, WriteMethod,
};
use tracing::debug;

type Check = fn(&SinkConfig) -> Vec<Violation>;

/// A named, stateless cross-field check
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    check: Check,
}

impl Rule {
    const fn new(name: &'static str, check: Check) -> Self {
        Self { name, check }
    }

    pub fn check(&self, config: &SinkConfig) -> Vec<Violation> {
        (self.check)(config)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

static RULES: &[Rule] = &[
    Rule::new("credentials", check_credentials),
    Rule::new("data_stream_pair", check_data_stream_pair),
    Rule::new("data_stream_upsert", check_data_stream_upsert),
    Rule::new("data_stream_delete", check_data_stream_delete),
    Rule::new("timestamp_field", check_timestamp_field),
    Rule::new("ignore_key", check_ignore_key),
    Rule::new("ignore_schema", check_ignore_schema),
    Rule::new("kerberos_pair", check_kerberos_pair),
    Rule::new("kerberos_credentials", check_kerberos_credentials),
    Rule::new("kerberos_proxy", check_kerberos_proxy),
    Rule::new("linger", check_linger),
    Rule::new("buffer_capacity", check_buffer_capacity),
    Rule::new("proxy", check_proxy),
    Rule::new("ssl", check_ssl),
];

/// Runs the fixed rule set against a configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn rules(&self) -> &'static [Rule] {
        RULES
    }

    /// Evaluate every rule and collect all violations in rule order
    pub fn evaluate(&self, config: &SinkConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in RULES {
            for violation in rule.check(config) {
                debug!(
                    rule = rule.name,
                    kind = violation.issue.kind(),
                    fields = ?violation.fields,
                    "Rule violated"
                );
                violations.push(violation);
            }
        }
        violations
    }
}

fn single(condition: bool, issue: ConfigIssue, fields: &[&'static str]) -> Vec<Violation> {
    if condition {
        vec![Violation::new(issue, fields)]
    } else {
        Vec::new()
    }
}

fn check_credentials(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.username().is_some() != config.password().is_some(),
        ConfigIssue::CredentialsIncomplete,
        &[CONNECTION_USERNAME, CONNECTION_PASSWORD],
    )
}

fn check_data_stream_pair(config: &SinkConfig) -> Vec<Violation> {
    let type_set = config.data_stream_type() != DataStreamType::None;
    let dataset_set = !config.data_stream_dataset().is_empty();
    single(
        type_set != dataset_set,
        ConfigIssue::DataStreamIncomplete,
        &[DATA_STREAM_DATASET, DATA_STREAM_TYPE],
    )
}

fn check_data_stream_upsert(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.is_data_stream() && config.write_method() == WriteMethod::Upsert,
        ConfigIssue::UpsertWithDataStream,
        &[WRITE_METHOD],
    )
}

fn check_data_stream_delete(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.is_data_stream() && config.behavior_on_null_values() == BehaviorOnNullValues::Delete,
        ConfigIssue::DeleteWithDataStream,
        &[BEHAVIOR_ON_NULL_VALUES],
    )
}

fn check_timestamp_field(config: &SinkConfig) -> Vec<Violation> {
    single(
        !config.is_data_stream() && !config.data_stream_timestamp_fields().is_empty(),
        ConfigIssue::TimestampWithoutDataStream,
        &[DATA_STREAM_TIMESTAMP_FIELD],
    )
}

fn check_ignore_key(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.ignore_key() && !config.ignore_key_topics().is_empty(),
        ConfigIssue::IgnoreKeyConflict,
        &[IGNORE_KEY, IGNORE_KEY_TOPICS],
    )
}

fn check_ignore_schema(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.ignore_schema() && !config.ignore_schema_topics().is_empty(),
        ConfigIssue::IgnoreSchemaConflict,
        &[IGNORE_SCHEMA, IGNORE_SCHEMA_TOPICS],
    )
}

fn check_kerberos_pair(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.kerberos_principal().is_some() != config.keytab_path().is_some(),
        ConfigIssue::KerberosIncomplete,
        &[KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH],
    )
}

fn check_kerberos_credentials(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.is_kerberos_enabled() && config.is_authenticated(),
        ConfigIssue::KerberosWithCredentials,
        &[KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH, CONNECTION_USERNAME, CONNECTION_PASSWORD],
    )
}

fn check_kerberos_proxy(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.is_kerberos_enabled() && config.is_proxy_configured(),
        ConfigIssue::KerberosWithProxy,
        &[KERBEROS_PRINCIPAL, KERBEROS_KEYTAB_PATH, PROXY_HOST],
    )
}

fn check_linger(config: &SinkConfig) -> Vec<Violation> {
    single(
        config.linger_ms() > config.flush_timeout_ms(),
        ConfigIssue::LingerExceedsFlushTimeout {
            linger_ms: config.linger_ms(),
            flush_timeout_ms: config.flush_timeout_ms(),
        },
        &[LINGER_MS, FLUSH_TIMEOUT_MS],
    )
}

fn check_buffer_capacity(config: &SinkConfig) -> Vec<Violation> {
    let required = config.batch_size().checked_mul(config.max_in_flight_requests());
    // An overflowing product can never be satisfied by an i32 buffer size
    let too_small = match required {
        Some(required) => config.max_buffered_records() < required,
        None => true,
    };
    single(
        too_small,
        ConfigIssue::BufferTooSmall {
            max_buffered_records: config.max_buffered_records(),
            batch_size: config.batch_size(),
            max_in_flight_requests: config.max_in_flight_requests(),
        },
        &[MAX_BUFFERED_RECORDS, BATCH_SIZE, MAX_IN_FLIGHT_REQUESTS],
    )
}

fn check_proxy(config: &SinkConfig) -> Vec<Violation> {
    let username_set = !config.proxy_username().is_empty();
    let password_set = config.proxy_password().is_some();

    if !config.is_proxy_configured() {
        let mut violations = Vec::new();
        if username_set {
            violations.push(Violation::new(
                ConfigIssue::ProxyHostRequired {
                    property: PROXY_USERNAME.to_string(),
                },
                &[PROXY_USERNAME, PROXY_HOST],
            ));
        }
        if password_set {
            violations.push(Violation::new(
                ConfigIssue::ProxyHostRequired {
                    property: PROXY_PASSWORD.to_string(),
                },
                &[PROXY_PASSWORD, PROXY_HOST],
            ));
        }
        return violations;
    }

    single(
        username_set != password_set,
        ConfigIssue::ProxyCredentialsIncomplete,
        &[PROXY_USERNAME, PROXY_PASSWORD],
    )
}

fn check_ssl(config: &SinkConfig) -> Vec<Violation> {
    let ssl_configs = config.ssl_configs();
    if !config.is_ssl_enabled() {
        return single(
            !ssl_configs.is_empty(),
            ConfigIssue::SslConfigsWithoutSsl,
            &[SECURITY_PROTOCOL],
        );
    }

    let missing: Vec<String> = REQUIRED_SSL_CONFIGS
        .iter()
        .filter(|key| !ssl_configs.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    single(
        !missing.is_empty(),
        ConfigIssue::SslConfigsMissing { missing },
        &[SECURITY_PROTOCOL],
    )
}
