//! Property names recognised by the Essink sink connector
//!
//! Copyright (c) 2025 Essink Team
//! Licensed under the Apache-2.0 license

/// Comma-separated list of search service URLs
pub const CONNECTION_URL: &str = "connection.url";
pub const CONNECTION_USERNAME: &str = "connection.username";
pub const CONNECTION_PASSWORD: &str = "connection.password";
pub const CONNECTION_TIMEOUT_MS: &str = "connection.timeout.ms";
pub const READ_TIMEOUT_MS: &str = "read.timeout.ms";

pub const BATCH_SIZE: &str = "batch.size";
pub const MAX_IN_FLIGHT_REQUESTS: &str = "max.in.flight.requests";
pub const MAX_BUFFERED_RECORDS: &str = "max.buffered.records";
pub const LINGER_MS: &str = "linger.ms";
pub const FLUSH_TIMEOUT_MS: &str = "flush.timeout.ms";
pub const MAX_RETRIES: &str = "max.retries";
pub const RETRY_BACKOFF_MS: &str = "retry.backoff.ms";

pub const IGNORE_KEY: &str = "key.ignore";
pub const IGNORE_SCHEMA: &str = "schema.ignore";
pub const IGNORE_KEY_TOPICS: &str = "topic.key.ignore";
pub const IGNORE_SCHEMA_TOPICS: &str = "topic.schema.ignore";

pub const WRITE_METHOD: &str = "write.method";
pub const BEHAVIOR_ON_NULL_VALUES: &str = "behavior.on.null.values";

pub const DATA_STREAM_TYPE: &str = "data.stream.type";
pub const DATA_STREAM_DATASET: &str = "data.stream.dataset";
pub const DATA_STREAM_TIMESTAMP_FIELD: &str = "data.stream.timestamp.field";

pub const PROXY_HOST: &str = "proxy.host";
pub const PROXY_PORT: &str = "proxy.port";
pub const PROXY_USERNAME: &str = "proxy.username";
pub const PROXY_PASSWORD: &str = "proxy.password";

pub const SECURITY_PROTOCOL: &str = "elastic.security.protocol";

pub const KERBEROS_PRINCIPAL: &str = "kerberos.user.principal";
pub const KERBEROS_KEYTAB_PATH: &str = "kerberos.keytab.path";

/// Prefix shared by every TLS setting passed through to the HTTPS client
pub const SSL_CONFIG_PREFIX: &str = "elastic.https.";

pub const SSL_KEYSTORE_LOCATION: &str = "elastic.https.ssl.keystore.location";
pub const SSL_KEYSTORE_PASSWORD: &str = "elastic.https.ssl.keystore.password";
pub const SSL_TRUSTSTORE_LOCATION: &str = "elastic.https.ssl.truststore.location";
pub const SSL_TRUSTSTORE_PASSWORD: &str = "elastic.https.ssl.truststore.password";

/// SSL keys that must all be present when the security protocol is SSL
pub const REQUIRED_SSL_CONFIGS: [&str; 4] = [
    SSL_KEYSTORE_LOCATION,
    SSL_KEYSTORE_PASSWORD,
    SSL_TRUSTSTORE_LOCATION,
    SSL_TRUSTSTORE_PASSWORD,
];
