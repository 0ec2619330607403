//! Connectivity and server-version probe
//!
//! One probe run acquires exactly one client, issues a liveness check and,
//! if the service is reachable, fetches its version. The client is released
//! on every exit path by [`ScopedClient`].
//!
//! A `403` answer to the liveness check counts as reachable: the service is
//! there, the caller just may not ask about it. Every other failure is
//! reported as unreachable with the underlying message as detail.

pub mod client;
pub mod error;
pub mod http;

pub use client::{ClientFactory, ScopedClient, SearchClient, ServerInfo};
pub use error::{ClientError, ErrorClassification};
pub use http::{HttpClientFactory, HttpSearchClient};

use essink_schemas::SinkConfig;
use serde::Serialize;
use tracing::{debug, error, info};

/// Outcome of the liveness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ProbeResult {
    Reachable,
    /// Detail is the underlying message, possibly empty
    Unreachable(String),
    /// The service refused the liveness call with 403
    AuthorizationDenied,
}

impl ProbeResult {
    /// Reachable for liveness purposes, including authorization-denied
    pub fn is_reachable(&self) -> bool {
        !matches!(self, ProbeResult::Unreachable(_))
    }
}

/// Everything one probe run learned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The factory failed before any call was attempted
    ClientUnavailable { detail: String },
    Completed {
        result: ProbeResult,
        /// `None` when unreachable or when the version could not be fetched
        server_version: Option<String>,
    },
}

/// Classify a liveness call
pub fn check_liveness(client: &dyn SearchClient) -> ProbeResult {
    match client.ping() {
        Ok(true) => ProbeResult::Reachable,
        Ok(false) => ProbeResult::Unreachable(String::new()),
        Err(e) if e.is_forbidden() => ProbeResult::AuthorizationDenied,
        Err(e) => {
            debug!(classification = ?e.classification(), error = %e, "Liveness check failed");
            ProbeResult::Unreachable(e.detail().to_string())
        }
    }
}

/// Fetch the server version, or `None` on any failure
pub fn fetch_version(client: &dyn SearchClient) -> Option<String> {
    match client.info() {
        Ok(info) => Some(info.version),
        Err(e) => {
            debug!(
                classification = ?e.classification(),
                error = %e,
                "Could not fetch server version, skipping compatibility checks"
            );
            None
        }
    }
}

/// Runs liveness and version checks through a swappable client factory
pub struct ConnectivityProbe<'a> {
    factory: &'a dyn ClientFactory,
}

impl<'a> ConnectivityProbe<'a> {
    pub fn new(factory: &'a dyn ClientFactory) -> Self {
        Self { factory }
    }

    pub fn run(&self, config: &SinkConfig) -> ProbeOutcome {
        let client = match ScopedClient::acquire(self.factory, config) {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Failed to create search client");
                return ProbeOutcome::ClientUnavailable {
                    detail: e.to_string(),
                };
            }
        };

        let result = check_liveness(&*client);
        info!(result = ?result, "Connectivity probe finished");

        let server_version = if result.is_reachable() {
            fetch_version(&*client)
        } else {
            None
        };

        ProbeOutcome::Completed {
            result,
            server_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct Scripted {
        ping: Result<bool, ClientError>,
        info: Result<ServerInfo, ClientError>,
        info_calls: Arc<AtomicUsize>,
    }

    impl SearchClient for Scripted {
        fn ping(&self) -> Result<bool, ClientError> {
            self.ping.clone()
        }

        fn info(&self) -> Result<ServerInfo, ClientError> {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            self.info.clone()
        }

        fn close(&mut self) -> Result<(), ClientError> {
            Ok(())
        }
    }

    impl ClientFactory for Scripted {
        fn client(&self, _: &SinkConfig) -> Result<Box<dyn SearchClient>, ClientError> {
            Ok(Box::new(self.clone()))
        }
    }

    fn scripted(
        ping: Result<bool, ClientError>,
        info: Result<ServerInfo, ClientError>,
    ) -> Scripted {
        Scripted {
            ping,
            info,
            info_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn config() -> SinkConfig {
        let raw = [("connection.url".to_string(), "http://localhost:9200".to_string())]
            .into_iter()
            .collect();
        SinkConfig::parse(&raw).unwrap()
    }

    #[test]
    fn test_liveness_classification() {
        let cases = [
            (Ok(true), ProbeResult::Reachable),
            (Ok(false), ProbeResult::Unreachable(String::new())),
            (Err(ClientError::status(403, "Forbidden")), ProbeResult::AuthorizationDenied),
            (
                Err(ClientError::status(410, "Deleted resource.")),
                ProbeResult::Unreachable("Deleted resource.".to_string()),
            ),
            (
                Err(ClientError::Transport("connection refused".into())),
                ProbeResult::Unreachable("connection refused".to_string()),
            ),
        ];
        for (ping, expected) in cases {
            let client = scripted(ping, Ok(ServerInfo::new("7.9.3")));
            assert_eq!(check_liveness(&client), expected);
        }
    }

    #[test]
    fn test_authorization_denied_is_reachable() {
        assert!(ProbeResult::AuthorizationDenied.is_reachable());
        assert!(ProbeResult::Reachable.is_reachable());
        assert!(!ProbeResult::Unreachable(String::new()).is_reachable());
    }

    #[test]
    fn test_version_fetched_only_when_reachable() {
        let down = scripted(Ok(false), Ok(ServerInfo::new("7.9.3")));
        let outcome = ConnectivityProbe::new(&down).run(&config());
        assert_eq!(
            outcome,
            ProbeOutcome::Completed {
                result: ProbeResult::Unreachable(String::new()),
                server_version: None,
            }
        );
        assert_eq!(down.info_calls.load(Ordering::SeqCst), 0);

        let up = scripted(Ok(true), Ok(ServerInfo::new("7.9.3")));
        let outcome = ConnectivityProbe::new(&up).run(&config());
        assert_eq!(
            outcome,
            ProbeOutcome::Completed {
                result: ProbeResult::Reachable,
                server_version: Some("7.9.3".to_string()),
            }
        );
    }

    #[test]
    fn test_info_failure_is_silent() {
        let client = scripted(Ok(true), Err(ClientError::status(403, "Forbidden")));
        let outcome = ConnectivityProbe::new(&client).run(&config());
        assert_eq!(
            outcome,
            ProbeOutcome::Completed {
                result: ProbeResult::Reachable,
                server_version: None,
            }
        );
    }

    #[test]
    fn test_factory_failure() {
        let factory = |_: &SinkConfig| -> Result<Box<dyn SearchClient>, ClientError> {
            Err(ClientError::Other("no route".into()))
        };
        let outcome = ConnectivityProbe::new(&factory).run(&config());
        assert_eq!(
            outcome,
            ProbeOutcome::ClientUnavailable {
                detail: "no route".to_string()
            }
        );
    }
}
