//! Client seams used by the connectivity probe

use super::ClientError;
use essink_schemas::SinkConfig;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// What the service reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
}

impl ServerInfo {
    pub fn new<V: Into<String>>(version: V) -> Self {
        Self {
            version: version.into(),
            cluster_name: None,
            distribution: None,
        }
    }
}

/// The two read-only calls the probe needs, plus release
pub trait SearchClient: Send {
    /// Liveness check; `Ok(false)` means the service answered but is not usable
    fn ping(&self) -> Result<bool, ClientError>;

    fn info(&self) -> Result<ServerInfo, ClientError>;

    /// Release held resources. Called exactly once by [`ScopedClient`].
    fn close(&mut self) -> Result<(), ClientError>;
}

/// Builds one client per validation run
pub trait ClientFactory: Send + Sync {
    fn client(&self, config: &SinkConfig) -> Result<Box<dyn SearchClient>, ClientError>;
}

impl<F> ClientFactory for F
where
    F: Fn(&SinkConfig) -> Result<Box<dyn SearchClient>, ClientError> + Send + Sync,
{
    fn client(&self, config: &SinkConfig) -> Result<Box<dyn SearchClient>, ClientError> {
        self(config)
    }
}

/// A client that is closed when it goes out of scope
///
/// Close failures are logged and swallowed; they never reach the report.
pub struct ScopedClient {
    inner: Box<dyn SearchClient>,
}

impl ScopedClient {
    pub fn new(inner: Box<dyn SearchClient>) -> Self {
        Self { inner }
    }

    /// Acquire a client from `factory`
    pub fn acquire(factory: &dyn ClientFactory, config: &SinkConfig) -> Result<Self, ClientError> {
        factory.client(config).map(Self::new)
    }
}

impl Deref for ScopedClient {
    type Target = dyn SearchClient;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ScopedClient {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ScopedClient {
    fn drop(&mut self) {
        match self.inner.close() {
            Ok(()) => debug!("Search client closed"),
            Err(e) => warn!(error = %e, "Failed to close search client"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Closing {
        closed: Arc<AtomicUsize>,
        fail: bool,
    }

    impl SearchClient for Closing {
        fn ping(&self) -> Result<bool, ClientError> {
            Ok(true)
        }

        fn info(&self) -> Result<ServerInfo, ClientError> {
            Ok(ServerInfo::new("7.9.3"))
        }

        fn close(&mut self) -> Result<(), ClientError> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Other("already closed".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_closed_exactly_once_on_drop() {
        let closed = Arc::new(AtomicUsize::new(0));
        {
            let client = ScopedClient::new(Box::new(Closing {
                closed: closed.clone(),
                fail: false,
            }));
            assert!(client.ping().unwrap());
            assert_eq!(closed.load(Ordering::SeqCst), 0);
        }
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_failure_does_not_panic() {
        let closed = Arc::new(AtomicUsize::new(0));
        drop(ScopedClient::new(Box::new(Closing {
            closed: closed.clone(),
            fail: true,
        })));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closure_factory() {
        let raw = [("connection.url".to_string(), "http://localhost:9200".to_string())]
            .into_iter()
            .collect();
        let config = SinkConfig::parse(&raw).unwrap();
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = closed.clone();
        let factory = move |_: &SinkConfig| -> Result<Box<dyn SearchClient>, ClientError> {
            Ok(Box::new(Closing {
                closed: counter.clone(),
                fail: false,
            }))
        };

        let client = ScopedClient::acquire(&factory, &config).unwrap();
        assert_eq!(client.info().unwrap().version, "7.9.3");
        drop(client);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
