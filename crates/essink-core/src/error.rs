//! Error types for the Essink core library
//!
//! The validator itself never fails: every problem it finds becomes a report
//! entry. These errors cover the fallible edges around it, such as loading
//! raw properties from disk, or a server version that cannot be compared.

use crate::version::VersionError;
use essink_schemas::ParseErrors;
use thiserror::Error;

/// Main error type for Essink operations
#[derive(Error, Debug)]
pub enum Error {
    /// Raw properties could not be turned into a typed configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A version string could not be compared against a minimum
    #[error(transparent)]
    Version(#[from] VersionError),

    /// JSON parsing errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<ParseErrors> for Error {
    fn from(errors: ParseErrors) -> Self {
        Error::Configuration {
            message: format!("{} invalid properties", errors.len()),
            source: Some(anyhow::Error::new(errors)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use essink_schemas::ParseError;
    use std::error::Error as _;

    #[test]
    fn test_parse_errors_keep_their_source() {
        let err: Error = ParseErrors::from(ParseError::missing("connection.url")).into();
        assert_eq!(err.to_string(), "Configuration error: 1 invalid properties");
        let source = err.source().unwrap().to_string();
        assert!(source.contains("connection.url"));
    }

    #[test]
    fn test_version_error_is_transparent() {
        let err: Error = VersionError::InvalidSegment {
            version: "x.1".to_string(),
            segment: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid version segment 'x' in 'x.1'");
    }
}
