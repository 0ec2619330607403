//! Search client error classification
//!
//! Client failures are split into explicit status answers from the service
//! and transport problems that never produced an answer. Only the former can
//! mean "reachable but not allowed".

use serde::Serialize;
use thiserror::Error;

/// Failure reported by a [`SearchClient`](super::SearchClient) or its factory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The service answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connect, timeout or other I/O failure
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a client failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClassification {
    /// 401 / 403
    AuthenticationError,
    /// Other 4xx
    ClientError,
    /// 5xx
    ServerError,
    NetworkError,
    Unknown,
}

impl ClientError {
    pub fn status<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service exists but refused the caller
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Underlying message, possibly empty
    pub fn detail(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::Transport(message) | Self::Other(message) => message,
        }
    }

    pub fn classification(&self) -> ErrorClassification {
        match self {
            Self::Status { status, .. } => match status {
                401 | 403 => ErrorClassification::AuthenticationError,
                400..=499 => ErrorClassification::ClientError,
                500..=599 => ErrorClassification::ServerError,
                _ => ErrorClassification::Unknown,
            },
            Self::Transport(_) => ErrorClassification::NetworkError,
            Self::Other(_) => ErrorClassification::Unknown,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::status(status.as_u16(), error.to_string());
        }
        if error.is_timeout() || error.is_connect() || error.is_request() {
            Self::Transport(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}
