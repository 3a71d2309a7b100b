//! Error types for the social graph client

use std::fmt;

/// Failures surfaced by an [`ApiClient`](crate::ApiClient) implementation
#[derive(Debug)]
pub enum TransportError {
    /// Request could not be sent or the connection failed
    Http(Box<reqwest::Error>),
    /// Upstream answered with a non-success status
    Status { status: u16, body: String },
    /// Response body was not valid JSON
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(err) => write!(f, "HTTP error: {}", err),
            TransportError::Status { status, body } => {
                write!(f, "upstream returned status {}: {}", status, body)
            }
            TransportError::Decode(msg) => write!(f, "response decode error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(Box::new(err))
    }
}

/// Errors returned by graph reads and mutations
#[derive(Debug)]
pub enum GraphError {
    /// Handle could not be resolved to a user id
    Resolution(String),
    /// Request failed in the transport layer
    Transport(TransportError),
    /// Response did not have the expected timeline shape
    Parse(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::Resolution(msg) => write!(f, "Resolution error: {}", msg),
            GraphError::Transport(err) => write!(f, "Transport error: {}", err),
            GraphError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for GraphError {
    fn from(err: TransportError) -> Self {
        GraphError::Transport(err)
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
