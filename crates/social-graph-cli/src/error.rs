//! Error types for the command line front end

use std::fmt;

use social_graph::{GraphError, TransportError};

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Graph(GraphError),
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Graph(err) => write!(f, "{}", err),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Graph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GraphError> for CliError {
    fn from(err: GraphError) -> Self {
        CliError::Graph(err)
    }
}

impl From<TransportError> for CliError {
    fn from(err: TransportError) -> Self {
        CliError::Graph(GraphError::Transport(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
