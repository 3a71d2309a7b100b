use std::time::Duration;

use social_graph::upstream::DEFAULT_BASE_URL;
use social_graph::{Credentials, Session};
use url::Url;

use crate::error::{CliError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bearer_token = var("SOCIAL_GRAPH_BEARER_TOKEN")
            .ok_or_else(|| CliError::Config("SOCIAL_GRAPH_BEARER_TOKEN is not set".to_string()))?;

        let session = match (var("SOCIAL_GRAPH_AUTH_TOKEN"), var("SOCIAL_GRAPH_CSRF_TOKEN")) {
            (Some(auth_token), Some(csrf_token)) => Some(Session {
                auth_token,
                csrf_token,
            }),
            (None, None) => None,
            _ => {
                return Err(CliError::Config(
                    "SOCIAL_GRAPH_AUTH_TOKEN and SOCIAL_GRAPH_CSRF_TOKEN must be set together"
                        .to_string(),
                ))
            }
        };

        let base_url = var("SOCIAL_GRAPH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&base_url)
            .map_err(|e| CliError::Config(format!("invalid SOCIAL_GRAPH_BASE_URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CliError::Config(format!(
                "SOCIAL_GRAPH_BASE_URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        let timeout_secs = match var("SOCIAL_GRAPH_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| CliError::Config(format!("invalid SOCIAL_GRAPH_TIMEOUT_SECS: {raw}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials: Credentials {
                bearer_token,
                session,
            },
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
