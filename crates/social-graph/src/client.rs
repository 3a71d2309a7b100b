//! Transport seam
//!
//! [`ApiClient`] is what the graph operations need from the outside world:
//! send one request, get back the decoded JSON body. [`HttpApiClient`] is a
//! plain reqwest implementation that injects static credentials.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
}

/// A single upstream request, before auth injection
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query,
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            body: RequestBody::Form(form),
            headers: Vec::new(),
        }
    }

    /// Value of a query parameter, if present
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Sends requests to the upstream service and decodes the JSON response
///
/// Implementations own authentication, connection reuse, timeouts and any
/// retry policy. Graph operations call `send` exactly once per upstream
/// round trip.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

/// Logged-in web session cookies
#[derive(Clone)]
pub struct Session {
    pub auth_token: String,
    /// `ct0` cookie, echoed back in the `x-csrf-token` header
    pub csrf_token: String,
}

/// Static credentials injected into every request
#[derive(Clone)]
pub struct Credentials {
    pub bearer_token: String,
    pub session: Option<Session>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &"<redacted>")
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// reqwest-backed [`ApiClient`]
pub struct HttpApiClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl HttpApiClient {
    /// Create a client with the default 30 second timeout
    pub fn new(credentials: Credentials) -> Result<Self, TransportError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, credentials })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .bearer_auth(&self.credentials.bearer_token)
            .header("x-twitter-active-user", "yes");

        match &self.credentials.session {
            Some(session) => builder
                .header(
                    COOKIE,
                    format!("auth_token={}; ct0={}", session.auth_token, session.csrf_token),
                )
                .header("x-csrf-token", session.csrf_token.as_str())
                .header("x-twitter-auth-type", "OAuth2Session"),
            None => builder,
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut builder = self.authorize(self.http.request(request.method.clone(), &request.url));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let RequestBody::Form(pairs) = &request.body {
            builder = builder.form(pairs);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            bytes = text.len(),
            "Upstream response"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
