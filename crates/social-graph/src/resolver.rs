//! Handle to user id resolution
//!
//! Every graph endpoint is keyed by the numeric user id, so reads and
//! mutations that start from a handle go through one UserByScreenName
//! lookup first. Results are not cached.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ApiClient, ApiRequest};
use crate::encoder::encode_user_lookup;
use crate::error::{GraphError, Result};
use crate::types::{Profile, UserResult};
use crate::upstream::USER_BY_SCREEN_NAME_PATH;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    data: Option<LookupData>,
    #[serde(default)]
    errors: Vec<LookupError>,
}

#[derive(Debug, Deserialize)]
struct LookupError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LookupData {
    user: Option<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    result: Option<UserResult>,
}

/// Resolves handles through the UserByScreenName query
pub struct IdentityResolver<C: ?Sized> {
    client: Arc<C>,
    base_url: String,
}

impl<C: ?Sized> Clone for IdentityResolver<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: ApiClient + ?Sized> IdentityResolver<C> {
    pub fn new(client: Arc<C>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Resolve a handle to its numeric user id
    pub async fn resolve(&self, handle: &str) -> Result<String> {
        Ok(self.lookup(handle).await?.user_id)
    }

    /// Fetch the profile behind a handle
    ///
    /// Any failure, including a transport error, is reported as
    /// [`GraphError::Resolution`].
    pub async fn lookup(&self, handle: &str) -> Result<Profile> {
        let screen_name = handle.trim().trim_start_matches('@');
        if screen_name.is_empty() {
            return Err(GraphError::Resolution("handle is empty".to_string()));
        }

        let query = encode_user_lookup(screen_name)?;
        let request = ApiRequest::get(
            format!("{}{}", self.base_url, USER_BY_SCREEN_NAME_PATH),
            query.into_params(),
        );

        let body = self.client.send(request).await.map_err(|e| {
            warn!(handle = %screen_name, error = %e, "User lookup failed");
            GraphError::Resolution(format!("lookup of {screen_name} failed: {e}"))
        })?;

        let profile = profile_from_lookup(body, screen_name)?;
        debug!(handle = %screen_name, user_id = %profile.user_id, "Resolved handle");
        Ok(profile)
    }
}

fn profile_from_lookup(body: Value, screen_name: &str) -> Result<Profile> {
    let response: LookupResponse = serde_json::from_value(body).map_err(|e| {
        GraphError::Resolution(format!("malformed lookup response for {screen_name}: {e}"))
    })?;

    let result = response
        .data
        .and_then(|data| data.user)
        .and_then(|user| user.result);

    match result {
        Some(UserResult::User(user)) => Ok(Profile::from(user)),
        Some(UserResult::Unknown) | None => {
            let reason = response
                .errors
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_else(|| "not found".to_string());
            warn!(handle = %screen_name, reason = %reason, "Handle did not resolve");
            Err(GraphError::Resolution(format!("user {screen_name}: {reason}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{user_lookup, user_not_found, RecordingClient};
    use crate::upstream::DEFAULT_BASE_URL;
    use serde_json::json;

    fn resolver(
        client: RecordingClient,
    ) -> (IdentityResolver<RecordingClient>, Arc<RecordingClient>) {
        let client = Arc::new(client);
        (IdentityResolver::new(client.clone(), DEFAULT_BASE_URL), client)
    }

    #[tokio::test]
    async fn test_resolve_returns_rest_id() {
        let (resolver, client) =
            resolver(RecordingClient::new().respond(user_lookup("783214", "support")));

        let user_id = resolver.resolve("support").await.unwrap();
        assert_eq!(user_id, "783214");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::GET);
        assert!(requests[0].url.ends_with("/UserByScreenName"));
        let variables: Value =
            serde_json::from_str(requests[0].query_param("variables").unwrap()).unwrap();
        assert_eq!(variables["screen_name"], "support");
    }

    #[tokio::test]
    async fn test_leading_at_is_stripped() {
        let (resolver, client) =
            resolver(RecordingClient::new().respond(user_lookup("1", "alice")));

        resolver.resolve("@alice").await.unwrap();
        let variables: Value =
            serde_json::from_str(client.requests()[0].query_param("variables").unwrap()).unwrap();
        assert_eq!(variables["screen_name"], "alice");
    }

    #[tokio::test]
    async fn test_lookup_returns_profile() {
        let (resolver, _) = resolver(RecordingClient::new().respond(user_lookup("12", "jack")));

        let profile = resolver.lookup("jack").await.unwrap();
        assert_eq!(profile.username, "jack");
        assert_eq!(profile.biography.as_deref(), Some("bio"));
        assert_eq!(profile.tweets_count, 1000);
    }

    #[tokio::test]
    async fn test_empty_handle_sends_nothing() {
        let (resolver, client) = resolver(RecordingClient::new());

        let err = resolver.resolve("  ").await.unwrap_err();
        assert!(matches!(err, GraphError::Resolution(_)));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_handle() {
        let (resolver, _) = resolver(RecordingClient::new().respond(user_not_found()));

        let err = resolver.resolve("nobody_here").await.unwrap_err();
        match err {
            GraphError::Resolution(msg) => assert!(msg.contains("not found")),
            other => panic!("Expected resolution error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unavailable_user() {
        let body = json!({
            "data": { "user": { "result": { "__typename": "UserUnavailable", "reason": "Suspended" } } }
        });
        let (resolver, _) = resolver(RecordingClient::new().respond(body));

        assert!(matches!(
            resolver.resolve("suspended").await,
            Err(GraphError::Resolution(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_resolution_error() {
        let (resolver, _) = resolver(RecordingClient::new().fail(503));

        match resolver.resolve("alice").await {
            Err(GraphError::Resolution(msg)) => assert!(msg.contains("503")),
            other => panic!("Expected resolution error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_kept() {
        let body = json!({ "errors": [{ "message": "Not found", "code": 50 }] });
        let (resolver, _) = resolver(RecordingClient::new().respond(body));

        match resolver.resolve("alice").await {
            Err(GraphError::Resolution(msg)) => assert_eq!(msg, "user alice: Not found"),
            other => panic!("Expected resolution error, got {:?}", other),
        }
    }
}
