//! Recording fake of [`ApiClient`] for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{ApiClient, ApiRequest};
use crate::error::TransportError;

/// Answers from a queue of canned responses and keeps every request it saw
#[derive(Default)]
pub(crate) struct RecordingClient {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    pub(crate) fn fail(self, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Status {
                status,
                body: "upstream failure".to_string(),
            }));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for RecordingClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Decode("no canned response".to_string())))
    }
}

/// UserByScreenName response for a found user
pub(crate) fn user_lookup(id: &str, screen_name: &str) -> Value {
    json!({
        "data": {
            "user": {
                "result": {
                    "__typename": "User",
                    "id": "VXNlcjox",
                    "rest_id": id,
                    "is_blue_verified": true,
                    "legacy": {
                        "screen_name": screen_name,
                        "name": "Display Name",
                        "description": "bio",
                        "followers_count": 100,
                        "friends_count": 10,
                        "statuses_count": 1000,
                        "created_at": "Tue Feb 20 14:35:54 +0000 2007"
                    }
                }
            }
        }
    })
}

/// UserByScreenName response for an unknown handle
pub(crate) fn user_not_found() -> Value {
    json!({ "data": {} })
}
