//! HTTP client for the agent endpoint that answers inline queries.

use crate::{AppError, AppResult};

use pointer_core::{
    CoreError, CoreResult,
    collaborators::{RemoteProcessor, RemoteReply},
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

/// Success body of the process-query endpoint.
#[derive(Debug, Deserialize)]
struct ProcessQueryReply {
    #[serde(default)]
    response: Option<String>,
}

/// Posts `{query, context}` to the configured endpoint.
///
/// No request timeout is set: the playback engine bounds the call.
#[derive(Debug, Clone)]
pub struct HttpRemoteProcessor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemoteProcessor {
    /// Create a processor posting to `endpoint`.
    #[track_caller]
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::HttpClient {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull the `response` field out of a success body, falling back to the raw
/// body when it is not the expected JSON.
pub(crate) fn extract_response(body: &str) -> String {
    match serde_json::from_str::<ProcessQueryReply>(body) {
        Ok(ProcessQueryReply {
            response: Some(text),
        }) => text,
        _ => body.to_string(),
    }
}

impl RemoteProcessor for HttpRemoteProcessor {
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint, query_len = query.len()))]
    async fn process(&self, query: &str) -> CoreResult<RemoteReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "context": {} }))
            .send()
            .await
            .map_err(|e| CoreError::RemoteCall {
                reason: format!("Network error: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CoreError::RemoteCall {
            reason: format!("Failed to read response body: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(status = status.as_u16(), body_len = body.len(), "Remote reply received");

        let body = if status.is_success() {
            extract_response(&body)
        } else {
            body
        };

        Ok(RemoteReply {
            status: status.as_u16(),
            body,
        })
    }
}
