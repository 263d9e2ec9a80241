//! HttpChatEndpoint -- concrete [`ChatEndpoint`] over JSON/HTTP.
//!
//! Posts `{"message": ...}` to the configured URL and decodes the JSON
//! reply. The backend answers validation and internal errors with 4xx/5xx
//! statuses but still a JSON body, so the body is decoded whatever the
//! status; only a non-JSON error body becomes [`EndpointError::Http`].

use std::time::Duration;

use tracing::debug;

use ragchat_core::endpoint::ChatEndpoint;
use ragchat_types::error::EndpointError;
use ragchat_types::wire::{ChatReply, ChatRequest};

/// Maximum number of body bytes quoted in an HTTP error.
const ERROR_BODY_PREVIEW: usize = 200;

/// JSON-over-HTTP chat endpoint client.
#[derive(Debug, Clone)]
pub struct HttpChatEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpChatEndpoint {
    /// Create a client for `url` with the given per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, EndpointError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EndpointError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl ChatEndpoint for HttpChatEndpoint {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, EndpointError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| EndpointError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EndpointError::Transport(format!("failed to read reply body: {e}")))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Chat endpoint replied");

        match serde_json::from_str::<ChatReply>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(EndpointError::Http {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
            }),
            Err(e) => Err(EndpointError::Decode(format!("failed to parse reply: {e}"))),
        }
    }
}
