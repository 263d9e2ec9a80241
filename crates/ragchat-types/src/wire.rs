//! Request and reply bodies exchanged with the remote chat endpoint.
//!
//! The endpoint accepts `{"message": "..."}` and answers with
//! `{"status": "success", "response": "..."}` on success. Failures carry
//! `"status": "error"` and an `error` string, and the backend's input
//! validation answers with only an `error` field.

use serde::{Deserialize, Serialize};

use crate::error::EndpointError;

/// Status value the endpoint uses to signal a usable reply.
pub const STATUS_SUCCESS: &str = "success";

/// Body of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    /// A successful reply carrying `response`.
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            response: Some(response.into()),
            error: None,
        }
    }

    /// A failed reply with the given status and error text.
    pub fn failure(status: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            response: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    /// Extract the bot's reply text.
    ///
    /// Anything other than a success status with a response string is an error.
    pub fn into_response(self) -> Result<String, EndpointError> {
        if !self.is_success() {
            return Err(EndpointError::Rejected {
                status: self.status.unwrap_or_else(|| "missing".to_string()),
                message: self.error.unwrap_or_default(),
            });
        }

        self.response
            .ok_or_else(|| EndpointError::Decode("success reply without a response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialize() {
        let json = serde_json::to_string(&ChatRequest::new("Hello")).unwrap();
        assert_eq!(json, r#"{"message":"Hello"}"#);
    }

    #[test]
    fn test_success_reply_into_response() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"Hi there","status":"success"}"#).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.into_response().unwrap(), "Hi there");
    }

    #[test]
    fn test_error_status_is_rejected() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"error":"An error occurred: boom","status":"error"}"#,
        )
        .unwrap();
        match reply.into_response() {
            Err(EndpointError::Rejected { status, message }) => {
                assert_eq!(status, "error");
                assert!(message.contains("boom"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let reply: ChatReply = serde_json::from_str(r#"{"error":"Empty message"}"#).unwrap();
        assert!(!reply.is_success());
        assert!(matches!(
            reply.into_response(),
            Err(EndpointError::Rejected { .. })
        ));
    }

    #[test]
    fn test_success_without_response_is_decode_error() {
        let reply: ChatReply = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(reply.into_response(), Err(EndpointError::Decode(_))));
    }

    #[test]
    fn test_failure_constructor_omits_response() {
        let json = serde_json::to_string(&ChatReply::failure("error", "nope")).unwrap();
        assert!(!json.contains("response"));
        assert!(json.contains("\"status\":\"error\""));
    }
}
