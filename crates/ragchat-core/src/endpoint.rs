//! ChatEndpoint trait definition.
//!
//! The remote service that computes a bot reply for a user message.
//! Implementations live in ragchat-infra (e.g., `HttpChatEndpoint`).

use ragchat_types::error::EndpointError;
use ragchat_types::wire::{ChatReply, ChatRequest};

/// Trait for the remote chat endpoint.
///
/// Returns the decoded reply whatever its status; interpreting the status
/// is the session's job. `Err` is reserved for transport and decoding
/// failures.
pub trait ChatEndpoint: Send + Sync {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, EndpointError>> + Send;
}
