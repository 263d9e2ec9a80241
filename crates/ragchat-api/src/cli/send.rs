//! One-shot send: `ragchat send <message>`.
//!
//! Restores the stored session, sends one message, and persists the result
//! the same way the interactive loop does on exit.

use anyhow::Result;

use ragchat_core::chat::dispatch::{DispatchOutcome, UiEvent, dispatch};
use ragchat_core::chat::session::FAILURE_MESSAGE;
use ragchat_core::render::{ChatRenderer, NullRenderer};

use super::chat::renderer::TerminalRenderer;
use crate::state::{AppSession, AppState};

/// Send `message` and print the reply.
///
/// Returns `false` only when a real send failed. Blank input is a no-op:
/// nothing is sent or printed.
///
/// # Examples
///
/// ```bash
/// ragchat send "What does the handbook say about leave?"
/// ragchat send "Summarize chapter 2" --json
/// ```
pub async fn send_message(state: &AppState, message: &str, json: bool) -> Result<bool> {
    if json {
        let mut session = state.open_session(NullRenderer).await?;
        let outcome = exchange_once(&mut session, message).await;

        let body = match &outcome {
            DispatchOutcome::Sent(exchange) => serde_json::json!({
                "status": "success",
                "chat_id": session.id(),
                "exchange": exchange,
            }),
            DispatchOutcome::SendFailed => serde_json::json!({
                "status": "error",
                "error": FAILURE_MESSAGE,
            }),
            _ => return Ok(true),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(outcome != DispatchOutcome::SendFailed);
    }

    let mut session = state.open_session(TerminalRenderer::one_shot()).await?;
    let outcome = exchange_once(&mut session, message).await;
    Ok(outcome != DispatchOutcome::SendFailed)
}

/// Send, then persist as on teardown.
async fn exchange_once<R: ChatRenderer>(session: &mut AppSession<R>, message: &str) -> DispatchOutcome {
    let outcome = dispatch(session, UiEvent::Send(message.to_string())).await;
    dispatch(session, UiEvent::Teardown).await;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use ragchat_core::storage::kv_store::{HISTORY_KEY, KvStore};
    use ragchat_types::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn state_for(server: &MockServer) -> AppState {
        let config = ClientConfig {
            endpoint_url: format!("{}/chat", server.uri()),
            ..ClientConfig::default()
        };
        AppState::init(config, PathBuf::from("unused"), true)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_success_persists_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "Hi there", "status": "success"})),
            )
            .mount(&server)
            .await;
        let state = state_for(&server).await;

        assert!(send_message(&state, "Hello", true).await.unwrap());

        let stored = state.store.get(HISTORY_KEY).await.unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored[0]["user"], "Hello");
        assert_eq!(stored[0]["bot"], "Hi there");
    }

    #[tokio::test]
    async fn test_send_appends_to_restored_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "ok", "status": "success"})),
            )
            .mount(&server)
            .await;
        let state = state_for(&server).await;

        send_message(&state, "first", true).await.unwrap();
        send_message(&state, "second", true).await.unwrap();

        let stored = state.store.get(HISTORY_KEY).await.unwrap().unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1]["user"], "second");
    }

    #[tokio::test]
    async fn test_send_failure_reports_undelivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "boom", "status": "error"})),
            )
            .mount(&server)
            .await;
        let state = state_for(&server).await;

        assert!(!send_message(&state, "Hello", true).await.unwrap());
        assert_eq!(
            state.store.get(HISTORY_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_blank_message_is_silent_noop() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let state = state_for(&server).await;

        assert!(send_message(&state, "   ", true).await.unwrap());
        assert!(send_message(&state, "", false).await.unwrap());
        assert_eq!(
            state.store.get(HISTORY_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
