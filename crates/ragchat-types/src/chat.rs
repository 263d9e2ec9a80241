//! Chat session, exchange, and history preview types.
//!
//! A `Session` is the conversation currently shown to the user. It owns an
//! ordered, append-only list of `Exchange`s (one user message paired with
//! the bot's reply) and carries the persisted theme preference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// Number of characters of the user's message shown in a history preview.
pub const PREVIEW_SNIPPET_CHARS: usize = 30;

/// Length of the random suffix in a generated chat id.
const CHAT_ID_SUFFIX_LEN: usize = 9;

/// Opaque identifier of a chat session.
///
/// Generated ids look like `chat_1718000000000_3f9a0c1de`: a millisecond
/// timestamp followed by nine random lowercase alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Generate a fresh chat id from the current time and random bits.
    pub fn generate() -> Self {
        // The tail of a v7 UUID is random; the head is the timestamp we already encode.
        let random = Uuid::now_v7().simple().to_string();
        let suffix = &random[random.len() - CHAT_ID_SUFFIX_LEN..];
        Self(format!("chat_{}_{suffix}", Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user message paired with the bot's reply.
///
/// Serialized with the field names `user`, `bot`, and `timestamp` so that
/// histories written by earlier clients load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(rename = "user")]
    pub user_text: String,
    #[serde(rename = "bot")]
    pub bot_text: String,
    pub timestamp: DateTime<Utc>,
}

/// The current chat conversation.
///
/// `exchanges` is in insertion order, which is also chronological order.
/// `dark_mode` is a process-wide preference and survives session replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: ChatId,
    pub exchanges: Vec<Exchange>,
    pub dark_mode: bool,
}

impl Session {
    /// Create an empty session with a freshly generated id.
    pub fn new(dark_mode: bool) -> Self {
        Self {
            id: ChatId::generate(),
            exchanges: Vec::new(),
            dark_mode,
        }
    }
}

/// Whether a reply is currently awaited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendState {
    #[default]
    Idle,
    Sending,
}

impl fmt::Display for SendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendState::Idle => write!(f, "idle"),
            SendState::Sending => write!(f, "sending"),
        }
    }
}

/// A single entry of the recent-chats list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPreview {
    /// Zero-based position in the exchange list.
    pub index: usize,
    /// Display label, `Chat <n>` with `n` starting at 1.
    pub label: String,
    /// Leading characters of the user's message, with `...` when cut.
    pub snippet: String,
}

impl HistoryPreview {
    pub fn from_exchange(index: usize, exchange: &Exchange) -> Self {
        let mut chars = exchange.user_text.chars();
        let mut snippet: String = chars.by_ref().take(PREVIEW_SNIPPET_CHARS).collect();
        if chars.next().is_some() {
            snippet.push_str("...");
        }

        Self {
            index,
            label: format!("Chat {}", index + 1),
            snippet,
        }
    }
}
