//! Render collaborator contract.
//!
//! The session reports every visible state transition as a `RenderEvent`.
//! It never reads rendering state back.

use ragchat_types::chat::{Exchange, HistoryPreview};

/// A visible state transition of the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The transcript was wiped (new chat).
    TranscriptCleared,
    /// The canned welcome message.
    Greeting(String),
    /// The user's message, shown before the endpoint has answered.
    UserMessage(String),
    /// A reply is being awaited.
    TypingStarted,
    /// No reply is awaited anymore.
    TypingStopped,
    /// The bot's confirmed reply.
    BotMessage(String),
    /// A user-facing failure message.
    Error(String),
    ThemeChanged { dark_mode: bool },
    /// The recent-chats list changed.
    HistoryChanged(Vec<HistoryPreview>),
    /// A past exchange was selected from the history list.
    ExchangeShown { index: usize, exchange: Exchange },
}

/// Trait for anything that can display chat state transitions.
pub trait ChatRenderer: Send + Sync {
    fn render(&self, event: RenderEvent);
}

/// Renderer that discards every event (headless and JSON output modes).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl ChatRenderer for NullRenderer {
    fn render(&self, _event: RenderEvent) {}
}
