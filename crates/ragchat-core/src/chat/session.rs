//! Chat session manager.
//!
//! `ChatSession` owns the current `Session` and mediates between user input,
//! the remote endpoint, local storage, and the renderer. Sending is split in
//! two phases: `begin_send` shows the user's message optimistically and
//! `finish_send` turns the endpoint outcome into a confirmed `Exchange` or a
//! generic failure. `send_message` composes both around the endpoint call.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use ragchat_types::chat::{ChatId, Exchange, HistoryPreview, SendState, Session};
use ragchat_types::error::{EndpointError, RestoreError, SendError};
use ragchat_types::wire::{ChatReply, ChatRequest};

use crate::endpoint::ChatEndpoint;
use crate::render::{ChatRenderer, RenderEvent};
use crate::storage::kv_store::{HISTORY_KEY, KvStore, THEME_KEY};

/// Welcome message shown at startup and on every new chat.
pub const GREETING: &str = "Hello! I'm your AI assistant powered by a RAG (Retrieval-Augmented \
Generation) system. I can help you with questions based on the documents in my knowledge base. \
How can I assist you today?";

/// The only failure text the user ever sees.
pub const FAILURE_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// What caused an autosave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveTrigger {
    /// Periodic timer. Skipped while the history is empty.
    Tick,
    /// The user stepped away from the chat.
    VisibilityLost,
    /// The process is shutting down.
    Teardown,
}

/// A message that has been shown but not yet answered.
///
/// Produced by [`ChatSession::begin_send`] and consumed exactly once by
/// [`ChatSession::finish_send`].
#[derive(Debug, PartialEq, Eq)]
pub struct PendingSend {
    text: String,
    started_at: DateTime<Utc>,
}

impl PendingSend {
    /// The trimmed message text that will be sent.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The request body for this message.
    pub fn request(&self) -> ChatRequest {
        ChatRequest::new(self.text.clone())
    }
}

/// Manages the active chat session and its collaborators.
///
/// Generic over the endpoint, store, and renderer so the core never
/// depends on HTTP, SQLite, or the terminal.
pub struct ChatSession<E: ChatEndpoint, S: KvStore, R: ChatRenderer> {
    session: Session,
    /// Sends begun but not yet finished.
    in_flight: usize,
    endpoint: E,
    store: S,
    renderer: R,
}

impl<E: ChatEndpoint, S: KvStore, R: ChatRenderer> ChatSession<E, S, R> {
    /// Create a manager around a fresh, empty, light-mode session.
    ///
    /// Call [`restore`](Self::restore) to load persisted state.
    pub fn new(endpoint: E, store: S, renderer: R) -> Self {
        Self {
            session: Session::new(false),
            in_flight: 0,
            endpoint,
            store,
            renderer,
        }
    }

    pub fn id(&self) -> &ChatId {
        &self.session.id
    }

    /// Exchanges in insertion order.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.session.exchanges
    }

    pub fn dark_mode(&self) -> bool {
        self.session.dark_mode
    }

    pub fn send_state(&self) -> SendState {
        if self.in_flight > 0 {
            SendState::Sending
        } else {
            SendState::Idle
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Recent-chats entries for the current exchanges.
    pub fn history_previews(&self) -> Vec<HistoryPreview> {
        self.session
            .exchanges
            .iter()
            .enumerate()
            .map(|(index, exchange)| HistoryPreview::from_exchange(index, exchange))
            .collect()
    }

    // --- Session lifecycle ---

    /// Show the canned welcome message.
    pub fn greet(&self) {
        self.renderer.render(RenderEvent::Greeting(GREETING.to_string()));
    }

    /// Replace the session with an empty one under a new id.
    ///
    /// The theme preference carries over.
    pub fn start_new(&mut self) -> &Session {
        let previous = self.session.id.clone();
        let mut id = ChatId::generate();
        while id == previous {
            id = ChatId::generate();
        }

        self.session = Session {
            id,
            exchanges: Vec::new(),
            dark_mode: self.session.dark_mode,
        };
        info!(chat_id = %self.session.id, previous = %previous, "Started new chat");

        self.renderer.render(RenderEvent::TranscriptCleared);
        self.greet();
        self.render_history();
        &self.session
    }

    // --- Sending ---

    /// Show the user's message and mark the session as awaiting a reply.
    ///
    /// Returns `None` for empty or whitespace-only input; nothing is
    /// rendered in that case.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.renderer
            .render(RenderEvent::UserMessage(trimmed.to_string()));
        if self.in_flight == 0 {
            self.renderer.render(RenderEvent::TypingStarted);
        }
        self.in_flight += 1;

        Some(PendingSend {
            text: trimmed.to_string(),
            started_at: Utc::now(),
        })
    }

    /// Resolve a pending send with the endpoint's outcome.
    ///
    /// On success the exchange is appended and returned. Any failure shows
    /// [`FAILURE_MESSAGE`], logs the cause, and appends nothing.
    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        outcome: Result<ChatReply, EndpointError>,
    ) -> Result<Exchange, SendError> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.renderer.render(RenderEvent::TypingStopped);
        }

        let elapsed_ms = (Utc::now() - pending.started_at).num_milliseconds();
        let bot_text = match outcome.and_then(ChatReply::into_response) {
            Ok(text) => text,
            Err(err) => {
                warn!(chat_id = %self.session.id, error = %err, elapsed_ms, "Chat request failed");
                self.renderer
                    .render(RenderEvent::Error(FAILURE_MESSAGE.to_string()));
                return Err(SendError::Failed);
            }
        };

        self.renderer
            .render(RenderEvent::BotMessage(bot_text.clone()));

        let exchange = Exchange {
            user_text: pending.text,
            bot_text,
            timestamp: Utc::now(),
        };
        self.session.exchanges.push(exchange.clone());
        debug!(
            chat_id = %self.session.id,
            exchanges = self.session.exchanges.len(),
            elapsed_ms,
            "Exchange appended"
        );

        self.render_history();
        Ok(exchange)
    }

    /// Send a message and wait for the reply.
    ///
    /// `Ok(None)` means the input was blank and nothing happened.
    pub async fn send_message(&mut self, text: &str) -> Result<Option<Exchange>, SendError> {
        let Some(pending) = self.begin_send(text) else {
            return Ok(None);
        };

        let outcome = self.endpoint.send(&pending.request()).await;
        self.finish_send(pending, outcome).map(Some)
    }

    // --- History ---

    /// Look up a past exchange by its history index and show it.
    pub fn load_chat(&self, index: usize) -> Option<&Exchange> {
        let exchange = self.session.exchanges.get(index);
        match exchange {
            Some(exchange) => {
                debug!(index, "Loading chat from history");
                self.renderer.render(RenderEvent::ExchangeShown {
                    index,
                    exchange: exchange.clone(),
                });
            }
            None => debug!(index, "No chat at history index"),
        }
        exchange
    }

    fn render_history(&self) {
        self.renderer
            .render(RenderEvent::HistoryChanged(self.history_previews()));
    }

    // --- Persistence ---

    /// Write the exchange history to storage, replacing what was there.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn persist(&self) {
        let payload = match serde_json::to_string(&self.session.exchanges) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "Failed to serialize chat history");
                return;
            }
        };

        match self.store.set(HISTORY_KEY, &payload).await {
            Ok(()) => debug!(
                exchanges = self.session.exchanges.len(),
                "Chat history persisted"
            ),
            Err(err) => warn!(error = %err, "Failed to persist chat history"),
        }
    }

    /// Autosave entry point. Returns whether a write was attempted.
    pub async fn persist_on(&self, trigger: AutosaveTrigger) -> bool {
        if trigger == AutosaveTrigger::Tick && self.session.exchanges.is_empty() {
            return false;
        }

        debug!(?trigger, "Autosaving chat history");
        self.persist().await;
        true
    }

    /// Load the persisted history and theme preference into the session.
    ///
    /// Missing history means an empty session. Unreadable or malformed
    /// history is discarded with a warning.
    pub async fn restore(&mut self) -> &Session {
        self.session.dark_mode = self.load_theme().await;

        self.session.exchanges = match self.load_history().await {
            Ok(exchanges) => exchanges,
            Err(err) => {
                warn!(error = %err, "Discarding stored chat history");
                Vec::new()
            }
        };
        info!(
            chat_id = %self.session.id,
            exchanges = self.session.exchanges.len(),
            dark_mode = self.session.dark_mode,
            "Session restored"
        );

        self.renderer.render(RenderEvent::ThemeChanged {
            dark_mode: self.session.dark_mode,
        });
        self.render_history();
        &self.session
    }

    async fn load_history(&self) -> Result<Vec<Exchange>, RestoreError> {
        match self.store.get(HISTORY_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| RestoreError::Parse(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn load_theme(&self) -> bool {
        match self.store.get(THEME_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(error = %err, "Failed to read theme preference");
                false
            }
        }
    }

    // --- Theme ---

    /// Flip the theme, persist the preference, and return the new value.
    pub async fn toggle_theme(&mut self) -> bool {
        self.session.dark_mode = !self.session.dark_mode;
        let dark_mode = self.session.dark_mode;

        let value = if dark_mode { "true" } else { "false" };
        if let Err(err) = self.store.set(THEME_KEY, value).await {
            warn!(error = %err, "Failed to persist theme preference");
        }

        self.renderer.render(RenderEvent::ThemeChanged { dark_mode });
        dark_mode
    }
}
