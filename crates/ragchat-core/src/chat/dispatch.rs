//! UI event dispatch.
//!
//! Front ends translate their native input (key presses, timers, signals)
//! into named `UiEvent`s and hand them to [`dispatch`], which calls the
//! matching `ChatSession` operation.

use std::fmt;

use tracing::debug;

use ragchat_types::chat::{ChatId, Exchange};

use crate::endpoint::ChatEndpoint;
use crate::render::ChatRenderer;
use crate::storage::kv_store::KvStore;

use super::session::{AutosaveTrigger, ChatSession};

/// A discrete input to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Send(String),
    NewChat,
    ToggleTheme,
    /// Show the exchange at this zero-based history index.
    LoadChat(usize),
    AutosaveTick,
    VisibilityLost,
    Teardown,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Send(_) => "send",
            UiEvent::NewChat => "new_chat",
            UiEvent::ToggleTheme => "toggle_theme",
            UiEvent::LoadChat(_) => "load_chat",
            UiEvent::AutosaveTick => "autosave_tick",
            UiEvent::VisibilityLost => "visibility_lost",
            UiEvent::Teardown => "teardown",
        }
    }
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent(Exchange),
    SendFailed,
    /// Blank input; nothing happened.
    Ignored,
    NewChat(ChatId),
    ThemeChanged { dark_mode: bool },
    ChatLoaded(Option<Exchange>),
    Persisted,
    PersistSkipped,
}

/// Route one UI event to the session.
pub async fn dispatch<E, S, R>(session: &mut ChatSession<E, S, R>, event: UiEvent) -> DispatchOutcome
where
    E: ChatEndpoint,
    S: KvStore,
    R: ChatRenderer,
{
    debug!(event = event.name(), "Dispatching UI event");

    match event {
        UiEvent::Send(text) => match session.send_message(&text).await {
            Ok(Some(exchange)) => DispatchOutcome::Sent(exchange),
            Ok(None) => DispatchOutcome::Ignored,
            Err(_) => DispatchOutcome::SendFailed,
        },
        UiEvent::NewChat => DispatchOutcome::NewChat(session.start_new().id.clone()),
        UiEvent::ToggleTheme => DispatchOutcome::ThemeChanged {
            dark_mode: session.toggle_theme().await,
        },
        UiEvent::LoadChat(index) => DispatchOutcome::ChatLoaded(session.load_chat(index).cloned()),
        UiEvent::AutosaveTick => persist(session, AutosaveTrigger::Tick).await,
        UiEvent::VisibilityLost => persist(session, AutosaveTrigger::VisibilityLost).await,
        UiEvent::Teardown => persist(session, AutosaveTrigger::Teardown).await,
    }
}

async fn persist<E, S, R>(session: &ChatSession<E, S, R>, trigger: AutosaveTrigger) -> DispatchOutcome
where
    E: ChatEndpoint,
    S: KvStore,
    R: ChatRenderer,
{
    if session.persist_on(trigger).await {
        DispatchOutcome::Persisted
    } else {
        DispatchOutcome::PersistSkipped
    }
}
