//! Main chat loop orchestration.
//!
//! The loop owns the session and is its only mutator. It multiplexes three
//! sources with `tokio::select!`: lines typed by the user, autosave ticks,
//! and replies coming back from request tasks. A send shows the user's
//! message at once (`begin_send`), runs the HTTP request in a spawned task,
//! and applies the reply when it arrives (`finish_send`), so the prompt
//! stays usable while the assistant is typing.

use console::style;
use tokio::sync::mpsc;
use tracing::{debug, info};

use ragchat_core::chat::autosave::AutosaveTimer;
use ragchat_core::chat::dispatch::{DispatchOutcome, UiEvent, dispatch};
use ragchat_core::chat::session::PendingSend;
use ragchat_core::endpoint::ChatEndpoint;
use ragchat_observe::tracing_setup::{redirect_logs, restore_log_output};
use ragchat_types::chat::SendState;
use ragchat_types::error::EndpointError;
use ragchat_types::wire::ChatReply;

use crate::cli::theme::theme_name;
use crate::state::{AppSession, AppState};

use super::banner::welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::TerminalRenderer;

type ChatLoopSession = AppSession<TerminalRenderer>;

/// A finished request, handed back to the loop.
type Reply = (PendingSend, Result<ChatReply, EndpointError>);

/// Capacity of the autosave and reply channels.
const CHANNEL_CAPACITY: usize = 16;

/// What the loop does after a command.
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive chat loop until Ctrl+D or `/exit`.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    // Log lines go above the prompt while the line editor owns the terminal.
    redirect_logs(writer.clone());

    let result = chat(state, &mut input, writer).await;

    restore_log_output();
    input.close();
    result
}

/// The loop proper; the session and its copy of `writer` are dropped on return.
async fn chat(
    state: &AppState,
    input: &mut ChatInput,
    writer: rustyline_async::SharedWriter,
) -> anyhow::Result<()> {
    let mut session = state
        .open_session(TerminalRenderer::interactive(writer))
        .await?;
    session.renderer().write_block(&welcome_banner(
        &state.config.endpoint_url,
        session.id().as_str(),
        session.exchanges().len(),
    ));
    session.greet();

    let (events_tx, mut events_rx) = mpsc::channel::<UiEvent>(CHANNEL_CAPACITY);
    let (replies_tx, mut replies_rx) = mpsc::channel::<Reply>(CHANNEL_CAPACITY);
    let autosave = AutosaveTimer::spawn(state.config.autosave_interval(), events_tx);
    info!(chat_id = %session.id(), "Chat loop started");

    loop {
        tokio::select! {
            Some(event) = events_rx.recv() => {
                dispatch(&mut session, event).await;
            }
            Some((pending, outcome)) = replies_rx.recv() => {
                let _ = session.finish_send(pending, outcome);
            }
            event = input.read_line() => match event {
                InputEvent::Eof => break,
                InputEvent::Interrupted => {
                    dispatch(&mut session, UiEvent::VisibilityLost).await;
                    note(&session, "History saved. Press Ctrl+D to exit, or keep chatting.");
                }
                InputEvent::Message(text) => {
                    if text.is_empty() {
                        continue;
                    }

                    if let Some(cmd) = commands::parse(&text) {
                        match run_command(&mut session, input, cmd).await {
                            Flow::Continue => continue,
                            Flow::Exit => break,
                        }
                    }

                    input.remember(text.clone());
                    if let Some(pending) = session.begin_send(&text) {
                        spawn_request(&session, pending, replies_tx.clone());
                    }
                }
            }
        }
    }

    autosave.shutdown().await;
    if session.send_state() == SendState::Sending {
        info!("Exiting with a reply still pending; it will not be saved");
    }
    dispatch(&mut session, UiEvent::Teardown).await;
    note(&session, "Session ended.");
    Ok(())
}

/// Run the endpoint request off the loop and post the outcome back.
fn spawn_request(session: &ChatLoopSession, pending: PendingSend, replies: mpsc::Sender<Reply>) {
    let endpoint = session.endpoint().clone();
    tokio::spawn(async move {
        let outcome = endpoint.send(&pending.request()).await;
        if replies.send((pending, outcome)).await.is_err() {
            debug!("Chat loop gone, dropping reply");
        }
    });
}

async fn run_command(session: &mut ChatLoopSession, input: &mut ChatInput, cmd: ChatCommand) -> Flow {
    match cmd {
        ChatCommand::Help => session.renderer().write_block(&commands::help_text()),
        ChatCommand::Clear => input.clear(),
        ChatCommand::Exit => return Flow::Exit,
        ChatCommand::New => {
            dispatch(session, UiEvent::NewChat).await;
        }
        ChatCommand::Theme => {
            if let DispatchOutcome::ThemeChanged { dark_mode } =
                dispatch(session, UiEvent::ToggleTheme).await
            {
                note(session, &format!("Theme switched to {}.", theme_name(dark_mode)));
            }
        }
        ChatCommand::History => {
            let previews = session.history_previews();
            if previews.is_empty() {
                note(session, "No chats yet.");
            } else {
                let mut listing = String::from("\n");
                for preview in previews.iter().rev() {
                    listing.push_str(&format!(
                        "  {}  {}\n",
                        style(&preview.label).cyan().bold(),
                        preview.snippet
                    ));
                }
                listing.push('\n');
                session.renderer().write_block(&listing);
            }
        }
        ChatCommand::Show(number) => {
            if let DispatchOutcome::ChatLoaded(None) =
                dispatch(session, UiEvent::LoadChat(number - 1)).await
            {
                note(session, &format!("There is no Chat {number}. See /history."));
            }
        }
        ChatCommand::Unknown(name) => {
            session.renderer().write_block(&format!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n\n",
                style("?").yellow().bold(),
                style(name).dim()
            ));
        }
    }
    Flow::Continue
}

/// Print a dim one-line status note.
fn note(session: &ChatLoopSession, text: &str) {
    session
        .renderer()
        .write_block(&format!("\n  {}\n\n", style(text).dim()));
}
