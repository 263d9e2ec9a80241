//! Theme preference: `ragchat theme [show|toggle]`.

use anyhow::Result;
use console::style;

use ragchat_core::chat::dispatch::{DispatchOutcome, UiEvent, dispatch};
use ragchat_core::render::NullRenderer;

use super::ThemeAction;
use crate::state::AppState;

pub fn theme_name(dark_mode: bool) -> &'static str {
    if dark_mode { "dark" } else { "light" }
}

/// Print or flip the stored theme preference. Returns the resulting value.
pub async fn theme(state: &AppState, action: ThemeAction, json: bool) -> Result<bool> {
    let mut session = state.open_session(NullRenderer).await?;

    let dark_mode = match action {
        ThemeAction::Show => session.dark_mode(),
        ThemeAction::Toggle => match dispatch(&mut session, UiEvent::ToggleTheme).await {
            DispatchOutcome::ThemeChanged { dark_mode } => dark_mode,
            _ => session.dark_mode(),
        },
    };

    if json {
        let body = serde_json::json!({
            "dark_mode": dark_mode,
            "theme": theme_name(dark_mode),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let verb = if action == ThemeAction::Toggle { "now" } else { "currently" };
        println!();
        println!(
            "  Theme is {verb} {}",
            style(theme_name(dark_mode)).cyan().bold()
        );
        println!();
    }

    Ok(dark_mode)
}
