//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and map to session controls (new chat, theme,
//! history) or loop controls (help, clear, exit).

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Persist and exit.
    Exit,
    /// Start a new chat.
    New,
    /// Toggle dark/light theme.
    Theme,
    /// List the recent-chats entries.
    History,
    /// Show a past exchange, by its 1-based chat number.
    Show(usize),
    /// Unknown command or bad arguments.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/theme" => Some(ChatCommand::Theme),
        "/history" | "/hist" => Some(ChatCommand::History),
        "/show" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Some(ChatCommand::Show(n)),
            _ => Some(ChatCommand::Unknown(
                "/show requires a chat number (see /history)".to_string(),
            )),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new chat"),
        ("/theme", "Toggle dark/light theme"),
        ("/history", "List recent chats"),
        ("/show <n>", "Show chat number n"),
        ("/clear", "Clear the screen"),
        ("/exit", "Save and end the session"),
    ];

    let mut text = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, description) in rows {
        text.push_str(&format!("  {}{description}\n", style(format!("{cmd:<12}")).cyan()));
    }
    text.push_str(&format!(
        "\n  {}\n\n",
        style("Ctrl+C saves history, Ctrl+D saves and exits").dim()
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_session_controls() {
        assert_eq!(parse("/new"), Some(ChatCommand::New));
        assert_eq!(parse("/THEME"), Some(ChatCommand::Theme));
        assert_eq!(parse("  /history  "), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_show() {
        assert_eq!(parse("/show 3"), Some(ChatCommand::Show(3)));
        assert_eq!(parse("/show   12 "), Some(ChatCommand::Show(12)));
        assert!(matches!(parse("/show"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/show 0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/show two"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("what does /new do?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = console::strip_ansi_codes(&help_text()).to_string();
        for cmd in ["/help", "/new", "/theme", "/history", "/show", "/clear", "/exit"] {
            assert!(help.contains(cmd), "missing {cmd}");
        }
    }
}
