//! CLI command definitions for the `ragchat` binary.
//!
//! Uses clap derive macros for argument parsing. Running `ragchat` with no
//! subcommand starts the interactive chat.

pub mod chat;
pub mod history;
pub mod send;
pub mod theme;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a retrieval-augmented assistant from the terminal.
#[derive(Parser)]
#[command(name = "ragchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Chat endpoint URL (overrides config.toml).
    #[arg(long, env = "RAGCHAT_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Data directory holding the history database and config.toml.
    #[arg(long, env = "RAGCHAT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep history and theme in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default tracing filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,ragchat=debug,ragchat_core=debug,ragchat_infra=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default).
    Chat,

    /// Send a single message and print the reply.
    Send {
        /// The message to send.
        message: String,
    },

    /// List stored chat history.
    #[command(alias = "ls")]
    History,

    /// Show or toggle the dark/light theme preference.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the current theme (default).
    Show,
    /// Flip between dark and light.
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["ragchat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_send_with_global_flags() {
        let cli = Cli::try_parse_from([
            "ragchat",
            "send",
            "What is RAG?",
            "--json",
            "--ephemeral",
            "--endpoint",
            "http://localhost:9000/chat",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.ephemeral);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000/chat"));
        match cli.command {
            Some(Commands::Send { message }) => assert_eq!(message, "What is RAG?"),
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_theme_toggle() {
        let cli = Cli::try_parse_from(["ragchat", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                action: Some(ThemeAction::Toggle)
            })
        ));
    }

    #[test]
    fn test_log_filter_by_verbosity() {
        let quiet = Cli::try_parse_from(["ragchat", "--quiet"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");
        let default = Cli::try_parse_from(["ragchat"]).unwrap();
        assert_eq!(default.log_filter(), "warn");
        let trace = Cli::try_parse_from(["ragchat", "-vv"]).unwrap();
        assert_eq!(trace.log_filter(), "trace");
    }
}
