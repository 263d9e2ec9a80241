//! ragchat CLI entry point.
//!
//! Binary name: `ragchat`
//!
//! Parses CLI arguments, loads configuration, initializes tracing and the
//! history store, then dispatches to the command handler.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use ragchat_infra::config::{config_or_default, load_client_config};
use ragchat_infra::filesystem::resolve_data_dir;
use ragchat_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use ragchat_types::config::LogFormat;

use cli::{Cli, Commands, ThemeAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Shell completions don't need config or state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "ragchat", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let (mut config, config_problem) = config_or_default(load_client_config(&data_dir).await);
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint_url = endpoint.clone();
    }

    init_tracing(
        TracingOptions::new(cli.log_filter())
            .json(config.logging.format == LogFormat::Json)
            .otel(config.logging.otel),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    if let Some(problem) = &config_problem {
        tracing::warn!("{problem}, using defaults");
    }
    tracing::debug!(
        data_dir = %data_dir.display(),
        endpoint = %config.endpoint_url,
        "Configuration loaded"
    );

    let result = run(&cli, AppState::init(config, data_dir, cli.ephemeral).await).await;
    shutdown_tracing();
    result
}

async fn run(cli: &Cli, state: anyhow::Result<AppState>) -> anyhow::Result<ExitCode> {
    let state = state?;

    match &cli.command {
        None | Some(Commands::Chat) => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Some(Commands::Send { message }) => {
            if !cli::send::send_message(&state, message, cli.json).await? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Some(Commands::History) => {
            cli::history::list_history(&state, cli.json).await?;
        }

        Some(Commands::Theme { action }) => {
            cli::theme::theme(&state, action.unwrap_or(ThemeAction::Show), cli.json).await?;
        }

        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    }

    Ok(ExitCode::SUCCESS)
}
