//! Stored history listing: `ragchat history`.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use ragchat_core::render::NullRenderer;
use ragchat_types::chat::{Exchange, HistoryPreview, PREVIEW_SNIPPET_CHARS};

use crate::state::AppState;

/// List stored exchanges as a table, or as JSON with `--json`.
pub async fn list_history(state: &AppState, json: bool) -> Result<()> {
    let session = state.open_session(NullRenderer).await?;
    let exchanges = session.exchanges();

    if json {
        println!("{}", serde_json::to_string_pretty(exchanges)?);
        return Ok(());
    }

    if exchanges.is_empty() {
        println!();
        println!(
            "  {} No chat history yet. Start one with: {}",
            style("i").blue().bold(),
            style("ragchat chat").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", history_table(exchanges));
    println!();
    println!(
        "  {} exchange{}",
        style(exchanges.len()).bold(),
        if exchanges.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

fn history_table(exchanges: &[Exchange]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Chat").fg(Color::White),
        Cell::new("Asked").fg(Color::White),
        Cell::new("Answer").fg(Color::White),
        Cell::new("When").fg(Color::White),
    ]);

    for (index, exchange) in exchanges.iter().enumerate() {
        let preview = HistoryPreview::from_exchange(index, exchange);
        table.add_row(vec![
            Cell::new(preview.label).fg(Color::Cyan),
            Cell::new(preview.snippet).fg(Color::White),
            Cell::new(truncate(&exchange.bot_text, PREVIEW_SNIPPET_CHARS)).fg(Color::DarkGrey),
            Cell::new(exchange.timestamp.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// First `max` characters of the first line, with `...` when cut.
fn truncate(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    let mut chars = line.chars();
    let mut out: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() || line.len() < text.trim_end().len() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijk", 5), "abcde...");
        assert_eq!(truncate("line one\nline two", 30), "line one...");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_history_table_rows() {
        let exchanges = vec![
            Exchange {
                user_text: "What is RAG?".to_string(),
                bot_text: "Retrieval-augmented generation.".to_string(),
                timestamp: Utc::now(),
            },
            Exchange {
                user_text: "And embeddings?".to_string(),
                bot_text: "Vectors.".to_string(),
                timestamp: Utc::now(),
            },
        ];
        let rendered = history_table(&exchanges).to_string();
        assert!(rendered.contains("Chat 1"));
        assert!(rendered.contains("Chat 2"));
        assert!(rendered.contains("What is RAG?"));
        assert!(rendered.contains("Vectors."));
    }
}
