//! Welcome banner display for chat sessions.

use console::style;

/// Banner shown when the interactive loop starts.
///
/// Returned as a string so it can go through the readline writer.
pub fn welcome_banner(endpoint_url: &str, chat_id: &str, stored_chats: usize) -> String {
    let mut banner = String::new();
    banner.push('\n');
    banner.push_str(&format!("  {}\n", style("RAG Chat").cyan().bold()));
    banner.push_str(&format!(
        "  {}\n\n",
        style("Answers grounded in your document index").dim()
    ));
    banner.push_str(&format!(
        "  {}  {}\n",
        style("Endpoint:").bold(),
        style(endpoint_url).dim()
    ));
    banner.push_str(&format!(
        "  {}      {}\n",
        style("Chat:").bold(),
        style(chat_id).dim()
    ));
    banner.push_str(&format!(
        "  {}   {}\n\n",
        style("Stored:").bold(),
        style(format!(
            "{stored_chats} exchange{}",
            if stored_chats == 1 { "" } else { "s" }
        ))
        .dim()
    ));
    banner.push_str(&format!(
        "  {}\n",
        style("Type /help for commands, Ctrl+D to exit").dim()
    ));
    banner.push_str(&format!("  {}\n", style("---").dim()));
    banner
}
