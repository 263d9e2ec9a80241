//! Terminal rendering of chat events.
//!
//! `MarkdownRenderer` combines `termimad` for prose and `syntect` for code
//! block highlighting, with one skin per theme. `TerminalRenderer` is the
//! [`ChatRenderer`] the CLI hands to the session: it turns every
//! [`RenderEvent`] into styled terminal output.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use ragchat_core::render::{ChatRenderer, RenderEvent};

/// Display name of the other side of the conversation.
pub const BOT_LABEL: &str = "Assistant";

const DARK_CODE_THEME: &str = "base16-ocean.dark";
const LIGHT_CODE_THEME: &str = "InspiredGitHub";

/// Terminal markdown renderer with syntax highlighting.
pub struct MarkdownRenderer {
    dark_skin: MadSkin,
    light_skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            dark_skin: Self::skin(MadSkin::default_dark(), Color::Cyan),
            light_skin: Self::skin(MadSkin::default_light(), Color::Blue),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn skin(mut skin: MadSkin, accent: Color) -> MadSkin {
        let tc = Self::crossterm_to_termimad(accent);
        skin.bold.set_fg(tc);
        skin.headers[0].set_fg(tc);
        skin.headers[1].set_fg(tc);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        skin
    }

    /// Render a complete markdown reply with syntax-highlighted code blocks.
    ///
    /// Code fences are highlighted via syntect; everything else goes
    /// through termimad.
    pub fn render(&self, markdown: &str, dark_mode: bool) -> String {
        let skin = if dark_mode {
            &self.dark_skin
        } else {
            &self.light_skin
        };

        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang, dark_mode));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang, dark_mode));
        }

        output
    }

    fn highlight_code(&self, code: &str, lang: &str, dark_mode: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        let theme_name = if dark_mode {
            DARK_CODE_THEME
        } else {
            LIGHT_CODE_THEME
        };
        let Some(theme) = self.theme_set.themes.get(theme_name) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };
        let mut h = HighlightLines::new(syntax, theme);

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }

    /// Convert a crossterm Color to termimad's re-exported crossterm Color.
    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Blue => termimad::crossterm::style::Color::Blue,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// How "awaiting reply" is shown.
enum TypingIndicator {
    /// indicatif spinner on stderr, for one-shot commands.
    Spinner(Mutex<Option<ProgressBar>>),
    /// A dim status line, for the interactive loop where a spinner would
    /// fight the readline prompt.
    Line,
}

/// [`ChatRenderer`] writing styled output to a terminal stream.
pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    markdown: MarkdownRenderer,
    dark_mode: AtomicBool,
    typing: TypingIndicator,
    /// Print the user's own message; off when the input line already shows it.
    echo_input: bool,
}

impl TerminalRenderer {
    /// Renderer for the interactive loop, writing through the readline writer.
    pub fn interactive(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            markdown: MarkdownRenderer::new(),
            dark_mode: AtomicBool::new(false),
            typing: TypingIndicator::Line,
            echo_input: false,
        }
    }

    /// Renderer for one-shot commands, writing to stdout.
    pub fn one_shot() -> Self {
        Self {
            out: Mutex::new(Box::new(std::io::stdout())),
            markdown: MarkdownRenderer::new(),
            dark_mode: AtomicBool::new(false),
            typing: TypingIndicator::Spinner(Mutex::new(None)),
            echo_input: true,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.load(Ordering::Relaxed)
    }

    /// Write a block of text, ignoring a closed output stream.
    pub fn write_block(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn bot_block(&self, text: &str) -> String {
        let rendered = self.markdown.render(text, self.dark_mode());
        format!(
            "\n  {} {}\n\n",
            style(BOT_LABEL).cyan().bold(),
            rendered.trim()
        )
    }

    fn start_typing(&self) {
        match &self.typing {
            TypingIndicator::Spinner(slot) => {
                let spinner = ProgressBar::new_spinner();
                if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
                {
                    spinner.set_style(template);
                }
                spinner.set_message(format!("{BOT_LABEL} is typing..."));
                spinner.enable_steady_tick(Duration::from_millis(80));
                *slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(spinner);
            }
            TypingIndicator::Line => {
                self.write_block(&format!(
                    "  {}\n",
                    style(format!("{BOT_LABEL} is typing...")).dim()
                ));
            }
        }
    }

    fn stop_typing(&self) {
        if let TypingIndicator::Spinner(slot) = &self.typing {
            if let Some(spinner) = slot.lock().unwrap_or_else(|p| p.into_inner()).take() {
                spinner.finish_and_clear();
            }
        }
    }
}

impl ChatRenderer for TerminalRenderer {
    fn render(&self, event: RenderEvent) {
        match event {
            RenderEvent::TranscriptCleared => {
                self.write_block(&format!("\n  {}\n", style("--- new chat ---").dim()));
            }
            RenderEvent::Greeting(text) | RenderEvent::BotMessage(text) => {
                self.write_block(&self.bot_block(&text));
            }
            RenderEvent::UserMessage(text) => {
                if self.echo_input {
                    self.write_block(&format!("\n  {} {text}\n", style("You >").green().bold()));
                }
            }
            RenderEvent::TypingStarted => self.start_typing(),
            RenderEvent::TypingStopped => self.stop_typing(),
            RenderEvent::Error(message) => {
                self.write_block(&format!("\n  {} {message}\n\n", style("!").red().bold()));
            }
            RenderEvent::ThemeChanged { dark_mode } => {
                self.dark_mode.store(dark_mode, Ordering::Relaxed);
            }
            // No sidebar in a terminal; /history reads previews on demand.
            RenderEvent::HistoryChanged(_) => {}
            RenderEvent::ExchangeShown { index, exchange } => {
                let when = exchange.timestamp.format("%Y-%m-%d %H:%M");
                self.write_block(&format!(
                    "\n  {} {}\n\n  {} {}\n{}",
                    style(format!("Chat {}", index + 1)).bold(),
                    style(when).dim(),
                    style("You >").green().bold(),
                    exchange.user_text,
                    self.bot_block(&exchange.bot_text),
                ));
            }
        }
    }
}
