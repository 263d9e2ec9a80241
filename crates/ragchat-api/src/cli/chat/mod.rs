//! Interactive CLI chat experience for ragchat.
//!
//! Implements the chat loop: optimistic sends with background replies,
//! markdown rendering, slash commands, periodic autosave, and teardown
//! persistence. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
