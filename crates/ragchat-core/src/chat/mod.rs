//! Chat session management.
//!
//! `session` holds the `ChatSession` manager, `dispatch` maps named UI
//! events onto it, and `autosave` produces the periodic save ticks.

pub mod autosave;
pub mod dispatch;
pub mod session;
