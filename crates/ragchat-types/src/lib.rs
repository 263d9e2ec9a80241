//! Shared domain types for ragchat.
//!
//! This crate contains the core domain types used across the client:
//! sessions, exchanges, endpoint wire messages, configuration, and the
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod wire;
