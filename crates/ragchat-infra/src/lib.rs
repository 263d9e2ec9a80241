//! Infrastructure layer for ragchat.
//!
//! Contains implementations of the collaborator traits defined in
//! `ragchat-core`: the HTTP chat endpoint client, SQLite and in-memory
//! key-value stores, plus configuration loading and data directory layout.

pub mod config;
pub mod endpoint;
pub mod filesystem;
pub mod memory;
pub mod sqlite;
