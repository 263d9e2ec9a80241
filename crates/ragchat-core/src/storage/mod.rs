//! Persistent storage abstractions.

pub mod kv_store;
