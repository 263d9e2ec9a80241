//! SQLite storage backend.

pub mod kv;
pub mod pool;
