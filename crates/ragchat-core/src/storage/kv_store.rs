//! Key-value store trait.
//!
//! Defines the interface for the client's local string store.
//! Implementations live in ragchat-infra.

use ragchat_types::error::StorageError;

/// Key holding the JSON-serialized exchange history.
pub const HISTORY_KEY: &str = "chatHistory";

/// Key holding the theme preference (`"true"` for dark mode).
pub const THEME_KEY: &str = "darkMode";

/// Trait for persistent string-to-string storage.
///
/// Values are opaque to the store; callers serialize before writing.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Set a value for a key, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
