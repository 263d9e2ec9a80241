//! Application state wiring the session's collaborators together.
//!
//! `ChatSession` is generic over endpoint/store/renderer traits; AppState
//! pins the endpoint and store to the concrete infra implementations and
//! leaves the renderer to each command.

use std::path::PathBuf;

use anyhow::Context;

use ragchat_core::chat::session::ChatSession;
use ragchat_core::render::ChatRenderer;
use ragchat_core::storage::kv_store::KvStore;
use ragchat_infra::endpoint::http::HttpChatEndpoint;
use ragchat_infra::filesystem::ensure_data_dir;
use ragchat_infra::memory::MemoryKvStore;
use ragchat_infra::sqlite::kv::SqliteKvStore;
use ragchat_infra::sqlite::pool::DatabasePool;
use ragchat_types::config::ClientConfig;
use ragchat_types::error::StorageError;

/// Session pinned to the concrete endpoint and store.
pub type AppSession<R> = ChatSession<HttpChatEndpoint, AppStore, R>;

/// Store selected at startup: SQLite on disk, or memory with `--ephemeral`.
#[derive(Clone)]
pub enum AppStore {
    Sqlite(SqliteKvStore),
    Memory(MemoryKvStore),
}

impl KvStore for AppStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AppStore::Sqlite(store) => store.get(key).await,
            AppStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStore::Sqlite(store) => store.set(key, value).await,
            AppStore::Memory(store) => store.set(key, value).await,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub data_dir: PathBuf,
    pub store: AppStore,
}

impl AppState {
    /// Open the store: the SQLite database in `data_dir`, or a fresh
    /// in-memory map when `ephemeral` is set.
    pub async fn init(config: ClientConfig, data_dir: PathBuf, ephemeral: bool) -> anyhow::Result<Self> {
        let store = if ephemeral {
            tracing::debug!("Using in-memory store");
            AppStore::Memory(MemoryKvStore::new())
        } else {
            ensure_data_dir(&data_dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
            let pool = DatabasePool::open_in(&data_dir).await.with_context(|| {
                format!("Failed to open history database in {}", data_dir.display())
            })?;
            AppStore::Sqlite(SqliteKvStore::new(pool))
        };

        Ok(Self {
            config,
            data_dir,
            store,
        })
    }

    pub fn endpoint(&self) -> anyhow::Result<HttpChatEndpoint> {
        HttpChatEndpoint::new(&self.config.endpoint_url, self.config.request_timeout())
            .context("Failed to create chat endpoint client")
    }

    /// Build a session around `renderer` and restore persisted state into it.
    pub async fn open_session<R: ChatRenderer>(&self, renderer: R) -> anyhow::Result<AppSession<R>> {
        let mut session = ChatSession::new(self.endpoint()?, self.store.clone(), renderer);
        session.restore().await;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_core::render::NullRenderer;
    use ragchat_core::storage::kv_store::{HISTORY_KEY, THEME_KEY};

    #[tokio::test]
    async fn test_ephemeral_state_touches_no_disk() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let state = AppState::init(ClientConfig::default(), data_dir.clone(), true)
            .await
            .unwrap();

        assert!(matches!(state.store, AppStore::Memory(_)));
        assert!(!data_dir.exists());
    }

    #[tokio::test]
    async fn test_persistent_state_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let state = AppState::init(ClientConfig::default(), data_dir.clone(), false)
            .await
            .unwrap();

        assert!(matches!(state.store, AppStore::Sqlite(_)));
        assert!(data_dir.join(ragchat_infra::sqlite::pool::DATABASE_FILE).exists());
    }

    #[tokio::test]
    async fn test_open_session_restores_stored_state() {
        let state = AppState::init(ClientConfig::default(), PathBuf::from("unused"), true)
            .await
            .unwrap();
        state.store.set(THEME_KEY, "true").await.unwrap();
        state
            .store
            .set(
                HISTORY_KEY,
                r#"[{"user":"Hello","bot":"Hi there","timestamp":"2026-01-01T00:00:00Z"}]"#,
            )
            .await
            .unwrap();

        let session = state.open_session(NullRenderer).await.unwrap();
        assert!(session.dark_mode());
        assert_eq!(session.exchanges().len(), 1);
        assert_eq!(session.exchanges()[0].bot_text, "Hi there");
    }
}
