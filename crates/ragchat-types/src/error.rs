use thiserror::Error;

/// The only error a caller of `send_message` sees.
///
/// Transport failures and non-success replies collapse into this one
/// variant; the underlying cause is logged, never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("message could not be delivered")]
    Failed,
}

/// Errors from talking to the remote chat endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid reply: {0}")]
    Decode(String),

    #[error("endpoint reported status '{status}': {message}")]
    Rejected { status: String, message: String },
}

/// Errors from the key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage query error: {0}")]
    Query(String),
}

/// Problems with `config.toml`. The client falls back to defaults on
/// either, but the caller reports it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Errors while loading the persisted chat history.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("malformed chat history: {0}")]
    Parse(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
