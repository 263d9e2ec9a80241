//! Chat endpoint implementations.
//!
//! Contains the concrete [`ChatEndpoint`](ragchat_core::endpoint::ChatEndpoint)
//! used by the client: a JSON-over-HTTP client for the backend's `/chat` route.

pub mod http;
