//! Chat session logic and collaborator trait definitions for ragchat.
//!
//! This crate defines the "ports" (endpoint, storage, renderer traits) that
//! the infrastructure and CLI layers implement. It depends only on
//! `ragchat-types` -- never on `ragchat-infra` or any network/database crate.

pub mod chat;
pub mod endpoint;
pub mod render;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
