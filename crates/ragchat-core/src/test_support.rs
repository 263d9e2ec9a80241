//! In-memory collaborators shared by the unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ragchat_types::error::{EndpointError, StorageError};
use ragchat_types::wire::{ChatReply, ChatRequest};

use crate::endpoint::ChatEndpoint;
use crate::render::{ChatRenderer, RenderEvent};
use crate::storage::kv_store::KvStore;

// --- Mock endpoint ---

#[derive(Clone)]
enum MockReply {
    Reply(ChatReply),
    Unreachable,
}

pub struct MockEndpoint {
    reply: Mutex<MockReply>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockEndpoint {
    pub fn replying(response: &str) -> Self {
        Self::with_reply(ChatReply::success(response))
    }

    pub fn with_reply(reply: ChatReply) -> Self {
        Self {
            reply: Mutex::new(MockReply::Reply(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Mutex::new(MockReply::Unreachable),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: ChatReply) {
        *self.reply.lock().unwrap() = MockReply::Reply(reply);
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ChatEndpoint for MockEndpoint {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, EndpointError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.reply.lock().unwrap().clone();
        async move {
            match reply {
                MockReply::Reply(reply) => Ok(reply),
                MockReply::Unreachable => {
                    Err(EndpointError::Transport("connection refused".to_string()))
                }
            }
        }
    }
}

// --- Mock store ---

/// Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct MockStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
    failing: bool,
}

impl MockStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KvStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Query("database is locked".to_string()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Query("disk full".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.insert(key, value);
        Ok(())
    }
}

// --- Recording renderer ---

#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ChatRenderer for RecordingRenderer {
    fn render(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}
