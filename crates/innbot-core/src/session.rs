use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::{command::Action, domain::ChatId};

/// Per-chat "last command" store.
///
/// Each chat gets its own single slot; a replay in one chat can never fire a
/// command stored by another. The mutex serializes the read-then-write pair
/// when updates for several chats are handled concurrently.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<ChatId, Action>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the chat's slot. Callers must not store `Action::Replay`.
    pub async fn remember(&self, chat_id: ChatId, action: Action) {
        debug_assert!(action != Action::Replay);
        self.inner.lock().await.insert(chat_id, action);
    }

    /// Read the chat's slot without clearing it.
    pub async fn recall(&self, chat_id: ChatId) -> Option<Action> {
        self.inner.lock().await.get(&chat_id).cloned()
    }
}
