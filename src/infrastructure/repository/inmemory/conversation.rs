//! インメモリ Conversation Store 実装
//!
//! ドメイン層が定義する ConversationRepository trait の具体的な実装。
//! ペアごとの会話履歴を Mutex で保護された HashMap に保持します。
//! 追加はロック内のメモリ操作のみで完結し、I/O を跨いでロックを
//! 保持することはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConversationKey, ConversationRepository, DirectMessage};

struct StoreInner {
    /// conversation key -> messages in append order
    conversations: HashMap<ConversationKey, Vec<DirectMessage>>,
    /// Store-wide ordering token, strictly increasing per append
    next_seq: u64,
}

/// In-memory conversation store backed by a mutex-guarded HashMap.
pub struct InMemoryConversationStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                conversations: HashMap::new(),
                next_seq: 0,
            }),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationStore {
    async fn append(&self, key: ConversationKey, message: DirectMessage) -> DirectMessage {
        let mut inner = self.inner.lock().await;
        inner.next_seq += 1;
        let mut stored = message;
        stored.seq = inner.next_seq;
        inner
            .conversations
            .entry(key)
            .or_default()
            .push(stored.clone());
        stored
    }

    async fn history(&self, key: &ConversationKey) -> Vec<DirectMessage> {
        let inner = self.inner.lock().await;
        inner.conversations.get(key).cloned().unwrap_or_default()
    }
}
