//! インメモリ Presence Registry 実装
//!
//! ドメイン層が定義する PresenceRegistry trait の具体的な実装。
//! オンラインユーザーの表（ユーザー名 → 接続ハンドル）を単一の Mutex で
//! 保護します。登録・解除・スナップショット・全体配送はすべて同じ
//! クリティカルセクションを通るため、スナップショットと配送対象が
//! 食い違うこと（torn read）はありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{PresenceRegistry, PresenceSnapshot, RegistryError, Username},
    ui::state::ConnectionHandle,
};

/// In-memory presence registry backed by a mutex-guarded HashMap.
pub struct InMemoryPresenceRegistry {
    /// username -> live connection handle
    online: Mutex<HashMap<String, ConnectionHandle>>,
}

impl InMemoryPresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            online: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot_of(online: &HashMap<String, ConnectionHandle>) -> PresenceSnapshot {
    PresenceSnapshot::from_names(online.keys().cloned())
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(
        &self,
        username: Username,
        connection: ConnectionHandle,
    ) -> Result<PresenceSnapshot, RegistryError> {
        let mut online = self.online.lock().await;
        if online.contains_key(username.as_str()) {
            return Err(RegistryError::NameTaken(username.into_string()));
        }
        online.insert(username.into_string(), connection);
        Ok(snapshot_of(&online))
    }

    async fn unregister(&self, username: &Username) -> Option<PresenceSnapshot> {
        let mut online = self.online.lock().await;
        online
            .remove(username.as_str())
            .map(|_| snapshot_of(&online))
    }

    async fn is_online(&self, username: &Username) -> bool {
        let online = self.online.lock().await;
        online.contains_key(username.as_str())
    }

    async fn snapshot(&self) -> PresenceSnapshot {
        let online = self.online.lock().await;
        snapshot_of(&online)
    }

    async fn sender_of(&self, username: &Username) -> Option<UnboundedSender<String>> {
        let online = self.online.lock().await;
        online.get(username.as_str()).map(|c| c.sender.clone())
    }

    async fn deliver_all(&self, payload: String) -> usize {
        let online = self.online.lock().await;
        let mut delivered = 0;
        for (username, connection) in online.iter() {
            if connection.sender.send(payload.clone()).is_err() {
                // The forwarding task already went away; the disconnect
                // handler will unregister this name shortly.
                tracing::warn!("failed to deliver broadcast to '{}'", username);
            } else {
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now_timestamp_millis;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 登録・解除の基本操作と一意性の保証
    // - 解除の冪等性（重複した切断シグナルへの耐性）
    // - スナップショットが防御的コピーであること
    // - 同名同時登録で勝者がちょうど 1 人であること
    // - deliver_all が全接続に配送すること
    //
    // 【なぜこのテストが必要か】
    // - Registry は presence の単一の信頼できる情報源
    // - 一意性が壊れると全クライアントのロスター表示が破綻する
    // ========================================

    fn test_connection() -> (ConnectionHandle, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            ConnectionHandle {
                sender: tx,
                connected_at: now_timestamp_millis(),
                session_id: Uuid::new_v4(),
            },
            rx,
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        // テスト項目: 新しいユーザー名を登録するとスナップショットに反映される
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let alice = Username::new("Alice").unwrap();
        let (conn, _rx) = test_connection();

        // when (操作):
        let result = registry.register(alice.clone(), conn).await;

        // then (期待する結果):
        let snapshot = result.unwrap();
        assert_eq!(snapshot.online_users, vec!["Alice"]);
        assert_eq!(snapshot.count, 1);
        assert!(registry.is_online(&alice).await);
    }

    #[tokio::test]
    async fn test_register_duplicate_name_fails() {
        // テスト項目: 登録済みの名前の再登録は失敗し、既存の登録は変化しない
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let alice = Username::new("Alice").unwrap();
        let (conn1, mut rx1) = test_connection();
        let (conn2, _rx2) = test_connection();
        registry.register(alice.clone(), conn1).await.unwrap();

        // when (操作):
        let result = registry.register(alice.clone(), conn2).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::NameTaken("Alice".to_string())
        );
        assert_eq!(registry.snapshot().await.count, 1);

        // 既存の接続ハンドルが生きている（配送先が差し替わっていない）
        registry.deliver_all("ping".to_string()).await;
        assert_eq!(rx1.recv().await.unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 解除は冪等で、二重解除は None を返す
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let alice = Username::new("Alice").unwrap();
        let (conn, _rx) = test_connection();
        registry.register(alice.clone(), conn).await.unwrap();

        // when (操作):
        let first = registry.unregister(&alice).await;
        let second = registry.unregister(&alice).await;

        // then (期待する結果):
        let snapshot = first.unwrap();
        assert_eq!(snapshot.count, 0);
        assert!(second.is_none());
        assert!(!registry.is_online(&alice).await);
    }

    #[tokio::test]
    async fn test_concurrent_register_same_name_single_winner() {
        // テスト項目: 同じ名前の同時登録では勝者がちょうど 1 人
        // given (前提条件):
        let registry = Arc::new(InMemoryPresenceRegistry::new());

        // when (操作): 8 タスクが同時に同じ名前を登録する
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let (conn, _rx) = test_connection();
                let name = Username::new("Alice").unwrap();
                registry.register(name, conn).await.is_ok()
            }));
        }
        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(winners, 1);
        assert_eq!(registry.snapshot().await.count, 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_defensive_copy() {
        // テスト項目: スナップショットは取得後のレジストリ変更の影響を受けない
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let alice = Username::new("Alice").unwrap();
        let (conn, _rx) = test_connection();
        registry.register(alice.clone(), conn).await.unwrap();
        let snapshot = registry.snapshot().await;

        // when (操作):
        registry.unregister(&alice).await;

        // then (期待する結果):
        assert_eq!(snapshot.online_users, vec!["Alice"]);
        assert_eq!(registry.snapshot().await.count, 0);
    }

    #[tokio::test]
    async fn test_deliver_all_reaches_every_connection() {
        // テスト項目: deliver_all は全てのオンライン接続に配送する
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let alice = Username::new("Alice").unwrap();
        let bob = Username::new("Bob").unwrap();
        let (conn1, mut rx1) = test_connection();
        let (conn2, mut rx2) = test_connection();
        registry.register(alice, conn1).await.unwrap();
        registry.register(bob, conn2).await.unwrap();

        // when (操作):
        let delivered = registry.deliver_all("hello".to_string()).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await.unwrap(), "hello");
        assert_eq!(rx2.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_sender_of_unknown_user_is_none() {
        // テスト項目: 未登録ユーザーの送信チャンネルは取得できない
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let ghost = Username::new("Ghost").unwrap();

        // when (操作):
        let sender = registry.sender_of(&ghost).await;

        // then (期待する結果):
        assert!(sender.is_none());
    }
}
