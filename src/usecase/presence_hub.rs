//! UseCase: 接続ライフサイクル管理（PresenceHub）
//!
//! 接続は Connecting → Online → Closed の一方向に遷移します。
//! 再接続はなく、閉じた接続は破棄されます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PresenceHub::connect() / disconnect() メソッド
//! - 登録成功時の init 送信と join 通知のブロードキャスト
//! - 重複名の拒否と切断の冪等性
//!
//! ### なぜこのテストが必要か
//! - presence は Registry を唯一の情報源として導出される必要がある
//! - join/leave 通知の順序と対象が全クライアントのロスター整合性を決める
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの接続・切断と通知
//! - 異常系：重複した名前での接続試行
//! - エッジケース：二重切断（ブロードキャストなし）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{PresenceRegistry, PresenceSnapshot, RegistryError, Username},
    infrastructure::{
        DeliveryRouter,
        dto::websocket::{ServerEvent, SystemMessageKind},
    },
    time::{format_clock, now_timestamp_millis},
    ui::state::ConnectionHandle,
};

use super::error::ConnectError;

/// Orchestrates the connect/disconnect lifecycle and presence notices.
pub struct PresenceHub {
    /// Registry（presence の単一の信頼できる情報源）
    registry: Arc<dyn PresenceRegistry>,
    /// Outbound event delivery
    router: Arc<DeliveryRouter>,
    /// Serializes registry mutation + presence broadcast, so join/leave
    /// notices are observed in the same order as the underlying mutations.
    /// Nothing blocking happens inside this critical section.
    lifecycle: Mutex<()>,
}

impl PresenceHub {
    /// Create a hub over the given registry and router.
    pub fn new(registry: Arc<dyn PresenceRegistry>, router: Arc<DeliveryRouter>) -> Self {
        Self {
            registry,
            router,
            lifecycle: Mutex::new(()),
        }
    }

    /// Register `username` and bring the connection Online.
    ///
    /// On success the new connection receives an `init` event with its own
    /// identity and the full roster, and every online connection (the new
    /// one included) receives a `join` notice carrying the updated snapshot.
    ///
    /// # Errors
    ///
    /// `ConnectError::DuplicateName` when the name is already online. The
    /// registry is left untouched; the caller is expected to send a single
    /// `duplicate_login` notice and close the connection.
    pub async fn connect(
        &self,
        username: Username,
        connection: ConnectionHandle,
    ) -> Result<PresenceSnapshot, ConnectError> {
        let _guard = self.lifecycle.lock().await;

        let snapshot = self
            .registry
            .register(username.clone(), connection)
            .await
            .map_err(|e| match e {
                RegistryError::NameTaken(name) => ConnectError::DuplicateName(name),
            })?;

        let init = ServerEvent::init(&username, &snapshot);
        self.router.unicast(&username, &init).await;

        let joined = ServerEvent::system_message(
            SystemMessageKind::Join,
            &username,
            &snapshot,
            format_clock(now_timestamp_millis()),
        );
        let reached = self.router.broadcast(&joined).await;
        tracing::info!(
            "'{}' is online ({} connections notified of join)",
            username,
            reached
        );

        Ok(snapshot)
    }

    /// Unregister `username` and notify the remaining connections.
    ///
    /// Idempotent: a name that is no longer registered (duplicate disconnect
    /// signal) produces no broadcast. Returns the post-removal snapshot when
    /// the name was registered.
    pub async fn disconnect(&self, username: &Username) -> Option<PresenceSnapshot> {
        let _guard = self.lifecycle.lock().await;

        let snapshot = self.registry.unregister(username).await?;

        let left = ServerEvent::system_message(
            SystemMessageKind::Leave,
            username,
            &snapshot,
            format_clock(now_timestamp_millis()),
        );
        let reached = self.router.broadcast(&left).await;
        tracing::info!(
            "'{}' went offline ({} connections notified of leave)",
            username,
            reached
        );

        Some(snapshot)
    }
}
