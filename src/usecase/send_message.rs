//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者・宛先・本文の検証と会話ストアへの追記
//!
//! ### なぜこのテストが必要か
//! - 検証失敗時に部分的な副作用（ストアへの追記）が残らないことを保証
//! - 境界値（500 文字 / 501 文字）の扱いを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインの相手へのメッセージ送信
//! - 異常系：未登録の送信者、オフラインの宛先、空・過長の本文

use std::sync::Arc;

use crate::{
    domain::{
        ConversationKey, ConversationRepository, DirectMessage, MessageContent, PresenceRegistry,
        Timestamp, Username, ValueObjectError,
    },
    time::now_timestamp_millis,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（送信者・宛先の liveness 判定に使用）
    registry: Arc<dyn PresenceRegistry>,
    /// 会話履歴ストア
    conversations: Arc<dyn ConversationRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            registry,
            conversations,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者（接続にバインドされた Identity）
    /// * `to_raw` - 宛先のユーザー名（ワイヤ入力）
    /// * `content_raw` - メッセージ本文（ワイヤ入力）
    ///
    /// # Returns
    ///
    /// * `Ok(DirectMessage)` - seq が採番された保存済みメッセージ
    /// * `Err(SendMessageError)` - 検証失敗（ストアは変更されない）
    pub async fn execute(
        &self,
        from: &Username,
        to_raw: &str,
        content_raw: &str,
    ) -> Result<DirectMessage, SendMessageError> {
        // 1. 送信者の liveness 検証
        if !self.registry.is_online(from).await {
            return Err(SendMessageError::UnknownSender);
        }

        // 2. 本文と宛先の検証
        let content = MessageContent::new(content_raw).map_err(|e| match e {
            ValueObjectError::MessageContentTooLong { max, actual } => {
                SendMessageError::ContentTooLong { max, actual }
            }
            _ => SendMessageError::EmptyContent,
        })?;

        let to = Username::new(to_raw)
            .map_err(|_| SendMessageError::UnknownRecipient(to_raw.trim().to_string()))?;
        if !self.registry.is_online(&to).await {
            return Err(SendMessageError::UnknownRecipient(to.into_string()));
        }

        // 3. メッセージを構築して会話ストアに追記
        let key = ConversationKey::new(from, &to);
        let message = DirectMessage::new(
            from.clone(),
            to,
            content,
            Timestamp::new(now_timestamp_millis()),
        );
        Ok(self.conversations.append(key, message).await)
    }
}
