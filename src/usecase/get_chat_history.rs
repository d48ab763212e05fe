//! UseCase: 会話履歴取得処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetChatHistoryUseCase::execute() メソッド
//! - リクエスト元の liveness 検証と会話履歴の取得
//!
//! ### なぜこのテストが必要か
//! - 退室済みの相手との履歴も閲覧できることを保証（相手のオンラインは不要）
//! - 未知のペアはエラーではなく空の履歴を返すことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：オフラインの相手との履歴取得
//! - 異常系：未登録のリクエスト元、空の相手名

use std::sync::Arc;

use crate::domain::{
    ConversationKey, ConversationRepository, DirectMessage, PresenceRegistry, Username,
};

use super::error::HistoryError;

/// 会話履歴取得のユースケース
pub struct GetChatHistoryUseCase {
    /// Registry（リクエスト元の liveness 判定に使用）
    registry: Arc<dyn PresenceRegistry>,
    /// 会話履歴ストア
    conversations: Arc<dyn ConversationRepository>,
}

impl GetChatHistoryUseCase {
    /// 新しい GetChatHistoryUseCase を作成
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            registry,
            conversations,
        }
    }

    /// 会話履歴取得を実行
    ///
    /// 相手がオンラインである必要はありません。退室したユーザーとの
    /// 履歴も閲覧できます。
    ///
    /// # Returns
    ///
    /// * `Ok((Username, Vec<DirectMessage>))` - 正規化された相手名と追加順の履歴
    /// * `Err(HistoryError)` - 検証失敗
    pub async fn execute(
        &self,
        requester: &Username,
        other_raw: &str,
    ) -> Result<(Username, Vec<DirectMessage>), HistoryError> {
        if !self.registry.is_online(requester).await {
            return Err(HistoryError::UnknownRequester);
        }

        let other = Username::new(other_raw).map_err(|_| HistoryError::EmptyPeerName)?;

        let key = ConversationKey::new(requester, &other);
        let messages = self.conversations.history(&key).await;
        Ok((other, messages))
    }
}
