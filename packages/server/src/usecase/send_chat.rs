//! UseCase: チャット送信（broadcast / dm）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - 所属ルームでのファンアウトと履歴への追記
//!
//! ### なぜこのテストが必要か
//! - ルームに参加していない Session からの送信を拒否する
//! - 送信者名はクライアントの申告ではなく Session のユーザー名を使う
//! - 履歴の書き込みに失敗してもチャットは届く（PersistenceUnavailable は握りつぶす）
//!
//! ### どのような状況を想定しているか
//! - 正常系：broadcast の配信と履歴への追記
//! - 異常系：ルーム未参加での送信
//! - エッジケース：履歴ログが書き込めない

use std::sync::Arc;

use crate::domain::{
    ChatKind, ChatRecord, ConnectionRepository, HistoryLog, MessageContent, RoomRepository,
    Session,
};

use super::{
    error::UseCaseError,
    fanout::{DeliveryReport, Fanout},
};

/// チャット送信のユースケース
pub struct SendChatUseCase {
    fanout: Fanout,
    history: Arc<dyn HistoryLog>,
}

impl SendChatUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        history: Arc<dyn HistoryLog>,
    ) -> Self {
        Self {
            fanout: Fanout::new(connections, rooms),
            history,
        }
    }

    /// チャット送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信者の Session
    /// * `kind` - broadcast または dm
    /// * `content` - メッセージ内容（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryReport)` - 配信結果
    /// * `Err(UseCaseError::NotInRoom)` - ルームに参加していない
    pub async fn execute(
        &self,
        session: &Session,
        kind: ChatKind,
        content: MessageContent,
    ) -> Result<DeliveryReport, UseCaseError> {
        let room = session
            .current_room()
            .ok_or(UseCaseError::NotInRoom)?;
        let sender = session.username().clone();

        let report = self
            .fanout
            .deliver(&room, &sender, &kind, &content)
            .await?;

        let record = ChatRecord::new(room, sender, content);
        if let Err(e) = self.history.append(&record).await {
            tracing::error!("Failed to append to history of '{}': {}", record.room, e);
        }

        Ok(report)
    }
}
