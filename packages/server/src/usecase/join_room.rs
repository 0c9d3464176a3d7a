//! UseCase: ルーム参加
//!
//! 参加に成功すると、そのルームの履歴を古い順に `history` イベントとして
//! 参加した接続にだけ送ります。成功通知の `info` は呼び出し側（Router）が
//! 履歴の後に送ります。

use std::sync::Arc;

use futures_util::StreamExt;

use crate::domain::{Event, HistoryLog, RoomName, RoomRepository, Session};

use super::error::UseCaseError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    history: Arc<dyn HistoryLog>,
}

impl JoinRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, history: Arc<dyn HistoryLog>) -> Self {
        Self { rooms, history }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信した履歴の行数
    /// * `Err(UseCaseError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(
        &self,
        session: &Arc<Session>,
        name: RoomName,
    ) -> Result<usize, UseCaseError> {
        self.rooms.join(&name, session).await?;

        let mut lines = self.history.replay(&name).await;
        let mut replayed = 0;
        while let Some(line) = lines.next().await {
            if let Err(e) = session.push(Event::history(line)) {
                tracing::debug!("Stopped history replay for '{}': {}", session.username(), e);
                break;
            }
            replayed += 1;
        }

        tracing::info!(
            "'{}' joined room '{}' ({} history line(s))",
            session.username(),
            name,
            replayed
        );
        Ok(replayed)
    }
}
