//! UseCase: オペレーターからのシステムブロードキャスト
//!
//! コンソールから入力されたメッセージをキュー経由で受け取り、予約済みの
//! `server` ユーザーとして broadcast と同じ手順で配信します。
//! 対象ルームが設定されていればそのルームのみ、なければ全ルームに配信します。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{
    ChatKind, ChatRecord, ConnectionRepository, HistoryLog, MessageContent, RepositoryError,
    RoomName, RoomRepository, Username,
};

use super::fanout::{DeliveryReport, Fanout};

/// オペレーターブロードキャストのユースケース
pub struct OperatorBroadcastUseCase {
    fanout: Fanout,
    rooms: Arc<dyn RoomRepository>,
    history: Arc<dyn HistoryLog>,
    target_room: Option<RoomName>,
}

impl OperatorBroadcastUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        history: Arc<dyn HistoryLog>,
        target_room: Option<RoomName>,
    ) -> Self {
        Self {
            fanout: Fanout::new(connections, rooms.clone()),
            rooms,
            history,
            target_room,
        }
    }

    /// 1 件のメッセージを配信する
    ///
    /// # Returns
    ///
    /// 配信したルームごとの結果。設定されたルームが存在しない場合は空。
    pub async fn execute(&self, content: MessageContent) -> Vec<(RoomName, DeliveryReport)> {
        let targets = match &self.target_room {
            Some(room) => vec![room.clone()],
            None => self.rooms.room_names().await,
        };

        let sender = Username::operator();
        let mut reports = Vec::with_capacity(targets.len());
        for room in targets {
            match self
                .fanout
                .deliver(&room, &sender, &ChatKind::Broadcast, &content)
                .await
            {
                Ok(report) => {
                    let record = ChatRecord::new(room.clone(), sender.clone(), content.clone());
                    if let Err(e) = self.history.append(&record).await {
                        tracing::error!("Failed to append to history of '{}': {}", room, e);
                    }
                    reports.push((room, report));
                }
                Err(RepositoryError::RoomNotFound(name)) => {
                    tracing::warn!("Operator room '{}' does not exist; message dropped", name);
                }
                Err(e) => tracing::warn!("Operator broadcast to '{}' failed: {}", room, e),
            }
        }
        reports
    }

    /// キューが閉じられるまでメッセージを配信し続ける
    pub async fn run(self, mut queue: mpsc::Receiver<MessageContent>) {
        while let Some(content) = queue.recv().await {
            let reports = self.execute(content).await;
            tracing::info!("Operator message delivered to {} room(s)", reports.len());
        }
        tracing::debug!("Operator queue closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{EventKind, entity::test_support::room_name},
        usecase::testing::{Fixture, drain},
    };
    use futures_util::StreamExt;

    fn content(s: &str) -> MessageContent {
        MessageContent::new(s.to_string()).unwrap()
    }

    fn usecase(fixture: &Fixture, target: Option<&str>) -> OperatorBroadcastUseCase {
        OperatorBroadcastUseCase::new(
            fixture.connections.clone(),
            fixture.rooms.clone(),
            fixture.history.clone(),
            target.map(room_name),
        )
    }

    #[tokio::test]
    async fn test_operator_broadcast_to_all_rooms() {
        // テスト項目: 対象ルーム未設定なら全ルームに server として配信される
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.create_room("lobby").await;
        fixture.create_room("games").await;
        let (_alice, mut rx_a) = fixture.in_room("alice", "lobby").await;
        let (_bob, mut rx_b) = fixture.in_room("bob", "games").await;

        // when (操作):
        let reports = usecase(&fixture, None).execute(content("maintenance")).await;

        // then (期待する結果):
        assert_eq!(reports.len(), 2);
        for rx in [&mut rx_a, &mut rx_b] {
            let events = drain(rx);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind, EventKind::Broadcast);
            assert_eq!(events[0].sender, "server");
            assert_eq!(events[0].content, "maintenance");
        }
        let lobby: Vec<String> = fixture.history.replay(&room_name("lobby")).await.collect().await;
        assert_eq!(lobby, vec!["[lobby] server: maintenance"]);
    }

    #[tokio::test]
    async fn test_operator_broadcast_to_configured_room() {
        // テスト項目: 対象ルームが設定されていればそのルームにだけ配信される
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.create_room("lobby").await;
        fixture.create_room("games").await;
        let (_alice, mut rx_a) = fixture.in_room("alice", "lobby").await;
        let (_bob, mut rx_b) = fixture.in_room("bob", "games").await;

        // when (操作):
        let reports = usecase(&fixture, Some("lobby")).execute(content("hello")).await;

        // then (期待する結果):
        assert_eq!(reports.len(), 1);
        assert_eq!(drain(&mut rx_a).len(), 1);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[tokio::test]
    async fn test_operator_broadcast_to_missing_room_is_dropped() {
        // テスト項目: 設定されたルームが存在しなければ配信も履歴の書き込みもしない
        // given (前提条件):
        let fixture = Fixture::new();

        // when (操作):
        let reports = usecase(&fixture, Some("lobby")).execute(content("hello")).await;

        // then (期待する結果):
        assert!(reports.is_empty());
        assert!(!fixture.dir.path().join("chat_history_lobby.txt").exists());
    }

    #[tokio::test]
    async fn test_run_drains_queue() {
        // テスト項目: キューに入ったメッセージが順に配信され、キューが閉じると終了する
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.create_room("lobby").await;
        let (_alice, mut rx) = fixture.in_room("alice", "lobby").await;
        let (tx, queue) = mpsc::channel(8);
        tx.send(content("one")).await.unwrap();
        tx.send(content("two")).await.unwrap();
        drop(tx);

        // when (操作):
        usecase(&fixture, None).run(queue).await;

        // then (期待する結果):
        let contents: Vec<String> = drain(&mut rx).into_iter().map(|e| e.content).collect();
        assert_eq!(contents, vec!["one", "two"]);
    }
}
