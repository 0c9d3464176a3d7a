//! UseCase テスト用のフィクスチャ

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    domain::{
        ConnectionRepository, Event, RoomRepository, Session,
        entity::test_support::{room_name, session},
    },
    infrastructure::{
        history::FileHistoryLog,
        repository::{
            InMemoryConnectionRepository, InMemoryIdentityRepository, InMemoryRoomRepository,
        },
    },
};

/// インメモリ Repository 一式と一時ディレクトリ上の履歴ファイル
pub struct Fixture {
    pub identities: Arc<InMemoryIdentityRepository>,
    pub connections: Arc<InMemoryConnectionRepository>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub history: Arc<FileHistoryLog>,
    // drop されると一時ディレクトリが削除される
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self {
            identities: Arc::new(InMemoryIdentityRepository::new()),
            connections: Arc::new(InMemoryConnectionRepository::new()),
            rooms: Arc::new(InMemoryRoomRepository::new()),
            history: Arc::new(FileHistoryLog::new(dir.path())),
            dir,
        }
    }

    /// サインイン済みのセッションを作成して Connection Repository に登録する
    pub async fn signed_in(&self, name: &str) -> (Arc<Session>, UnboundedReceiver<Event>) {
        let (session, rx) = session(name);
        self.connections.bind(session.clone()).await;
        (session, rx)
    }

    /// サインイン済みでルームに参加しているセッション
    pub async fn in_room(&self, name: &str, room: &str) -> (Arc<Session>, UnboundedReceiver<Event>) {
        let (session, rx) = self.signed_in(name).await;
        self.rooms.join(&room_name(room), &session).await.unwrap();
        (session, rx)
    }

    pub async fn create_room(&self, room: &str) {
        self.rooms.create(room_name(room)).await.unwrap();
    }
}

/// 受信済みのイベントをすべて取り出す
pub fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
