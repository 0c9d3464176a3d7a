//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロックの規約
//!
//! `Session::current_room` の書き換えは必ずこの Repository のロックを保持した
//! まま行います。そのため「メンバー一覧」と「セッションの所属ルーム」が
//! 食い違った状態が外から観測されることはありません。
//! Connection Repository と両方のロックが必要な場合は Room → Connection の順に
//! 取得します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Room, RoomName, RoomRepository, Session, Timestamp};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomName, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, name: RoomName) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&name) {
            return Err(RepositoryError::RoomExists(name.into_string()));
        }
        rooms.insert(name.clone(), Room::new(name, Timestamp::now()));
        Ok(())
    }

    async fn join(&self, name: &RoomName, session: &Arc<Session>) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if !rooms.contains_key(name) {
            return Err(RepositoryError::RoomNotFound(name.as_str().to_string()));
        }

        // 別のルームに所属していれば先に抜ける（1 セッション 1 ルーム）
        if let Some(previous) = session.current_room()
            && &previous != name
            && let Some(room) = rooms.get_mut(&previous)
        {
            room.remove_member(session.connection_id());
        }

        if let Some(room) = rooms.get_mut(name) {
            room.add_member(session.clone());
        }
        session.set_current_room(Some(name.clone()));
        Ok(())
    }

    async fn leave(&self, session: &Session) -> Result<RoomName, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let current = session.current_room().ok_or(RepositoryError::NotInRoom)?;
        let room = rooms
            .get_mut(&current)
            .ok_or(RepositoryError::NotInRoom)?;

        room.remove_member(session.connection_id());
        session.set_current_room(None);
        Ok(current)
    }

    async fn members_of(&self, name: &RoomName) -> Result<Vec<Arc<Session>>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(name)
            .map(|room| room.members.clone())
            .ok_or_else(|| RepositoryError::RoomNotFound(name.as_str().to_string()))
    }

    async fn room_names(&self) -> Vec<RoomName> {
        let rooms = self.rooms.lock().await;
        let mut names: Vec<RoomName> = rooms.keys().cloned().collect();
        names.sort();
        names
    }

    async fn get_room(&self, name: &RoomName) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(name).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}
