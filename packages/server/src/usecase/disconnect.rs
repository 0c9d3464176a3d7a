//! UseCase: 接続終了時の後始末
//!
//! トランスポートが閉じた（TransportClosed）、またはサインアウトした接続の
//! Session を Connection Repository とルームのメンバー一覧から取り除きます。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, RoomRepository, Session};

/// 接続切断のユースケース
pub struct DisconnectUseCase {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl DisconnectUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { connections, rooms }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続に bind されていた Session（未サインインなら `None`）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Arc<Session>> {
        let session = self.connections.unbind(connection_id).await?;
        if let Ok(room) = self.rooms.leave(&session).await {
            tracing::debug!("'{}' removed from room '{}'", session.username(), room);
        }
        Some(session)
    }
}
