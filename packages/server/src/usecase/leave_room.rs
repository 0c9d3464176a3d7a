//! UseCase: ルーム退出

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, Session};

use super::error::UseCaseError;

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 退出したルーム名を返す
    pub async fn execute(&self, session: &Session) -> Result<RoomName, UseCaseError> {
        Ok(self.rooms.leave(session).await?)
    }
}
