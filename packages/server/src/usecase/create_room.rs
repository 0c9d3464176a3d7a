//! UseCase: ルーム作成

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository};

use super::error::UseCaseError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl CreateRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, name: RoomName) -> Result<(), UseCaseError> {
        self.rooms.create(name).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::entity::test_support::room_name, usecase::testing::Fixture};

    #[tokio::test]
    async fn test_create_room_success_and_duplicate() {
        // テスト項目: ルームを作成でき、同名の二回目は RoomExists になる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = CreateRoomUseCase::new(fixture.rooms.clone());

        // when (操作):
        let first = usecase.execute(room_name("lobby")).await;
        let second = usecase.execute(room_name("lobby")).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert_eq!(second, Err(UseCaseError::RoomExists));
        assert_eq!(fixture.rooms.room_names().await, vec![room_name("lobby")]);
    }
}
