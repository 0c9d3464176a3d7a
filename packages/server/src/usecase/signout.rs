//! UseCase: サインアウト

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, RoomRepository, Username};

use super::{disconnect::DisconnectUseCase, error::UseCaseError};

/// サインアウトのユースケース
///
/// 接続自体は維持され、未認証の状態に戻ります。
pub struct SignoutUseCase {
    disconnect: DisconnectUseCase,
}

impl SignoutUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>, rooms: Arc<dyn RoomRepository>) -> Self {
        Self {
            disconnect: DisconnectUseCase::new(connections, rooms),
        }
    }

    pub async fn execute(&self, connection_id: ConnectionId) -> Result<Username, UseCaseError> {
        self.disconnect
            .execute(connection_id)
            .await
            .map(|session| session.username().clone())
            .ok_or(UseCaseError::NotSignedIn)
    }
}
