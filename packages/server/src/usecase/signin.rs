//! UseCase: サインイン
//!
//! 認証に成功すると接続に Session を bind します。
//! 同じ接続がすでに別の Session を持っていた場合、その Session は置き換えられ、
//! 所属していたルームからも外されます。

use std::sync::Arc;

use crate::domain::{
    ConnectionHandle, ConnectionRepository, Credential, IdentityRepository, RoomRepository,
    Session, Timestamp, Username,
};

use super::error::UseCaseError;

/// サインインのユースケース
pub struct SigninUseCase {
    identities: Arc<dyn IdentityRepository>,
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl SigninUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            identities,
            connections,
            rooms,
        }
    }

    /// サインインを実行
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Session>)` - 接続に bind された新しい Session
    /// * `Err(UseCaseError::InvalidCredential)` - ユーザー不明または認証情報の不一致
    pub async fn execute(
        &self,
        connection: ConnectionHandle,
        username: Username,
        credential: Credential,
    ) -> Result<Arc<Session>, UseCaseError> {
        let identity = self.identities.verify(&username, &credential).await?;

        let session = Arc::new(Session::new(identity, connection, Timestamp::now()));
        if let Some(previous) = self.connections.bind(session.clone()).await {
            // 置き換えられた Session がルームに残らないようにする
            if let Ok(room) = self.rooms.leave(&previous).await {
                tracing::debug!(
                    "Replaced session of '{}' left room '{}'",
                    previous.username(),
                    room
                );
            }
        }

        Ok(session)
    }
}
