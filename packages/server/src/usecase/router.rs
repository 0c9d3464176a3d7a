//! Message Router
//!
//! 1 つの接続から届いたイベントを解釈し、対応するユースケースを実行して
//! 送信元に `info` / `error` を返します。Repository はすべて外から注入されます。
//!
//! 接続ごとの状態遷移:
//!
//! ```text
//! Unauthenticated --signin--> Authenticated --join_room--> InRoom
//!        ^                      |      ^                     |
//!        +-------signout--------+      +-----leave_room------+
//! ```
//!
//! 未サインインの接続が送れるのは `signup` / `signin` のみです。

use std::sync::Arc;

use crate::domain::{
    ChatKind, ConnectionHandle, ConnectionId, ConnectionRepository, Credential, Event, EventKind,
    HistoryLog, IdentityRepository, MessageContent, RoomName, RoomRepository, Session, Username,
};

use super::{
    create_room::CreateRoomUseCase, disconnect::DisconnectUseCase, error::UseCaseError,
    join_room::JoinRoomUseCase, leave_room::LeaveRoomUseCase,
    operator_broadcast::OperatorBroadcastUseCase, send_chat::SendChatUseCase,
    signin::SigninUseCase, signout::SignoutUseCase, signup::SignupUseCase,
};

pub const SIGNUP_SUCCESS: &str = "Signup successful";
pub const SIGNIN_SUCCESS: &str = "Signin successful";
pub const SIGNOUT_SUCCESS: &str = "Signout successful";
pub const CREATE_ROOM_SUCCESS: &str = "Room created successfully";
pub const JOIN_ROOM_SUCCESS: &str = "Joined room successfully";
pub const LEAVE_ROOM_SUCCESS: &str = "Left room successfully";

/// イベントのルーティング
pub struct MessageRouter {
    identities: Arc<dyn IdentityRepository>,
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
    history: Arc<dyn HistoryLog>,
}

impl MessageRouter {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        history: Arc<dyn HistoryLog>,
    ) -> Self {
        Self {
            identities,
            connections,
            rooms,
            history,
        }
    }

    pub fn rooms(&self) -> &Arc<dyn RoomRepository> {
        &self.rooms
    }

    /// 1 件の受信イベントを処理する
    ///
    /// 成功時は `info`、失敗時は `error` を送信元の接続にのみ返します。
    /// チャット（broadcast / dm）の成功時は配信そのものが応答になります。
    /// サーバー発のイベント種別（info / error / history）は無視します。
    pub async fn handle(&self, connection: &ConnectionHandle, event: Event) {
        tracing::debug!("Routing {:?} from connection {}", event.kind, connection.id());

        let outcome = match event.kind {
            EventKind::Signup => self.signup(event).await.map(|_| Some(SIGNUP_SUCCESS)),
            EventKind::Signin => self
                .signin(connection, event)
                .await
                .map(|_| Some(SIGNIN_SUCCESS)),
            EventKind::Signout => SignoutUseCase::new(self.connections.clone(), self.rooms.clone())
                .execute(connection.id())
                .await
                .map(|username| {
                    tracing::info!("'{}' signed out", username);
                    Some(SIGNOUT_SUCCESS)
                }),
            EventKind::CreateRoom => self
                .create_room(connection.id(), event)
                .await
                .map(|_| Some(CREATE_ROOM_SUCCESS)),
            EventKind::JoinRoom => self
                .join_room(connection.id(), event)
                .await
                .map(|_| Some(JOIN_ROOM_SUCCESS)),
            EventKind::LeaveRoom => self
                .leave_room(connection.id())
                .await
                .map(|_| Some(LEAVE_ROOM_SUCCESS)),
            EventKind::Broadcast | EventKind::Dm => {
                self.chat(connection.id(), event).await.map(|_| None)
            }
            EventKind::Info | EventKind::Error | EventKind::History => {
                tracing::debug!("Ignoring server-only event {:?}", event.kind);
                return;
            }
        };

        let reply = match outcome {
            Ok(Some(message)) => Event::info(message),
            Ok(None) => return,
            Err(e) => {
                tracing::debug!("Rejected event from connection {}: {}", connection.id(), e);
                Event::error(e.to_string())
            }
        };
        if let Err(e) = connection.push(reply) {
            tracing::debug!("Reply not delivered: {}", e);
        }
    }

    /// 接続が閉じられたときの後始末
    pub async fn disconnect(&self, connection_id: ConnectionId) {
        let usecase = DisconnectUseCase::new(self.connections.clone(), self.rooms.clone());
        if let Some(session) = usecase.execute(connection_id).await {
            tracing::info!(
                "Session of '{}' closed (connection {})",
                session.username(),
                connection_id
            );
        }
    }

    /// オペレーターブロードキャスト用のユースケースを組み立てる
    pub fn operator_broadcast(&self, target_room: Option<RoomName>) -> OperatorBroadcastUseCase {
        OperatorBroadcastUseCase::new(
            self.connections.clone(),
            self.rooms.clone(),
            self.history.clone(),
            target_room,
        )
    }

    async fn session(&self, connection_id: ConnectionId) -> Result<Arc<Session>, UseCaseError> {
        self.connections
            .lookup(connection_id)
            .await
            .ok_or(UseCaseError::NotSignedIn)
    }

    async fn signup(&self, event: Event) -> Result<(), UseCaseError> {
        let username = Username::try_from(event.sender)?;
        let credential = Credential::try_from(event.content)?;
        SignupUseCase::new(self.identities.clone())
            .execute(username.clone(), credential)
            .await?;
        tracing::info!("Registered '{}'", username);
        Ok(())
    }

    async fn signin(&self, connection: &ConnectionHandle, event: Event) -> Result<(), UseCaseError> {
        let username = Username::try_from(event.sender)?;
        let credential = Credential::try_from(event.content)?;
        let session = SigninUseCase::new(
            self.identities.clone(),
            self.connections.clone(),
            self.rooms.clone(),
        )
        .execute(connection.clone(), username, credential)
        .await?;
        tracing::info!(
            "'{}' signed in on connection {}",
            session.username(),
            connection.id()
        );
        Ok(())
    }

    async fn create_room(&self, connection_id: ConnectionId, event: Event) -> Result<(), UseCaseError> {
        let session = self.session(connection_id).await?;
        let name = RoomName::try_from(event.content)?;
        CreateRoomUseCase::new(self.rooms.clone())
            .execute(name.clone())
            .await?;
        tracing::info!("'{}' created room '{}'", session.username(), name);
        Ok(())
    }

    async fn join_room(&self, connection_id: ConnectionId, event: Event) -> Result<(), UseCaseError> {
        let session = self.session(connection_id).await?;
        let name = RoomName::try_from(event.content)?;
        JoinRoomUseCase::new(self.rooms.clone(), self.history.clone())
            .execute(&session, name)
            .await?;
        Ok(())
    }

    async fn leave_room(&self, connection_id: ConnectionId) -> Result<(), UseCaseError> {
        let session = self.session(connection_id).await?;
        let room = LeaveRoomUseCase::new(self.rooms.clone())
            .execute(&session)
            .await?;
        tracing::info!("'{}' left room '{}'", session.username(), room);
        Ok(())
    }

    async fn chat(&self, connection_id: ConnectionId, event: Event) -> Result<(), UseCaseError> {
        let session = self.session(connection_id).await?;
        let kind = match event.kind {
            EventKind::Dm => ChatKind::Direct {
                target: event.target.unwrap_or_default(),
            },
            _ => ChatKind::Broadcast,
        };
        let content = MessageContent::try_from(event.content)?;
        SendChatUseCase::new(
            self.connections.clone(),
            self.rooms.clone(),
            self.history.clone(),
        )
        .execute(&session, kind, content)
        .await?;
        Ok(())
    }
}
