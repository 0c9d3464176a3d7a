//! Repository traits.
//!
//! The domain defines these interfaces; the infrastructure layer implements
//! them. Each repository guards its own state with its own lock.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use super::{
    entity::{ChatRecord, Identity, Room, Session},
    error::{HistoryError, RepositoryError},
    value_object::{ConnectionId, Credential, RoomName, Username},
};

/// Registered identities, keyed by username
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Insert the identity if its username is not taken yet.
    async fn register(&self, identity: Identity) -> Result<(), RepositoryError>;

    /// Look up `username` and compare credentials.
    ///
    /// Unknown usernames and wrong credentials both yield
    /// `RepositoryError::InvalidCredential`.
    async fn verify(
        &self,
        username: &Username,
        credential: &Credential,
    ) -> Result<Identity, RepositoryError>;

    async fn count(&self) -> usize;
}

/// Live connections and the session bound to each
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Bind the session to its connection, replacing any previous binding.
    ///
    /// Returns the replaced session.
    async fn bind(&self, session: Arc<Session>) -> Option<Arc<Session>>;

    /// Remove the binding. Returns the removed session, `None` if absent.
    async fn unbind(&self, connection_id: ConnectionId) -> Option<Arc<Session>>;

    async fn lookup(&self, connection_id: ConnectionId) -> Option<Arc<Session>>;

    async fn count(&self) -> usize;
}

/// Rooms and their ordered member lists
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, name: RoomName) -> Result<(), RepositoryError>;

    /// Add the session to the room and record the room on the session.
    ///
    /// A session already in another room leaves it first.
    async fn join(&self, name: &RoomName, session: &Arc<Session>) -> Result<(), RepositoryError>;

    /// Remove the session from its current room and clear its room.
    ///
    /// Returns the room that was left.
    async fn leave(&self, session: &Session) -> Result<RoomName, RepositoryError>;

    /// Snapshot of the room's members in join order.
    async fn members_of(&self, name: &RoomName) -> Result<Vec<Arc<Session>>, RepositoryError>;

    /// Names of all rooms, sorted.
    async fn room_names(&self) -> Vec<RoomName>;

    async fn get_room(&self, name: &RoomName) -> Option<Room>;

    /// Snapshot of all rooms, sorted by name.
    async fn list_rooms(&self) -> Vec<Room>;
}

/// Durable per-room chat log
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Append one record to the room's log.
    async fn append(&self, record: &ChatRecord) -> Result<(), HistoryError>;

    /// Lines of the room's log in write order.
    ///
    /// A room without a log yields an empty stream. Read failures are logged
    /// and end the stream.
    async fn replay(&self, room: &RoomName) -> BoxStream<'static, String>;
}
