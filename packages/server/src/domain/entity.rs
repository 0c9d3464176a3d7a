//! Core domain models for the chat relay.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Notify, mpsc::UnboundedSender};

use super::{
    error::DeliveryError,
    event::Event,
    value_object::{ConnectionId, Credential, MessageContent, RoomName, Timestamp, Username},
};

/// A registered account
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: Username,
    credential: Credential,
    pub created_at: Timestamp,
}

impl Identity {
    pub fn new(username: Username, credential: Credential, created_at: Timestamp) -> Self {
        Self {
            username,
            credential,
            created_at,
        }
    }

    /// Exact credential match
    pub fn verify(&self, credential: &Credential) -> bool {
        self.credential.matches(credential)
    }
}

/// Outbound half of one live transport connection.
///
/// Pushes are queued to the connection's writer task. Once the writer is gone
/// every push fails, which is how dead recipients are detected.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: UnboundedSender<Event>,
    close: Arc<Notify>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, sender: UnboundedSender<Event>) -> Self {
        Self {
            id,
            sender,
            close: Arc::new(Notify::new()),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event for this connection.
    pub fn push(&self, event: Event) -> Result<(), DeliveryError> {
        self.sender.send(event).map_err(|_| DeliveryError {
            connection_id: self.id.to_string(),
        })
    }

    /// Ask the transport task owning this connection to shut it down.
    pub fn close(&self) {
        self.close.notify_one();
    }

    /// Resolves once [`ConnectionHandle::close`] has been called.
    pub async fn closed(&self) {
        self.close.notified().await;
    }
}

/// An authenticated identity bound to one live connection
#[derive(Debug)]
pub struct Session {
    identity: Identity,
    connection: ConnectionHandle,
    /// Only written while the room repository's lock is held. A blocking
    /// lock, so an update never spans an await point.
    current_room: Mutex<Option<RoomName>>,
    pub signed_in_at: Timestamp,
}

impl Session {
    pub fn new(identity: Identity, connection: ConnectionHandle, signed_in_at: Timestamp) -> Self {
        Self {
            identity,
            connection,
            current_room: Mutex::new(None),
            signed_in_at,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn username(&self) -> &Username {
        &self.identity.username
    }

    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    pub fn push(&self, event: Event) -> Result<(), DeliveryError> {
        self.connection.push(event)
    }

    pub fn current_room(&self) -> Option<RoomName> {
        self.room_slot().clone()
    }

    pub fn set_current_room(&self, room: Option<RoomName>) {
        *self.room_slot() = room;
    }

    fn room_slot(&self) -> MutexGuard<'_, Option<RoomName>> {
        // 値の代入だけなので poison されても中身は一貫している
        self.current_room
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A named membership group scoping chat delivery and history
#[derive(Debug, Clone)]
pub struct Room {
    pub name: RoomName,
    /// Members in join order
    pub members: Vec<Arc<Session>>,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            members: Vec::new(),
            created_at,
        }
    }

    /// Append a member. A session that is already a member is not added twice.
    ///
    /// Returns `false` if the session was already present.
    pub fn add_member(&mut self, session: Arc<Session>) -> bool {
        if self.contains(session.connection_id()) {
            return false;
        }
        self.members.push(session);
        true
    }

    /// Remove the member entry of the given connection.
    ///
    /// Returns `false` if no such member exists.
    pub fn remove_member(&mut self, connection_id: ConnectionId) -> bool {
        match self
            .members
            .iter()
            .position(|m| m.connection_id() == connection_id)
        {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.members
            .iter()
            .any(|m| m.connection_id() == connection_id)
    }

    /// Usernames of members in join order
    pub fn member_names(&self) -> Vec<Username> {
        self.members.iter().map(|m| m.username().clone()).collect()
    }
}

/// One persisted chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub room: RoomName,
    pub sender: Username,
    pub content: MessageContent,
}

impl ChatRecord {
    pub fn new(room: RoomName, sender: Username, content: MessageContent) -> Self {
        Self {
            room,
            sender,
            content,
        }
    }

    /// `[<room>] <sender>: <content>` without the trailing newline
    pub fn to_line(&self) -> String {
        format!("[{}] {}: {}", self.room, self.sender, self.content)
    }
}
