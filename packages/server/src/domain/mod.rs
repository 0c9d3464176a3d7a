//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod value_object;

pub use entity::{ChatRecord, ConnectionHandle, Identity, Room, Session};
pub use error::{DeliveryError, HistoryError, RepositoryError, ValueObjectError};
pub use event::{ChatKind, Event, EventKind};
pub use repository::{ConnectionRepository, HistoryLog, IdentityRepository, RoomRepository};
#[cfg(test)]
pub use repository::MockHistoryLog;
pub use value_object::{
    ConnectionId, Credential, MessageContent, RoomName, Timestamp, Username,
};
