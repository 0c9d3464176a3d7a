//! WebSocket event DTOs.
//!
//! Every frame in either direction is one JSON object of the form
//! `{"type": ..., "sender": ..., "target": ..., "content": ..., "room": ...}`.

use serde::{Deserialize, Serialize};

use crate::domain::{Event, EventKind};

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Signup,
    Signin,
    Signout,
    CreateRoom,
    JoinRoom,
    LeaveRoom,
    Broadcast,
    Dm,
    Info,
    Error,
    History,
    /// Any type string this server does not know; such events are ignored
    #[serde(other)]
    Unknown,
}

/// Event record sent and received over the WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub r#type: MessageType,
    #[serde(default)]
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl EventMessage {
    /// Convert to the domain event. Unknown types yield `None`.
    pub fn into_event(self) -> Option<Event> {
        let kind = match self.r#type {
            MessageType::Signup => EventKind::Signup,
            MessageType::Signin => EventKind::Signin,
            MessageType::Signout => EventKind::Signout,
            MessageType::CreateRoom => EventKind::CreateRoom,
            MessageType::JoinRoom => EventKind::JoinRoom,
            MessageType::LeaveRoom => EventKind::LeaveRoom,
            MessageType::Broadcast => EventKind::Broadcast,
            MessageType::Dm => EventKind::Dm,
            MessageType::Info => EventKind::Info,
            MessageType::Error => EventKind::Error,
            MessageType::History => EventKind::History,
            MessageType::Unknown => return None,
        };
        Some(Event {
            kind,
            sender: self.sender,
            target: self.target,
            content: self.content,
            room: self.room,
        })
    }
}

impl From<EventKind> for MessageType {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Signup => MessageType::Signup,
            EventKind::Signin => MessageType::Signin,
            EventKind::Signout => MessageType::Signout,
            EventKind::CreateRoom => MessageType::CreateRoom,
            EventKind::JoinRoom => MessageType::JoinRoom,
            EventKind::LeaveRoom => MessageType::LeaveRoom,
            EventKind::Broadcast => MessageType::Broadcast,
            EventKind::Dm => MessageType::Dm,
            EventKind::Info => MessageType::Info,
            EventKind::Error => MessageType::Error,
            EventKind::History => MessageType::History,
        }
    }
}

impl From<Event> for EventMessage {
    fn from(event: Event) -> Self {
        Self {
            r#type: event.kind.into(),
            sender: event.sender,
            target: event.target,
            content: event.content,
            room: event.room,
        }
    }
}
