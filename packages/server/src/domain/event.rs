//! Events exchanged between connections and the router.

use super::value_object::{RoomName, Username};

/// Kind of an inbound or outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
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
}

/// An event in domain form, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub sender: String,
    pub target: Option<String>,
    pub content: String,
    pub room: Option<String>,
}

impl Event {
    /// Create an event with empty sender and content
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            sender: String::new(),
            target: None,
            content: String::new(),
            room: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Success notification for the originating connection.
    pub fn info(content: impl Into<String>) -> Self {
        Self::new(EventKind::Info).with_content(content)
    }

    /// Failure notification for the originating connection.
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(EventKind::Error).with_content(content)
    }

    /// One replayed history line.
    pub fn history(line: impl Into<String>) -> Self {
        Self::new(EventKind::History).with_content(line)
    }
}

/// How a chat message selects its recipients within a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatKind {
    Broadcast,
    /// Delivered to every session of the target identity and of the sender
    Direct { target: String },
}

impl ChatKind {
    /// Whether a room member with identity `recipient` receives a message
    /// sent by `sender`.
    pub fn includes(&self, sender: &Username, recipient: &Username) -> bool {
        match self {
            ChatKind::Broadcast => true,
            ChatKind::Direct { target } => {
                recipient.as_str() == target.as_str() || recipient == sender
            }
        }
    }

    pub fn event_kind(&self) -> EventKind {
        match self {
            ChatKind::Broadcast => EventKind::Broadcast,
            ChatKind::Direct { .. } => EventKind::Dm,
        }
    }

    /// Outbound chat event tagged with the room it was routed through.
    pub fn to_event(&self, sender: &Username, content: &str, room: &RoomName) -> Event {
        let event = Event::new(self.event_kind())
            .with_sender(sender.as_str())
            .with_content(content)
            .with_room(room.as_str());
        match self {
            ChatKind::Broadcast => event,
            ChatKind::Direct { target } => event.with_target(target.as_str()),
        }
    }
}
