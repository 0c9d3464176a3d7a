//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::domain::Room;

/// Room with its current members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub name: String,
    /// Usernames in join order
    pub members: Vec<String>,
    pub created_at: String, // ISO 8601
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            members: room
                .member_names()
                .into_iter()
                .map(|name| name.into_string())
                .collect(),
            created_at: hiroba_shared::time::timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}
