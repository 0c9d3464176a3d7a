//! Room-based WebSocket chat relay.
//!
//! Clients sign up, sign in, create and join rooms, and exchange room-wide
//! broadcasts and direct messages. Every chat message is appended to a
//! per-room history file and replayed to new members when they join.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{run, serve};
