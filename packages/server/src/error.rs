//! Server startup and runtime errors.

use thiserror::Error;

use crate::domain::ValueObjectError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid operator room: {0}")]
    InvalidOperatorRoom(#[source] ValueObjectError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
