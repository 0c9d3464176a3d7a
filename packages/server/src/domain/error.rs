//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Username '{0}' is reserved")]
    UsernameReserved(String),

    #[error("Username contains an invalid character (got: {0:?})")]
    UsernameInvalidCharacter(String),

    #[error("Password cannot be empty")]
    CredentialEmpty,

    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Room names are used as part of history file names
    #[error("Room name contains an invalid character (got: {0:?})")]
    RoomNameInvalidCharacter(String),

    #[error("Message cannot be empty")]
    MessageContentEmpty,

    #[error("Message cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// History is stored one message per line
    #[error("Message cannot contain line breaks")]
    MessageContentLineBreak,
}

/// Errors returned by the identity, connection and room repositories
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Identity '{0}' already exists")]
    DuplicateIdentity(String),

    /// Unknown user and wrong credential are not distinguished
    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Room '{0}' already exists")]
    RoomExists(String),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Session is not in a room")]
    NotInRoom,
}

/// A push to a recipient connection failed; the transport is gone.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Delivery to connection {connection_id} failed: transport closed")]
pub struct DeliveryError {
    pub connection_id: String,
}

/// Errors from the history log.
///
/// Logged and swallowed by callers; chat delivery never depends on them.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History log unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}
