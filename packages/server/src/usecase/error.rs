//! UseCase 層のエラー定義
//!
//! `Display` の文字列はそのまま error イベントの content として
//! 送信元の接続に返されます。

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// ユーザーに返すエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    #[error("Username already exists")]
    DuplicateIdentity,

    #[error("Invalid username or password")]
    InvalidCredential,

    #[error("Room already exists")]
    RoomExists,

    #[error("Room does not exist")]
    RoomNotFound,

    #[error("You are not in a room")]
    NotInRoom,

    #[error("You are not signed in")]
    NotSignedIn,

    #[error("{0}")]
    InvalidInput(#[from] ValueObjectError),
}

impl From<RepositoryError> for UseCaseError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::DuplicateIdentity(_) => UseCaseError::DuplicateIdentity,
            RepositoryError::InvalidCredential => UseCaseError::InvalidCredential,
            RepositoryError::RoomExists(_) => UseCaseError::RoomExists,
            RepositoryError::RoomNotFound(_) => UseCaseError::RoomNotFound,
            RepositoryError::NotInRoom => UseCaseError::NotInRoom,
        }
    }
}
