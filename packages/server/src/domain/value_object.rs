//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of usernames and room names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a chat message.
pub const MAX_MESSAGE_LENGTH: usize = 10000;

/// Username reserved for operator broadcasts.
pub const OPERATOR_USERNAME: &str = "server";

/// Username value object.
///
/// The unique key of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty, longer than [`MAX_NAME_LENGTH`],
    /// contains control characters or equals the reserved operator name.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::UsernameTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        if name.chars().any(char::is_control) {
            return Err(ValueObjectError::UsernameInvalidCharacter(name));
        }
        if name == OPERATOR_USERNAME {
            return Err(ValueObjectError::UsernameReserved(name));
        }
        Ok(Self(name))
    }

    /// The reserved identity used as the sender of operator broadcasts.
    pub fn operator() -> Self {
        Self(OPERATOR_USERNAME.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credential value object.
///
/// Stored and compared as plain text. Only the identity repository compares
/// credentials, so a hashed representation can replace this one there.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Create a new Credential.
    pub fn new(secret: String) -> Result<Self, ValueObjectError> {
        if secret.is_empty() {
            return Err(ValueObjectError::CredentialEmpty);
        }
        Ok(Self(secret))
    }

    /// Exact match against another credential.
    pub fn matches(&self, other: &Credential) -> bool {
        self.0 == other.0
    }
}

impl TryFrom<String> for Credential {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Room name value object.
///
/// Room names end up in history file names, so path separators and control
/// characters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::RoomNameTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        if name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(ValueObjectError::RoomNameInvalidCharacter(name));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Represents the content of a chat message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Arguments
    ///
    /// * `content` - The message content string
    ///
    /// # Returns
    ///
    /// A Result containing the MessageContent or an error if validation fails
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.chars().count();
        if len > MAX_MESSAGE_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_MESSAGE_LENGTH,
                actual: len,
            });
        }
        if content.contains(['\n', '\r']) {
            return Err(ValueObjectError::MessageContentLineBreak);
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one live transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Timestamp for the current instant.
    pub fn now() -> Self {
        Self(hiroba_shared::time::get_jst_timestamp())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_new_success() {
        // テスト項目: 有効なユーザー名を作成できる
        // given (前提条件):
        let name = "alice".to_string();

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // when (操作):
        let result = Username::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_new_too_long_fails() {
        // テスト項目: 101 文字以上のユーザー名は作成できない
        // given (前提条件):
        let name = "a".repeat(101);

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UsernameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_username_reserved_operator_fails() {
        // テスト項目: オペレーター用の予約名 "server" はユーザー名にできない
        // when (操作):
        let result = Username::new("server".to_string());

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UsernameReserved("server".to_string())
        );
        assert_eq!(Username::operator().as_str(), "server");
    }

    #[test]
    fn test_username_control_character_fails() {
        // テスト項目: 改行などの制御文字を含むユーザー名は作成できない
        // given (前提条件):
        let name = "alice\n[lobby] bob".to_string();

        // when (操作):
        let result = Username::new(name.clone());

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UsernameInvalidCharacter(name)
        );
    }

    #[test]
    fn test_credential_matches_exactly() {
        // テスト項目: 認証情報は完全一致のみで一致と判定される
        // given (前提条件):
        let credential = Credential::new("pw1".to_string()).unwrap();

        // then (期待する結果):
        assert!(credential.matches(&Credential::new("pw1".to_string()).unwrap()));
        assert!(!credential.matches(&Credential::new("PW1".to_string()).unwrap()));
        assert!(!credential.matches(&Credential::new("pw1 ".to_string()).unwrap()));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        // テスト項目: Debug 出力に認証情報が含まれない
        // given (前提条件):
        let credential = Credential::new("secret".to_string()).unwrap();

        // when (操作):
        let debug = format!("{:?}", credential);

        // then (期待する結果):
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_room_name_new_success() {
        // テスト項目: 有効なルーム名を作成できる
        // when (操作):
        let result = RoomName::new("lobby".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "lobby");
    }

    #[test]
    fn test_room_name_empty_fails() {
        // テスト項目: 空のルーム名は作成できない
        // when (操作):
        let result = RoomName::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_room_name_path_separator_fails() {
        // テスト項目: パス区切り文字を含むルーム名は作成できない
        // when (操作):
        let slash = RoomName::new("../etc".to_string());
        let backslash = RoomName::new("a\\b".to_string());
        let newline = RoomName::new("a\nb".to_string());

        // then (期待する結果):
        assert!(matches!(
            slash,
            Err(ValueObjectError::RoomNameInvalidCharacter(_))
        ));
        assert!(matches!(
            backslash,
            Err(ValueObjectError::RoomNameInvalidCharacter(_))
        ));
        assert!(matches!(
            newline,
            Err(ValueObjectError::RoomNameInvalidCharacter(_))
        ));
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空のメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 10001 文字以上のメッセージ内容は作成できない
        // given (前提条件):
        let content = "a".repeat(10001);

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }

    #[test]
    fn test_message_content_line_break_fails() {
        // テスト項目: 改行を含むメッセージ内容は作成できない（履歴は 1 行 1 件）
        // when (操作):
        let lf = MessageContent::new("hi\n[lobby] bob: I owe alice $100".to_string());
        let cr = MessageContent::new("hi\rthere".to_string());

        // then (期待する結果):
        assert_eq!(lf.unwrap_err(), ValueObjectError::MessageContentLineBreak);
        assert_eq!(cr.unwrap_err(), ValueObjectError::MessageContentLineBreak);
    }

    #[test]
    fn test_connection_id_is_unique() {
        // テスト項目: ConnectionId は毎回異なる値が生成される
        // when (操作):
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }
}
