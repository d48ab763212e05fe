//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum number of characters in a display name.
pub const MAX_USERNAME_CHARS: usize = 20;

/// Maximum number of characters in a message body.
pub const MAX_CONTENT_CHARS: usize = 500;

/// Display name value object.
///
/// Represents the unique identity of an online user. Leading and trailing
/// whitespace is trimmed and anything beyond 20 characters is cut off.
/// Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw client input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The display name as received on the wire
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if the trimmed name is empty
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let name: String = trimmed.chars().take(MAX_USERNAME_CHARS).collect();
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

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Represents the body of a direct message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent from raw client input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The message body as received on the wire
    ///
    /// # Returns
    ///
    /// A Result containing the MessageContent or an error if the trimmed
    /// body is empty or longer than 500 characters
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = trimmed.chars().count();
        if len > MAX_CONTENT_CHARS {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_CONTENT_CHARS,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
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

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical unordered pairing of two usernames.
///
/// `(A, B)` and `(B, A)` resolve to the same key, so the conversation
/// history between two users is independent of who initiated it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey(String, String);

impl ConversationKey {
    /// Create a canonical key for the pair. The two names are stored in
    /// lexicographic order.
    pub fn new(a: &Username, b: &Username) -> Self {
        if a.as_str() <= b.as_str() {
            Self(a.as_str().to_string(), b.as_str().to_string())
        } else {
            Self(b.as_str().to_string(), a.as_str().to_string())
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
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
        let raw = "Alice";

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_username_new_trims_whitespace() {
        // テスト項目: 前後の空白は取り除かれる
        // given (前提条件):
        let raw = "  Alice  ";

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_username_new_truncates_to_20_chars() {
        // テスト項目: 21 文字以上のユーザー名は 20 文字に切り詰められる
        // given (前提条件):
        let raw = "a".repeat(25);

        // when (操作):
        let result = Username::new(&raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "a".repeat(20));
    }

    #[test]
    fn test_username_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // when (操作):
        let result = Username::new("");

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_new_whitespace_only_fails() {
        // テスト項目: 空白のみのユーザー名は作成できない
        // when (操作):
        let result = Username::new("   ");

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_case_sensitive_equality() {
        // テスト項目: ユーザー名の比較は大文字小文字を区別する
        // given (前提条件):
        let lower = Username::new("alice").unwrap();
        let upper = Username::new("Alice").unwrap();

        // then (期待する結果):
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_message_content_new_success() {
        // テスト項目: 有効なメッセージ内容を作成できる
        // when (操作):
        let result = MessageContent::new("Hello, world!");

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空白のみのメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new("   ");

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 501 文字以上のメッセージ内容は作成できない
        // given (前提条件):
        let content = "a".repeat(501);

        // when (操作):
        let result = MessageContent::new(&content);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: 500,
                actual: 501
            }
        );
    }

    #[test]
    fn test_message_content_new_max_length_succeeds() {
        // テスト項目: ちょうど 500 文字のメッセージ内容は作成できる
        // given (前提条件):
        let content = "a".repeat(500);

        // when (操作):
        let result = MessageContent::new(&content);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_conversation_key_is_symmetric() {
        // テスト項目: (A, B) と (B, A) は同じキーになる
        // given (前提条件):
        let alice = Username::new("Alice").unwrap();
        let bob = Username::new("Bob").unwrap();

        // when (操作):
        let key_ab = ConversationKey::new(&alice, &bob);
        let key_ba = ConversationKey::new(&bob, &alice);

        // then (期待する結果):
        assert_eq!(key_ab, key_ba);
    }

    #[test]
    fn test_conversation_key_distinct_pairs_differ() {
        // テスト項目: 異なるペアは異なるキーになる
        // given (前提条件):
        let alice = Username::new("Alice").unwrap();
        let bob = Username::new("Bob").unwrap();
        let carol = Username::new("Carol").unwrap();

        // then (期待する結果):
        assert_ne!(
            ConversationKey::new(&alice, &bob),
            ConversationKey::new(&alice, &carol)
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
