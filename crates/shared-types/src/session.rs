//! Conversational state carried from an analysis into follow-up chat

use std::fmt;

use chrono::{DateTime, Utc};

/// Backend API key. Never printed in full.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(****)")
        }
    }
}

/// Extracted document text plus the credentials it was analyzed with.
///
/// Populated wholesale after a successful analysis and only ever read by
/// chat turns. Lives in memory for the session; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub submittal_text: String,
    pub spec_text: String,
    pub api_key: ApiKey,
    pub model: String,
}

/// One line of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChatEntry {
    pub content: String,
    pub is_user: bool,
    pub is_error: bool,
    pub timestamp: DateTime<Utc>, // Taken at append time
}

impl ChatEntry {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            is_error: false,
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            is_error: false,
            timestamp,
        }
    }

    pub fn error(message: impl fmt::Display, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: format!("Error: {}", message),
            is_user: false,
            is_error: true,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_trimmed() {
        let key = ApiKey::new("  sk-test  ");
        assert_eq!(key.expose(), "sk-test");
        assert!(!key.is_empty());
        assert!(ApiKey::new("   ").is_empty());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-very-secret");
        let printed = format!("{:?}", key);
        assert!(!printed.contains("secret"));
        assert_eq!(printed, "ApiKey(****)");
    }

    #[test]
    fn test_context_debug_does_not_leak_key() {
        let ctx = SessionContext {
            submittal_text: "geotextile".to_string(),
            spec_text: "section 31".to_string(),
            api_key: ApiKey::new("sk-very-secret"),
            model: "gpt-4o".to_string(),
        };
        assert!(!format!("{:?}", ctx).contains("sk-very-secret"));
    }

    #[test]
    fn test_error_entry_is_prefixed() {
        let entry = ChatEntry::error("Chat failed: timeout", Utc::now());
        assert_eq!(entry.content, "Error: Chat failed: timeout");
        assert!(entry.is_error);
        assert!(!entry.is_user);
    }
}
