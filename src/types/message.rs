use serde::{Deserialize, Serialize};

use crate::types::MessageRole;

/// A single message in a session transcript.
///
/// Messages are immutable once created; rendering is a pure projection of
/// the text, never a mutation of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Who authored the message.
    pub role: MessageRole,
    /// The message text.
    pub text: String,
}

impl Message {
    /// Create a new message with the given role and text.
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }
}
