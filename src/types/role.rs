use serde::{Deserialize, Serialize};

/// Role of a message author.
///
/// The service spells the assistant role `"ai"` on the wire; `"assistant"`
/// is accepted on input for compatibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageRole {
    /// A message authored by the user.
    #[serde(rename = "user")]
    User,
    /// A message authored by the answering service.
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
}

impl MessageRole {
    /// Returns the wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "ai",
        }
    }
}
