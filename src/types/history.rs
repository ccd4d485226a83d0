use serde::{Deserialize, Serialize};

/// Request body for the history operation.
///
/// The response is a plain list of messages, oldest first; see
/// [`crate::types::Message`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRequest {
    /// The session whose transcript to fetch.
    pub session_id: String,
}

impl HistoryRequest {
    /// Create a new `HistoryRequest` for the given session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}
