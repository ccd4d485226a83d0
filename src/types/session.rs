use serde::{Deserialize, Serialize};

/// Request body for the create-session operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSessionRequest {
    /// The document the session will answer questions about.
    pub document_id: String,
}

impl CreateSessionRequest {
    /// Create a new `CreateSessionRequest` for the given document.
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
        }
    }
}

/// Response body for a successful create-session.
///
/// Session creation is atomic: either a session id comes back or the call
/// fails; no partial session is observable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSessionResponse {
    /// Opaque identifier for the new session.
    pub session_id: String,
}

impl CreateSessionResponse {
    /// Create a new `CreateSessionResponse` with the given session id.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}
