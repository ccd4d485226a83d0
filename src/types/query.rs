use serde::{Deserialize, Serialize};

/// Request body for the query operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The natural-language question.
    pub question: String,
    /// The session the question is asked in.
    pub session_id: String,
}

impl QueryRequest {
    /// Create a new `QueryRequest`.
    pub fn new(session_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            session_id: session_id.into(),
        }
    }
}

/// Response body for a query.
///
/// An absent answer is a valid response, not an error; callers substitute a
/// fallback string when rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    /// The generated answer, if one was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl QueryResponse {
    /// Create a new `QueryResponse` with the given answer.
    pub fn new(answer: Option<String>) -> Self {
        Self { answer }
    }
}
