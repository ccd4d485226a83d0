//! Logging trait for client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log all API interactions passing through the [`DocQa`]
//! client.
//!
//! [`DocQa`]: crate::DocQa

use crate::types::{CreateSessionResponse, IngestResponse, Message, QueryResponse};

/// A trait for logging client operations.
///
/// Implement this trait to capture and record each completed API
/// interaction. The client invokes the matching method once per successful
/// call with the parsed response.
pub trait ClientLogger: Send + Sync {
    /// Log a completed ingest.
    fn log_ingest(&self, document_id: &str, response: &IngestResponse);

    /// Log a completed session creation.
    fn log_create_session(&self, document_id: &str, response: &CreateSessionResponse);

    /// Log a completed query.
    fn log_query(&self, session_id: &str, response: &QueryResponse);

    /// Log a completed history fetch.
    fn log_history(&self, session_id: &str, messages: &[Message]);
}
