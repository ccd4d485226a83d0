//! Wire types for the document question-answering service.
//!
//! One file per type, mirroring the JSON bodies the service exchanges.

mod health;
mod history;
mod ingest;
mod message;
mod query;
mod role;
mod session;

pub use health::HealthResponse;
pub use history::HistoryRequest;
pub use ingest::{IngestRequest, IngestResponse};
pub use message::Message;
pub use query::{QueryRequest, QueryResponse};
pub use role::MessageRole;
pub use session::{CreateSessionRequest, CreateSessionResponse};
