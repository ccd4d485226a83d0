// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod render;
pub mod types;

mod observability;

// Re-exports
pub use client::DocQa;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer, RevealGuard};
pub use types::*;
