//! Chat application module for conversing with an ingested document.
//!
//! This module provides the session orchestration behind the askdoc-chat
//! binary. It supports:
//!
//! - Document upload and session creation in one sequence
//! - Progressive (typewriter) reveal of answers
//! - A navigable history of past sessions with transcript replay
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Session state, transcript, and the operation sequences
//! - [`history`]: The sidebar history of past sessions
//! - [`busy`]: Busy signalling and operation serialization
//! - [`commands`]: Slash command parsing
//!
//! [`config`]: crate::chat::ChatConfig
//! [`session`]: crate::chat::ChatSession
//! [`history`]: crate::chat::HistoryStore
//! [`busy`]: crate::chat::BusyIndicator
//! [`commands`]: crate::chat::parse_command

mod busy;
mod commands;
mod config;
mod history;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer, RevealGuard, reveal};
pub use busy::{BusyGuard, BusyIndicator, OpPermit, OpSlot};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use history::{HistoryEntry, HistoryStore};
pub use session::{ChatSession, NO_ANSWER_FALLBACK};
