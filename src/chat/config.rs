//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

/// Default tick interval for the progressive reveal, in milliseconds.
const DEFAULT_TICK_MS: u64 = 10;

/// Default request timeout, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the askdoc-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the question-answering service.
    #[arrrg(optional, "Service base URL (default: $ASKDOC_BASE_URL)", "URL")]
    pub base_url: Option<String>,

    /// Document to upload at startup.
    #[arrrg(optional, "Document to upload at startup", "PATH")]
    pub open: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Reveal tick interval in milliseconds.
    #[arrrg(optional, "Answer reveal tick in milliseconds (default: 10)", "MS")]
    pub tick_ms: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the service, if overridden on the command line.
    pub base_url: Option<String>,

    /// Document to upload at startup, if any.
    pub open: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// Tick interval for the progressive answer reveal.
    pub reveal_tick: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Timeout: 60 seconds
    /// - Reveal tick: 10 milliseconds
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            open: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reveal_tick: Duration::from_millis(DEFAULT_TICK_MS),
            use_color: true,
        }
    }

    /// Sets the service base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the reveal tick interval.
    pub fn with_reveal_tick(mut self, tick: Duration) -> Self {
        self.reveal_tick = tick;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            base_url: args.base_url,
            open: args.open,
            timeout: Duration::from_secs(args.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            reveal_tick: Duration::from_millis(args.tick_ms.unwrap_or(DEFAULT_TICK_MS).max(1)),
            use_color: !args.no_color,
        }
    }
}
