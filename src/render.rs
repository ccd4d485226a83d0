//! Output rendering for the chat surface.
//!
//! This module provides the renderer trait, a plain-text implementation for
//! the terminal, and the progressive reveal used for assistant answers: the
//! text is already fully known and is disclosed a character at a time on a
//! fixed tick, through the same formatter immediate rendering uses.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::observability;

/// ANSI escape code for dim text (used for informational messages).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for cyan text (used for the user echo).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering transcript output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, plain text without styling for piping, or a recording
/// renderer in tests.
pub trait Renderer: Send {
    /// Render a user message in full, atomically.
    fn print_user(&mut self, text: &str);

    /// Print a chunk of assistant text.
    ///
    /// Called once with the full text for immediate rendering, or
    /// repeatedly with growing coverage during a progressive reveal.
    fn print_assistant_text(&mut self, text: &str);

    /// Called when a message is complete.
    ///
    /// Used to ensure proper newlines and cleanup after rendering.
    fn finish_response(&mut self);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Returns true if a running reveal should be interrupted.
    fn should_interrupt(&self) -> bool {
        false
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    interrupted: Option<Arc<AtomicBool>>,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            interrupted: None,
        }
    }

    /// Attaches an interrupt flag to the renderer.
    pub fn with_interrupt(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(interrupted);
        self
    }

    /// Flushes stdout to ensure immediate display of revealed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_user(&mut self, text: &str) {
        if self.use_color {
            println!("{ANSI_CYAN}You:{ANSI_RESET} {text}");
        } else {
            println!("You: {text}");
        }
        self.flush();
    }

    fn print_assistant_text(&mut self, text: &str) {
        print!("{text}");
        self.flush();
    }

    fn finish_response(&mut self) {
        println!();
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        if self.use_color {
            println!("{ANSI_DIM}{info}{ANSI_RESET}");
        } else {
            println!("{info}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn should_interrupt(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Cancellation handle for a progressive reveal.
///
/// At most one reveal may run against a message view; starting a new one
/// cancels the prior handle first. Cancellation does not truncate the
/// message: the remainder is emitted immediately in one chunk, so the final
/// rendered content always equals the immediate rendering.
#[derive(Clone, Debug, Default)]
pub struct RevealGuard {
    cancelled: Arc<AtomicBool>,
}

impl RevealGuard {
    /// Creates a fresh, uncancelled guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the reveal holding this guard.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Progressively reveal `text` through `renderer`.
///
/// One character of the text is disclosed per tick; the revealed prefix is
/// monotonically non-decreasing and ends equal to the full text. If the
/// guard is cancelled, or the renderer reports an interrupt, the remainder
/// is flushed in a single chunk and the reveal ends early.
pub async fn reveal(
    renderer: &mut dyn Renderer,
    text: &str,
    tick: Duration,
    guard: &RevealGuard,
) {
    // tokio::time::interval rejects a zero period.
    let tick = tick.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(tick);
    let mut revealed = 0;

    while revealed < text.len() {
        interval.tick().await;

        if guard.is_cancelled() || renderer.should_interrupt() {
            observability::REVEAL_CANCELLED.click();
            renderer.print_assistant_text(&text[revealed..]);
            break;
        }

        let next = text[revealed..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        renderer.print_assistant_text(&text[revealed..revealed + next]);
        revealed += next;
        observability::REVEAL_TICKS.click();
    }

    renderer.finish_response();
}
