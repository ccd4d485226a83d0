//! Slash command parsing for the chat binary.
//!
//! This module handles parsing of special commands that start with `/`,
//! letting users drive the session without submitting a question.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Upload a document from a file path and open a session against it.
    Open(String),

    /// Start a fresh chat against the already-uploaded document.
    New,

    /// List past sessions, most recent first.
    History,

    /// Replay a past session by its index in the history list.
    Load(usize),

    /// Probe the service's health endpoint.
    Health,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a question.
///
/// # Examples
///
/// ```
/// # use askdoc::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/open report.pdf").is_some());
/// assert!(parse_command("What is X?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "open" => match argument {
            Some(path) => ChatCommand::Open(path.to_string()),
            None => ChatCommand::Invalid("/open requires a file path".to_string()),
        },
        "new" => ChatCommand::New,
        "history" => ChatCommand::History,
        "load" => match argument.map(str::parse::<usize>) {
            Some(Ok(index)) => ChatCommand::Load(index),
            Some(Err(_)) | None => {
                ChatCommand::Invalid("/load requires a history index".to_string())
            }
        },
        "health" => ChatCommand::Health,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        unknown => ChatCommand::Invalid(format!("unknown command: /{unknown}")),
    };

    Some(result)
}

/// Returns the help text listing available commands.
pub fn help_text() -> &'static str {
    "Commands:\n\
     /open <path>   Upload a document and start a session\n\
     /new           Start a fresh chat against the current document\n\
     /history       List past sessions, most recent first\n\
     /load <n>      Replay session n from the history list\n\
     /health        Check that the service is reachable\n\
     /help          Show this help\n\
     /quit          Exit\n\
     \n\
     Anything else is asked as a question against the current session."
}
