//! Interactive chat application for asking questions about a document.
//!
//! This binary provides a REPL interface against a remote document
//! question-answering service: upload a document, ask questions about it,
//! start fresh chats, and replay past sessions.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! askdoc-chat
//!
//! # Point at a deployed service
//! askdoc-chat --base-url https://qa.example.com
//!
//! # Upload a document at startup
//! askdoc-chat --open report.pdf
//!
//! # Disable colors (useful for piping output)
//! askdoc-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/open <path>` - Upload a document and start a session
//! - `/new` - Start a fresh chat against the current document
//! - `/history` - List past sessions
//! - `/load <n>` - Replay session n from the history list
//! - `/health` - Check that the service is reachable
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use askdoc::DocQa;
use askdoc::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, HistoryStore, PlainTextRenderer, Renderer,
    help_text, parse_command,
};

/// Main entry point for the askdoc-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("askdoc-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = DocQa::with_options(config.base_url.clone(), Some(config.timeout))?;
    let mut session = ChatSession::new(client.clone(), config.clone());

    // Flag for interrupt handling during a running reveal
    let interrupted = Arc::new(AtomicBool::new(false));
    let mut renderer =
        PlainTextRenderer::with_color(use_color).with_interrupt(interrupted.clone());

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("askdoc chat (service: {})", client.base_url());
    println!("Type /open <path> to upload a document, /help for commands\n");

    if let Some(path) = config.open.clone() {
        if let Err(e) = session.open_document_path(&path, &mut renderer).await {
            renderer.print_error(&e.to_string());
        }
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Open(path) => {
                            if let Err(e) = session.open_document_path(&path, &mut renderer).await
                            {
                                renderer.print_error(&e.to_string());
                            }
                        }
                        ChatCommand::New => {
                            if let Err(e) = session.start_new_chat(&mut renderer).await {
                                renderer.print_error(&e.to_string());
                            }
                        }
                        ChatCommand::History => {
                            print_history(session.history());
                        }
                        ChatCommand::Load(index) => {
                            match session.history().get(index).cloned() {
                                Some(entry) => {
                                    renderer.print_info(&format!("Replaying {}", entry.label));
                                    if let Err(e) =
                                        session.load_history(&entry, &mut renderer).await
                                    {
                                        renderer.print_error(&e.to_string());
                                    }
                                }
                                None => {
                                    renderer.print_error(&format!(
                                        "no history entry {index}; try /history"
                                    ));
                                }
                            }
                        }
                        ChatCommand::Health => match client.health().await {
                            Ok(health) => {
                                renderer.print_info(&format!("Service status: {}", health.status))
                            }
                            Err(e) => renderer.print_error(&e.to_string()),
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular input - ask it as a question
                if let Err(e) = session.ask(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_history(history: &HistoryStore) {
    if history.is_empty() {
        println!("    No past sessions.");
        return;
    }
    println!("    Past sessions (most recent first):");
    for (index, entry) in history.entries().enumerate() {
        println!("      [{index}] {} (session {})", entry.label, entry.session_id);
    }
}
