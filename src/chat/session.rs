//! Core session management.
//!
//! This module provides the `ChatSession` struct which owns the active
//! session, its transcript, and the history of past sessions, and drives
//! the upload, new-chat, ask, and history-replay sequences against the
//! client.

use crate::DocQa;
use crate::chat::busy::{BusyIndicator, OpPermit, OpSlot};
use crate::chat::config::ChatConfig;
use crate::chat::history::{HistoryEntry, HistoryStore};
use crate::error::{Error, Result};
use crate::observability;
use crate::render::{Renderer, RevealGuard, reveal};
use crate::types::{Message, MessageRole};

/// Rendered in place of an answer the service declined to produce.
pub const NO_ANSWER_FALLBACK: &str = "No answer.";

/// A session that manages conversation state against one ingested document.
///
/// Exactly one session is active at a time. The active identifiers are
/// private; a session value is replaced on upload, new-chat, or history
/// selection, never mutated piecemeal from outside.
pub struct ChatSession {
    client: DocQa,
    config: ChatConfig,
    session_id: Option<String>,
    document_id: Option<String>,
    transcript: Vec<Message>,
    history: HistoryStore,
    busy: BusyIndicator,
    ops: OpSlot,
    reveal_guard: Option<RevealGuard>,
}

impl ChatSession {
    /// Creates a new session controller with the given client and
    /// configuration. No session exists until a document is uploaded.
    pub fn new(client: DocQa, config: ChatConfig) -> Self {
        Self {
            client,
            config,
            session_id: None,
            document_id: None,
            transcript: Vec::new(),
            history: HistoryStore::new(),
            busy: BusyIndicator::new(),
            ops: OpSlot::new(),
            reveal_guard: None,
        }
    }

    /// Returns the active session id, if a session exists.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns the document id the active session answers against.
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Returns the transcript of the active session, oldest first.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Returns the history of past sessions, most recent first.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Returns the busy indicator shared with in-flight requests.
    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn acquire_op(&self) -> Result<OpPermit> {
        self.ops
            .try_acquire()
            .ok_or_else(|| Error::busy("another operation is already in flight"))
    }

    fn cancel_reveal(&mut self) {
        if let Some(prior) = self.reveal_guard.take() {
            prior.cancel();
        }
    }

    fn push_and_render(&mut self, renderer: &mut dyn Renderer, message: Message) {
        match message.role {
            MessageRole::User => renderer.print_user(&message.text),
            MessageRole::Assistant => {
                renderer.print_assistant_text(&message.text);
                renderer.finish_response();
            }
        }
        self.transcript.push(message);
    }

    /// Uploads a document and opens a session against it.
    ///
    /// Runs the two-step sequence in strict order: ingest, then
    /// create-session. If ingest fails the whole sequence aborts and any
    /// prior active session is left untouched. On success the active
    /// session is replaced, the transcript cleared, a confirmation naming
    /// the chunk count rendered, and one history entry recorded.
    pub async fn open_document(
        &mut self,
        document_id: &str,
        bytes: &[u8],
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let _permit = self.acquire_op()?;
        self.cancel_reveal();

        let ingest = {
            let _busy = self.busy.begin();
            self.client.ingest_document(document_id, bytes).await?
        };

        let session = {
            let _busy = self.busy.begin();
            self.client.create_session(document_id).await?
        };

        self.session_id = Some(session.session_id.clone());
        self.document_id = Some(document_id.to_string());
        self.transcript.clear();
        observability::SESSIONS_CREATED.click();

        let note = Message::assistant(format!(
            "Document processed ({} chunks indexed). Ask anything from it.",
            ingest.chunk_count
        ));
        self.push_and_render(renderer, note);

        self.history.record(HistoryEntry::new(
            document_id,
            session.session_id,
            document_id,
        ));
        Ok(())
    }

    /// Reads a document from disk and opens a session against it.
    ///
    /// The file name becomes the document id. A missing or unreadable file
    /// is a local error; no network call is made.
    pub async fn open_document_path(
        &mut self,
        path: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let document_id = std::path::Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| Error::validation("path has no file name", Some("path".to_string())))?;
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("failed to read {path}"), e))?;
        self.open_document(&document_id, &bytes, renderer).await
    }

    /// Opens a fresh session against the already-uploaded document.
    ///
    /// Fails fast if no document has been uploaded yet. Never re-ingests.
    pub async fn start_new_chat(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(document_id) = self.document_id.clone() else {
            return Err(Error::validation(
                "upload a document first",
                Some("document".to_string()),
            ));
        };
        let _permit = self.acquire_op()?;
        self.cancel_reveal();

        let session = {
            let _busy = self.busy.begin();
            self.client.create_session(&document_id).await?
        };

        self.session_id = Some(session.session_id.clone());
        self.transcript.clear();
        observability::SESSIONS_CREATED.click();

        let note = Message::assistant("New chat started. Ask your questions.");
        self.push_and_render(renderer, note);

        self.history.record(HistoryEntry::new(
            document_id.as_str(),
            session.session_id,
            document_id.as_str(),
        ));
        Ok(())
    }

    /// Submits a question against the active session.
    ///
    /// Fails fast if no session exists. Empty or whitespace-only input is
    /// a silent no-op: nothing is appended and no network call is made.
    /// The question renders immediately as a user message; the answer (or
    /// the fallback when the service produced none) is revealed
    /// progressively, cancelling any reveal still running.
    pub async fn ask(&mut self, question: &str, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(session_id) = self.session_id.clone() else {
            return Err(Error::validation(
                "upload a document first",
                Some("session".to_string()),
            ));
        };
        let question = question.trim();
        if question.is_empty() {
            return Ok(());
        }
        let _permit = self.acquire_op()?;
        self.cancel_reveal();

        observability::QUESTIONS_ASKED.click();
        self.push_and_render(renderer, Message::user(question));

        let response = {
            let _busy = self.busy.begin();
            self.client.submit_question(&session_id, question).await?
        };

        let answer = response.answer.unwrap_or_else(|| {
            observability::EMPTY_ANSWERS.click();
            NO_ANSWER_FALLBACK.to_string()
        });
        let message = Message::assistant(answer);
        self.transcript.push(message.clone());

        let guard = RevealGuard::new();
        self.reveal_guard = Some(guard.clone());
        reveal(renderer, &message.text, self.config.reveal_tick, &guard).await;
        Ok(())
    }

    /// Replays a past session from the history sidebar.
    ///
    /// The entry's session id and document id both become active, the
    /// transcript is cleared, and the remote transcript is rendered
    /// immediately in order. On failure the transcript remains empty and
    /// the error is non-fatal.
    pub async fn load_history(
        &mut self,
        entry: &HistoryEntry,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let _permit = self.acquire_op()?;
        self.cancel_reveal();

        self.session_id = Some(entry.session_id.clone());
        self.document_id = Some(entry.document_id.clone());
        self.transcript.clear();

        let messages = {
            let _busy = self.busy.begin();
            self.client.fetch_history(&entry.session_id).await?
        };
        observability::HISTORY_LOADS.click();

        for message in messages {
            self.push_and_render(renderer, message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingRenderer;

    fn unreachable_session() -> ChatSession {
        // Port 1 is never listening; any network call fails fast.
        let client = DocQa::new(Some("http://127.0.0.1:1/".to_string())).unwrap();
        ChatSession::new(client, ChatConfig::new())
    }

    #[test]
    fn new_session_has_no_identifiers() {
        let session = unreachable_session();
        assert!(session.session_id().is_none());
        assert!(session.document_id().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.history().is_empty());
        assert!(!session.busy().is_busy());
    }

    #[tokio::test]
    async fn ask_without_session_is_validation_error() {
        let mut session = unreachable_session();
        let mut renderer = RecordingRenderer::default();

        let err = session.ask("What is X?", &mut renderer).await.unwrap_err();
        assert!(err.is_validation());
        // Transport never invoked, nothing rendered or appended.
        assert!(session.transcript().is_empty());
        assert!(renderer.user.is_empty());
    }

    #[tokio::test]
    async fn new_chat_without_upload_is_validation_error() {
        let mut session = unreachable_session();
        let mut renderer = RecordingRenderer::default();

        let err = session.start_new_chat(&mut renderer).await.unwrap_err();
        assert!(err.is_validation());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn failed_ingest_leaves_state_untouched() {
        let mut session = unreachable_session();
        let mut renderer = RecordingRenderer::default();

        let err = session
            .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
            .await
            .unwrap_err();
        assert!(err.is_connection() || err.is_timeout());

        assert!(session.session_id().is_none());
        assert!(session.document_id().is_none());
        assert!(session.history().is_empty());
        assert!(session.transcript().is_empty());
        // The busy indicator is not left stuck on after the abort.
        assert!(!session.busy().is_busy());
    }

    #[tokio::test]
    async fn open_document_path_missing_file_is_local() {
        let mut session = unreachable_session();
        let mut renderer = RecordingRenderer::default();

        let err = session
            .open_document_path("/no/such/file.pdf", &mut renderer)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(session.history().is_empty());
    }
}
