//! End-to-end session flow tests against a minimal in-process HTTP server
//! (no mocks): upload, ask, new chat, history replay, and the failure
//! paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use askdoc::chat::{ChatConfig, ChatSession, HistoryEntry, NO_ANSWER_FALLBACK};
use askdoc::{DocQa, Message, Renderer};

/// Renderer that records everything it is asked to display.
#[derive(Default)]
struct RecordingRenderer {
    user: Vec<String>,
    assistant_chunks: Vec<String>,
    errors: Vec<String>,
}

impl RecordingRenderer {
    fn assistant_text(&self) -> String {
        self.assistant_chunks.concat()
    }
}

impl Renderer for RecordingRenderer {
    fn print_user(&mut self, text: &str) {
        self.user.push(text.to_string());
    }

    fn print_assistant_text(&mut self, text: &str) {
        self.assistant_chunks.push(text.to_string());
    }

    fn finish_response(&mut self) {}

    fn print_info(&mut self, _info: &str) {}

    fn print_error(&mut self, error: &str) {
        self.errors.push(error.to_string());
    }
}

/// Behavior knobs for the canned service.
#[derive(Clone, Copy, Default)]
struct ServiceBehavior {
    /// Fail ingests with a 500 once this many have succeeded.
    fail_ingest_after: Option<usize>,
    /// Answer every query with an empty body (no answer produced).
    empty_answer: bool,
}

#[derive(Default)]
struct ServiceState {
    sessions: AtomicUsize,
    ingests: AtomicUsize,
}

/// Spawns a canned question-answering service on an ephemeral port and
/// returns its base URL. Session ids are handed out as s1, s2, ...
async fn spawn_service(behavior: ServiceBehavior) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(ServiceState::default());

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let _ = handle_connection(stream, behavior, state).await;
            });
        }
    });

    format!("http://127.0.0.1:{port}/")
}

async fn handle_connection(
    mut stream: TcpStream,
    behavior: ServiceBehavior,
    state: Arc<ServiceState>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read headers, then the declared body length.
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let (status, body) = match path.as_str() {
        "/ingest" => {
            let n = state.ingests.fetch_add(1, Ordering::SeqCst);
            if behavior.fail_ingest_after.is_some_and(|limit| n >= limit) {
                (
                    "500 Internal Server Error",
                    r#"{"error":"failed to read document"}"#.to_string(),
                )
            } else {
                ("200 OK", r#"{"chunk_count":5}"#.to_string())
            }
        }
        "/create-session" => {
            let n = state.sessions.fetch_add(1, Ordering::SeqCst) + 1;
            ("200 OK", format!(r#"{{"session_id":"s{n}"}}"#))
        }
        "/query" if behavior.empty_answer => ("200 OK", "{}".to_string()),
        "/query" => ("200 OK", r#"{"answer":"X is Y"}"#.to_string()),
        "/history" => (
            "200 OK",
            r#"[{"role":"user","text":"What is X?"},{"role":"ai","text":"X is Y"}]"#.to_string(),
        ),
        "/health" => ("200 OK", r#"{"status":"ok"}"#.to_string()),
        _ => ("404 Not Found", r#"{"error":"no such operation"}"#.to_string()),
    };

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn session_against(base_url: &str) -> ChatSession {
    let client = DocQa::new(Some(base_url.to_string())).unwrap();
    // Fast reveal so tests spend no meaningful time animating.
    let config = ChatConfig::new().with_reveal_tick(Duration::from_millis(1));
    ChatSession::new(client, config)
}

#[tokio::test]
async fn upload_creates_session_and_history_entry() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();

    assert_eq!(session.session_id(), Some("s1"));
    assert_eq!(session.document_id(), Some("a.pdf"));

    // One assistant confirmation mentioning the chunk count.
    assert_eq!(session.transcript().len(), 1);
    assert!(session.transcript()[0].text.contains('5'));
    assert!(renderer.assistant_text().contains('5'));

    let head = session.history().get(0).unwrap();
    assert_eq!(head.label, "a.pdf");
    assert_eq!(head.session_id, "s1");
    assert_eq!(session.history().len(), 1);

    assert!(!session.busy().is_busy());
}

#[tokio::test]
async fn ask_appends_user_then_assistant() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();

    let mut renderer = RecordingRenderer::default();
    session.ask("What is X?", &mut renderer).await.unwrap();

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1], Message::user("What is X?"));
    assert_eq!(transcript[2], Message::assistant("X is Y"));

    // The question rendered immediately; the answer's reveal ended equal to
    // the immediate rendering.
    assert_eq!(renderer.user, vec!["What is X?".to_string()]);
    assert_eq!(renderer.assistant_text(), "X is Y");
}

#[tokio::test]
async fn empty_question_is_a_no_op() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();
    let before = session.transcript().len();

    session.ask("   ", &mut renderer).await.unwrap();
    session.ask("", &mut renderer).await.unwrap();

    assert_eq!(session.transcript().len(), before);
}

#[tokio::test]
async fn absent_answer_renders_fallback() {
    let base_url = spawn_service(ServiceBehavior {
        empty_answer: true,
        ..ServiceBehavior::default()
    })
    .await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();
    session.ask("What is X?", &mut renderer).await.unwrap();

    let last = session.transcript().last().unwrap();
    assert_eq!(last, &Message::assistant(NO_ANSWER_FALLBACK));
}

#[tokio::test]
async fn new_chat_replaces_session_and_records_history() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();
    session.ask("What is X?", &mut renderer).await.unwrap();

    session.start_new_chat(&mut renderer).await.unwrap();

    assert_eq!(session.session_id(), Some("s2"));
    assert_eq!(session.document_id(), Some("a.pdf"));
    // Transcript was cleared down to the confirmation.
    assert_eq!(session.transcript().len(), 1);

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().get(0).unwrap().session_id, "s2");
    assert_eq!(session.history().get(1).unwrap().session_id, "s1");
}

#[tokio::test]
async fn failed_ingest_adds_no_history_and_preserves_session() {
    // The first upload succeeds; every later ingest fails with a 500.
    let base_url = spawn_service(ServiceBehavior {
        fail_ingest_after: Some(1),
        ..ServiceBehavior::default()
    })
    .await;

    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();
    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();

    let err = session
        .open_document("b.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    assert!(err.to_string().contains("failed to read document"));

    // Prior session untouched, no new history entry, indicator released.
    assert_eq!(session.session_id(), Some("s1"));
    assert_eq!(session.document_id(), Some("a.pdf"));
    assert_eq!(session.history().len(), 1);
    assert!(!session.busy().is_busy());
}

#[tokio::test]
async fn load_history_replaces_transcript_in_order() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let mut session = session_against(&base_url);
    let mut renderer = RecordingRenderer::default();

    session
        .open_document("a.pdf", b"%PDF-1.4", &mut renderer)
        .await
        .unwrap();
    session.ask("Unrelated question", &mut renderer).await.unwrap();

    let entry = HistoryEntry::new("b.pdf", "s9", "b.pdf");
    let mut renderer = RecordingRenderer::default();
    session.load_history(&entry, &mut renderer).await.unwrap();

    // Transcript replaced with exactly the fetched sequence, regardless of
    // prior contents; the entry's identifiers both became active.
    assert_eq!(
        session.transcript(),
        &[Message::user("What is X?"), Message::assistant("X is Y")]
    );
    assert_eq!(session.session_id(), Some("s9"));
    assert_eq!(session.document_id(), Some("b.pdf"));
    assert_eq!(renderer.user, vec!["What is X?".to_string()]);
    assert_eq!(renderer.assistant_text(), "X is Y");

    // A new chat now targets the loaded entry's document.
    session.start_new_chat(&mut renderer).await.unwrap();
    assert_eq!(session.history().get(0).unwrap().document_id, "b.pdf");
}

#[tokio::test]
async fn health_probe() {
    let base_url = spawn_service(ServiceBehavior::default()).await;
    let client = DocQa::new(Some(base_url)).unwrap();
    let health = client.health().await.unwrap();
    assert!(health.is_ok());
}
