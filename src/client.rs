use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{
    CreateSessionRequest, CreateSessionResponse, HealthResponse, HistoryRequest, IngestRequest,
    IngestResponse, Message, QueryRequest, QueryResponse,
};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the document question-answering service.
///
/// Each operation is a single round trip against one fixed base endpoint.
/// The client performs no retries; every failure is surfaced to the caller,
/// which decides recovery.
#[derive(Clone)]
pub struct DocQa {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl std::fmt::Debug for DocQa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocQa")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DocQa {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// ASKDOC_BASE_URL environment variable; it falls back to a local
    /// development default.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("ASKDOC_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attaches a logger that receives every completed operation.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        // Failure bodies carry an optional {"error": "..."} message.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(error_message, None),
            404 => Error::not_found(error_message),
            408 => Error::timeout(error_message, None),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    /// POST a JSON body to `path` and parse a JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        observability::CLIENT_REQUESTS.click();
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Upload a document for ingestion.
    ///
    /// `bytes` is the raw document content; `document_id` is a caller-chosen
    /// stable name. Returns the number of retrievable chunks the service
    /// indexed.
    pub async fn ingest_document(&self, document_id: &str, bytes: &[u8]) -> Result<IngestResponse> {
        observability::INGEST_BYTES.add(bytes.len() as f64);
        let request = IngestRequest::new(document_id, bytes);
        let response: IngestResponse = self.post_json("ingest", &request).await?;
        observability::INGEST_CHUNKS.add(response.chunk_count as f64);
        if let Some(logger) = &self.logger {
            logger.log_ingest(document_id, &response);
        }
        Ok(response)
    }

    /// Create a conversational session bound to an ingested document.
    pub async fn create_session(&self, document_id: &str) -> Result<CreateSessionResponse> {
        let request = CreateSessionRequest::new(document_id);
        let response: CreateSessionResponse = self.post_json("create-session", &request).await?;
        if let Some(logger) = &self.logger {
            logger.log_create_session(document_id, &response);
        }
        Ok(response)
    }

    /// Submit a question against a session.
    ///
    /// An absent answer in the response is a valid outcome, not an error.
    pub async fn submit_question(&self, session_id: &str, question: &str) -> Result<QueryResponse> {
        let request = QueryRequest::new(session_id, question);
        let response: QueryResponse = self.post_json("query", &request).await?;
        if let Some(logger) = &self.logger {
            logger.log_query(session_id, &response);
        }
        Ok(response)
    }

    /// Fetch the transcript of a session, oldest message first.
    pub async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>> {
        let request = HistoryRequest::new(session_id);
        let messages: Vec<Message> = self.post_json("history", &request).await?;
        if let Some(logger) = &self.logger {
            logger.log_history(session_id, &messages);
        }
        Ok(messages)
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}health", self.base_url);
        observability::CLIENT_REQUESTS.click();

        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                Error::from(e)
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<HealthResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}
