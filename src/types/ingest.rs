use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Request body for the ingest operation.
///
/// Document bytes travel base64-encoded; `document_id` is a caller-chosen
/// stable name for the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestRequest {
    /// Base64-encoded document content.
    pub document_bytes: String,
    /// Caller-chosen stable document name.
    pub document_id: String,
}

impl IngestRequest {
    /// Create a new ingest request, encoding the raw document bytes.
    pub fn new(document_id: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            document_bytes: base64::engine::general_purpose::STANDARD.encode(bytes),
            document_id: document_id.into(),
        }
    }

    /// Create an ingest request from a file path.
    ///
    /// Reads the file fully into memory and uses the file name as the
    /// document id.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let document_id = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
            })?
            .to_string();

        let mut file = File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        Ok(Self::new(document_id, &buffer))
    }
}

/// Response body for a successful ingest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestResponse {
    /// Number of retrievable chunks the document was split into.
    #[serde(alias = "chunks")]
    pub chunk_count: u64,
}

impl IngestResponse {
    /// Create a new `IngestResponse` with the given chunk count.
    pub fn new(chunk_count: u64) -> Self {
        Self { chunk_count }
    }
}
