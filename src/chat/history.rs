//! Sidebar history of past sessions.

use std::collections::VecDeque;

/// A record linking a human-readable label to a past session.
///
/// Entries carry their own document id so that selecting one restores both
/// halves of the session: replaying the transcript and making a subsequent
/// new-chat target the right document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Human-readable label, typically the document's file name.
    pub label: String,
    /// Opaque session identifier.
    pub session_id: String,
    /// The document the session was created against.
    pub document_id: String,
}

impl HistoryEntry {
    /// Create a new history entry.
    pub fn new(
        label: impl Into<String>,
        session_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            session_id: session_id.into(),
            document_id: document_id.into(),
        }
    }
}

/// Ordered list of past sessions, most recent first.
///
/// One entry is recorded per session-create event (initial upload or
/// explicit new-chat), never per message exchange. Entries are immutable
/// and never removed; no deduplication is performed, so uploading the same
/// document twice yields two entries.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry at the head of the list, in constant time.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// Iterates over the entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the entry at `index`, counting from the most recent.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no sessions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
