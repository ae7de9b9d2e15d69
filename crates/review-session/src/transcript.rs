//! Append-only chat transcript
//!
//! Each chat turn appends its entries under one lock acquisition, so a
//! turn's user message and reply (or error) are always adjacent, and turns
//! appear in the order they completed.

use std::fmt::Write;

use chrono::{Local, Utc};
use shared_types::ChatEntry;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Mutex<Vec<ChatEntry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful turn
    pub async fn append_exchange(&self, message: &str, reply: &str) {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        entries.push(ChatEntry::user(message, now));
        entries.push(ChatEntry::assistant(reply, now));
    }

    /// Record a failed turn: the attempted message plus a visible error
    pub async fn append_failure(&self, message: &str, error: &impl std::fmt::Display) {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        entries.push(ChatEntry::user(message, now));
        entries.push(ChatEntry::error(error, now));
    }

    pub async fn entries(&self) -> Vec<ChatEntry> {
        self.entries.lock().await.clone()
    }

    /// Entries appended after the first `seen`, for incremental display
    pub async fn entries_since(&self, seen: usize) -> Vec<ChatEntry> {
        let entries = self.entries.lock().await;
        entries.get(seen..).map(<[ChatEntry]>::to_vec).unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Console rendering with local wall-clock times
pub fn format_entries(entries: &[ChatEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let who = match (entry.is_user, entry.is_error) {
            (true, _) => "You",
            (false, true) => "!",
            (false, false) => "Reviewer",
        };
        let time = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
        // Writing to a String cannot fail
        let _ = writeln!(output, "[{}] {}: {}", time, who, entry.content);
    }
    output
}
