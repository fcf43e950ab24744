// src/services/transcript.rs
use chrono::{DateTime, Local};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryStatus {
    #[default]
    Normal,
    Error,
    Retry,
}

/// One displayed message.
#[derive(Clone, Debug)]
pub struct Entry {
    pub sender: Sender,
    pub text: String,
    pub html: String,
    pub status: EntryStatus,
    pub timestamp: DateTime<Local>,
}

/// Render state of one conversation.
///
/// Entries are append-only; only [`Transcript::clear`] removes them.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    sidebar: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, sender: Sender, status: EntryStatus) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sender == sender && e.status == status)
            .count()
    }

    /// Drop every entry. The sidebar survives.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn add_sidebar_entry(&mut self, label: impl Into<String>) {
        self.sidebar.push(label.into());
    }

    pub fn sidebar(&self) -> &[String] {
        &self.sidebar
    }
}
