// src/view/terminal.rs
use std::io::Write;
use std::time::Duration;

use crate::services::transcript::{Entry, EntryStatus, Sender};

use super::ChatView;

const TYPING_TEXT: &str = "AI is thinking...";
const CACHE_TEXT: &str = "⚡ Cached response";

/// Prints the conversation to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalView;

impl TerminalView {
    pub fn line(entry: &Entry) -> String {
        let who = match entry.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        let tag = match entry.status {
            EntryStatus::Normal => "",
            EntryStatus::Error => " [error]",
            EntryStatus::Retry => " [retry]",
        };
        format!("[{}] {}{}: {}", entry.timestamp.format("%H:%M:%S"), who, tag, entry.text)
    }

    fn print(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout leaves nothing to render to.
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

impl ChatView for TerminalView {
    fn message_added(&self, entry: &Entry) {
        self.print(&Self::line(entry));
    }

    fn typing(&self, visible: bool) {
        if visible {
            self.print(TYPING_TEXT);
        }
    }

    fn cache_hit(&self, _display_for: Duration) {
        self.print(CACHE_TEXT);
    }

    fn cleared(&self) {
        self.print("---- new chat ----");
    }

    fn sidebar_entry_added(&self, label: &str) {
        self.print(&format!("({})", label));
    }

    fn input_enabled(&self, _enabled: bool) {}
}
