// src/view/mod.rs
pub mod terminal;

use std::time::Duration;

use crate::services::transcript::Entry;

pub use terminal::TerminalView;

/// Rendering surface driven by a [`SessionClient`](crate::SessionClient).
///
/// Calls arrive in render order. Implementations must not block.
pub trait ChatView: Send + Sync {
    fn message_added(&self, entry: &Entry);

    fn typing(&self, visible: bool);

    /// A reply was served from the service's cache; show a notice for `display_for`.
    fn cache_hit(&self, display_for: Duration);

    fn cleared(&self);

    fn sidebar_entry_added(&self, label: &str);

    fn input_enabled(&self, enabled: bool);
}

/// Discards every render event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ChatView for NullView {
    fn message_added(&self, _entry: &Entry) {}
    fn typing(&self, _visible: bool) {}
    fn cache_hit(&self, _display_for: Duration) {}
    fn cleared(&self) {}
    fn sidebar_entry_added(&self, _label: &str) {}
    fn input_enabled(&self, _enabled: bool) {}
}
