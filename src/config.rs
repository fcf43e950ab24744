// src/config.rs
use std::time::Duration;

use crate::services::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";
pub const DEFAULT_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Settings for a [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound for every history or chat request.
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub greeting: String,
    pub error_text: String,
    /// Pause between history entries while restoring a conversation.
    pub history_stagger: Duration,
    /// How long the cached-response indicator stays up.
    pub cache_indicator: Duration,
    pub escape_html: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            greeting: DEFAULT_GREETING.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            history_stagger: Duration::from_millis(50),
            cache_indicator: Duration::from_secs(2),
            escape_html: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Build from `CHAT_BASE_URL` and `CHAT_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CHAT_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var("CHAT_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid CHAT_TIMEOUT_SECS"),
            }
        }
        config
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_history_stagger(mut self, stagger: Duration) -> Self {
        self.history_stagger = stagger;
        self
    }

    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}
