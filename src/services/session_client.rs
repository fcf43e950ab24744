// src/services/session_client.rs
use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::Local;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::ClientError,
    message::ChatReply,
    services::{
        endpoints::{ChatEndpoint, HistoryEndpoint, HttpEndpoints},
        formatter::MessageFormatter,
        retry::{Scheduler, TokioScheduler},
        session::SessionId,
        transcript::{Entry, EntryStatus, Sender, Transcript},
    },
    state::ClientState,
    view::{ChatView, NullView},
};

/// What happened to one call to [`SessionClient::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing left after trimming; no request was made.
    Empty,
    /// Another submission was in flight; no request was made.
    Busy,
    Replied { cached: bool },
    /// The service answered with its error flag set.
    EndpointError,
    /// Every attempt failed at the transport level.
    Failed { attempts: u32 },
}

/// One conversation with the chat service.
///
/// Owns the session id, the render state and the retry counter. At most one
/// submission is in flight at a time; later ones are ignored until it settles.
pub struct SessionClient {
    config: ClientConfig,
    history: Arc<dyn HistoryEndpoint>,
    chat: Arc<dyn ChatEndpoint>,
    view: Arc<dyn ChatView>,
    scheduler: Arc<dyn Scheduler>,
    formatter: MessageFormatter,
    state: RwLock<ClientState>,
    in_flight: AtomicBool,
    typing: AtomicBool,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight)
            .field("typing", &self.typing)
            .finish()
    }
}

// Releases the in-flight flag, hides the typing placeholder and re-enables
// input however the submission ends, including when its future is dropped.
struct InFlight<'a> {
    client: &'a SessionClient,
}

impl<'a> InFlight<'a> {
    fn acquire(client: &'a SessionClient) -> Option<Self> {
        client
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { client })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.client.hide_typing();
        self.client.in_flight.store(false, Ordering::Release);
        self.client.view.input_enabled(true);
    }
}

impl SessionClient {
    /// A client with a fresh session id, rendering nowhere.
    pub fn new(
        config: ClientConfig,
        history: Arc<dyn HistoryEndpoint>,
        chat: Arc<dyn ChatEndpoint>,
    ) -> Self {
        let formatter = MessageFormatter::new(config.escape_html);
        Self {
            config,
            history,
            chat,
            view: Arc::new(NullView),
            scheduler: Arc::new(TokioScheduler),
            formatter,
            state: RwLock::new(ClientState::new(SessionId::generate())),
            in_flight: AtomicBool::new(false),
            typing: AtomicBool::new(false),
        }
    }

    /// A client talking HTTP to `config.base_url`.
    pub fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoints = Arc::new(HttpEndpoints::new(&config.base_url)?);
        Ok(Self::new(config, endpoints.clone(), endpoints))
    }

    pub fn with_view(mut self, view: Arc<dyn ChatView>) -> Self {
        self.view = view;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Resume an existing session instead of the generated one.
    pub fn with_session(mut self, session: SessionId) -> Self {
        self.state.get_mut().session = session;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn session(&self) -> SessionId {
        self.state.read().await.session.clone()
    }

    pub async fn retry_count(&self) -> u32 {
        self.state.read().await.retry_count
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the typing placeholder is showing.
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::Acquire)
    }

    pub async fn transcript(&self) -> Transcript {
        self.state.read().await.transcript.clone()
    }

    /// Restore the session's history, or greet when there is none.
    ///
    /// History failures are logged and masked behind the greeting.
    pub async fn initialize(&self) {
        let session = self.session().await;
        info!(session = %session, "loading chat history");

        let turns = match self.bounded(self.history.history(&session)).await {
            Ok(turns) => turns,
            Err(e) => {
                warn!(session = %session, error = %e, "failed to load chat history");
                self.greet().await;
                return;
            }
        };

        {
            let mut state = self.state.write().await;
            if !state.transcript.is_empty() {
                state.transcript.clear();
                self.view.cleared();
            }
        }

        if turns.is_empty() {
            self.greet().await;
            return;
        }

        debug!(session = %session, turns = turns.len(), "restoring turns");
        for (i, turn) in turns.iter().enumerate() {
            if i > 0 {
                self.scheduler.sleep(self.config.history_stagger).await;
            }
            self.render(Sender::User, &turn.user_message, EntryStatus::Normal).await;
            self.scheduler.sleep(self.config.history_stagger).await;
            self.render(Sender::Bot, &turn.bot_response, EntryStatus::Normal).await;
        }
    }

    /// Send one user message, retrying transport failures with backoff.
    pub async fn submit(&self, message: &str) -> SubmitOutcome {
        let message = message.trim();
        if message.is_empty() {
            return SubmitOutcome::Empty;
        }
        let Some(_guard) = InFlight::acquire(self) else {
            debug!("submission ignored, request already in flight");
            return SubmitOutcome::Busy;
        };

        self.view.input_enabled(false);
        self.render(Sender::User, message, EntryStatus::Normal).await;

        // Counted per submission; `state.retry_count` only mirrors it.
        let policy = self.config.retry;
        let mut retry = 0;
        loop {
            self.show_typing();
            let session = self.session().await;
            let result = self.bounded(self.chat.send(&session, message)).await;
            self.hide_typing();

            let error = match result {
                Ok(reply) => {
                    self.state.write().await.retry_count = 0;
                    return self.show_reply(reply).await;
                }
                Err(e) => e,
            };

            if !policy.allows(retry) {
                self.state.write().await.retry_count = 0;
                let attempts = retry + 1;
                warn!(session = %session, attempts, error = %error, "giving up on message");
                self.render(Sender::Bot, &self.config.error_text, EntryStatus::Error).await;
                return SubmitOutcome::Failed { attempts };
            }
            retry += 1;
            self.state.write().await.retry_count = retry;

            let delay = policy.delay_for(retry);
            warn!(
                session = %session,
                error = %error,
                "chat request failed, retry {}/{} in {:?}",
                retry,
                policy.max_retries,
                delay
            );
            self.render(
                Sender::Bot,
                &format!("Retrying... ({}/{})", retry, policy.max_retries),
                EntryStatus::Retry,
            )
            .await;
            self.scheduler.sleep(delay).await;
        }
    }

    /// Switch to a fresh session with an empty conversation.
    pub async fn start_new_chat(&self) -> SessionId {
        let session = SessionId::generate();
        let label = format!("Chat {}", Local::now().format("%H:%M:%S"));

        let mut state = self.state.write().await;
        info!(old = %state.session, new = %session, "starting new chat");
        state.session = session.clone();
        state.retry_count = 0;
        state.transcript.clear();
        self.view.cleared();

        let greeting = self.config.greeting.clone();
        self.append(&mut state, Sender::Bot, &greeting, EntryStatus::Normal);

        state.transcript.add_sidebar_entry(label.clone());
        self.view.sidebar_entry_added(&label);
        session
    }

    async fn show_reply(&self, reply: ChatReply) -> SubmitOutcome {
        if reply.error {
            let text = if reply.response.trim().is_empty() {
                self.config.error_text.as_str()
            } else {
                reply.response.as_str()
            };
            self.render(Sender::Bot, text, EntryStatus::Error).await;
            return SubmitOutcome::EndpointError;
        }

        self.render(Sender::Bot, &reply.response, EntryStatus::Normal).await;
        if reply.cached {
            self.view.cache_hit(self.config.cache_indicator);
        }
        SubmitOutcome::Replied { cached: reply.cached }
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        let limit = self.config.request_timeout;
        tokio::time::timeout(limit, request)
            .await
            .map_err(|_| ClientError::Timeout(limit))?
    }

    async fn greet(&self) {
        let greeting = self.config.greeting.clone();
        self.render(Sender::Bot, &greeting, EntryStatus::Normal).await;
    }

    fn show_typing(&self) {
        if !self.typing.swap(true, Ordering::AcqRel) {
            self.view.typing(true);
        }
    }

    fn hide_typing(&self) {
        if self.typing.swap(false, Ordering::AcqRel) {
            self.view.typing(false);
        }
    }

    async fn render(&self, sender: Sender, text: &str, status: EntryStatus) {
        let mut state = self.state.write().await;
        self.append(&mut state, sender, text, status);
    }

    fn append(&self, state: &mut ClientState, sender: Sender, text: &str, status: EntryStatus) {
        let entry = Entry {
            sender,
            text: text.to_string(),
            html: self.formatter.format(text),
            status,
            timestamp: Local::now(),
        };
        self.view.message_added(&entry);
        state.transcript.push(entry);
    }
}
