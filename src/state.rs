// src/state.rs
use crate::services::{session::SessionId, transcript::Transcript};

/// Mutable state owned by a [`SessionClient`](crate::SessionClient).
#[derive(Debug)]
pub struct ClientState {
    pub session: SessionId,
    pub transcript: Transcript,
    pub retry_count: u32,
}

impl ClientState {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            transcript: Transcript::new(),
            retry_count: 0,
        }
    }
}
