// src/services/mod.rs
pub mod endpoints;
pub mod formatter;
pub mod retry;
pub mod session;
pub mod session_client;
pub mod transcript;
