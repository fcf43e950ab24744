//! Client side of a chat service: session handling, bounded retry, history
//! restore and message formatting over `GET /chat_history` and `POST /chat`.

pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod state;
pub mod view;

pub use config::ClientConfig;
pub use error::ClientError;
pub use services::session_client::{SessionClient, SubmitOutcome};
