use std::sync::Arc;

use anyhow::Context;
use chatbot_client::{
    ClientConfig, SessionClient, services::session::SessionId, view::TerminalView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatbot_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, timeout = ?config.request_timeout, "starting chat client");

    let mut client = SessionClient::connect(config)
        .context("failed to build chat client")?
        .with_view(Arc::new(TerminalView));
    if let Ok(id) = std::env::var("CHAT_SESSION_ID") {
        if !id.trim().is_empty() {
            client = client.with_session(SessionId::from(id.trim()));
        }
    }
    let client = Arc::new(client);

    client.initialize().await;
    println!("Type a message, /new for a new chat, /quit to exit.");

    let mut pending = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = line.trim();
        if command == "/quit" {
            break;
        }
        if command == "/new" {
            client.start_new_chat().await;
            continue;
        }

        let client = client.clone();
        pending.push(tokio::spawn(async move {
            let outcome = client.submit(&line).await;
            tracing::debug!(?outcome, "submission settled");
        }));
        pending.retain(|task| !task.is_finished());
    }

    for task in pending {
        task.await.context("submission task panicked")?;
    }

    Ok(())
}
