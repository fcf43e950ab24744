// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply to one posted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub response: String,
    #[serde(default, deserialize_with = "flag")]
    pub error: bool,
    #[serde(default, deserialize_with = "flag")]
    pub cached: bool,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self { response: response.into(), ..Default::default() }
    }
}

/// One user message paired with its bot response, as stored by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_message: String,
    pub bot_response: String,
}

// The service sometimes reports `error` as a description string instead of a bool.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64() != Some(0.0),
        _ => false,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_flags_default_to_false() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
        assert_eq!(reply, ChatReply::text("hi"));
    }

    #[test]
    fn string_error_counts_as_flag() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"error": "Invalid message", "response": "Message too long"}"#,
        )
        .unwrap();
        assert!(reply.error);
        assert!(!reply.cached);

        let reply: ChatReply =
            serde_json::from_str(r#"{"error": null, "response": "ok", "cached": true}"#).unwrap();
        assert!(!reply.error);
        assert!(reply.cached);
    }

    #[test]
    fn null_response_reads_as_empty() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"error": true, "response": null}"#).unwrap();
        assert!(reply.error);
        assert_eq!(reply.response, "");
    }

    #[test]
    fn zero_error_is_not_a_flag() {
        let reply: ChatReply = serde_json::from_str(r#"{"error": 0.0, "response": "ok"}"#).unwrap();
        assert!(!reply.error);
        let reply: ChatReply = serde_json::from_str(r#"{"error": 0, "response": "ok"}"#).unwrap();
        assert!(!reply.error);
        let reply: ChatReply = serde_json::from_str(r#"{"error": 1, "response": "ok"}"#).unwrap();
        assert!(reply.error);
    }

    #[test]
    fn turn_ignores_extra_fields() {
        let turns: Vec<Turn> = serde_json::from_str(
            r#"[{"timestamp": "2024-01-01T00:00:00", "user_message": "a", "bot_response": "b", "session_id": "s"}]"#,
        )
        .unwrap();
        assert_eq!(turns, vec![Turn { user_message: "a".into(), bot_response: "b".into() }]);
    }
}
