//! Conversation CLI commands.

use clap::{Parser, Subcommand};
use serde_json::Value;

/// Conversation management commands.
#[derive(Debug, Parser)]
pub struct ConversationsCommand {
    #[command(subcommand)]
    pub action: ConversationsAction,
}

/// Available conversation actions.
#[derive(Debug, Subcommand)]
pub enum ConversationsAction {
    /// Create a conversation.
    Create {
        /// Participant user id (repeatable).
        #[arg(long = "participant", required = true)]
        participants: Vec<String>,
        /// Always create a new conversation, even if one with the same
        /// participants exists.
        #[arg(long)]
        not_distinct: bool,
        /// Metadata as a JSON object.
        #[arg(long, value_parser = parse_metadata)]
        metadata: Option<Value>,
    },
    /// Get conversation by id.
    Get {
        /// Conversation id, short or fully qualified.
        id: String,
    },
    /// Delete conversation by id.
    Delete {
        /// Conversation id, short or fully qualified.
        id: String,
    },
}

/// Parses `--metadata`, which must be a JSON object.
fn parse_metadata(raw: &str) -> Result<Value, String> {
    match serde_json::from_str(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_metadata_accepts_objects() {
        assert_eq!(
            parse_metadata(r#"{"title": "Lunch"}"#),
            Ok(json!({"title": "Lunch"}))
        );
    }

    #[test]
    fn test_parse_metadata_rejects_other_json() {
        for raw in ["5", r#""x""#, "[1]", "null"] {
            assert_eq!(
                parse_metadata(raw),
                Err("expected a JSON object".to_string()),
                "input {}",
                raw
            );
        }
        assert!(parse_metadata("{oops").unwrap_err().starts_with("invalid JSON"));
    }
}
