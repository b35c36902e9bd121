//! Message CLI commands.

use clap::{Parser, Subcommand};

/// Message commands. Every action is scoped to one conversation.
#[derive(Debug, Parser)]
pub struct MessagesCommand {
    #[command(subcommand)]
    pub action: MessagesAction,
}

/// Available message actions.
#[derive(Debug, Subcommand)]
pub enum MessagesAction {
    /// List messages of a conversation.
    List {
        /// Conversation id.
        conversation: String,
        /// Maximum number of messages to return.
        #[arg(long)]
        page_size: Option<u32>,
        /// Return messages after this message id.
        #[arg(long)]
        from_id: Option<String>,
    },
    /// Send a message to a conversation.
    Create {
        /// Conversation id.
        conversation: String,
        /// Sending user id.
        #[arg(long)]
        sender: String,
        /// Body part (repeatable, one part each).
        #[arg(long, required = true)]
        text: Vec<String>,
        /// MIME type of every body part.
        #[arg(long, default_value = "text/plain")]
        mime_type: String,
        /// Push notification text.
        #[arg(long)]
        push: Option<String>,
    },
    /// Get message by id.
    Get {
        /// Conversation id.
        conversation: String,
        /// Message id.
        id: String,
    },
    /// Delete message by id.
    Delete {
        /// Conversation id.
        conversation: String,
        /// Message id.
        id: String,
    },
}
