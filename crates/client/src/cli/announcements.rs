//! Announcement CLI commands.

use clap::{Parser, Subcommand};

/// Announcement commands.
#[derive(Debug, Parser)]
pub struct AnnouncementsCommand {
    #[command(subcommand)]
    pub action: AnnouncementsAction,
}

/// Available announcement actions.
#[derive(Debug, Subcommand)]
pub enum AnnouncementsAction {
    /// Send a text announcement.
    Send {
        /// Recipient user id (repeatable).
        #[arg(long = "recipient", required = true)]
        recipients: Vec<String>,
        /// Display name of the sender.
        #[arg(long)]
        sender_name: String,
        /// Announcement body.
        #[arg(long)]
        text: String,
    },
}
