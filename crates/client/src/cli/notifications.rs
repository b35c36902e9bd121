//! Notification CLI commands.

use clap::{Parser, Subcommand};

/// Push notification commands.
#[derive(Debug, Parser)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub action: NotificationsAction,
}

/// Available notification actions.
#[derive(Debug, Subcommand)]
pub enum NotificationsAction {
    /// Send a push notification.
    Send {
        /// Recipient user id (repeatable).
        #[arg(long = "recipient", required = true)]
        recipients: Vec<String>,
        /// Notification title.
        #[arg(long)]
        title: Option<String>,
        /// Notification text.
        #[arg(long)]
        text: String,
        /// Sound file played on delivery.
        #[arg(long)]
        sound: Option<String>,
    },
}
