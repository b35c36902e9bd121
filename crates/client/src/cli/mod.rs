//! CLI command definitions.

pub mod announcements;
pub mod conversations;
pub mod messages;
pub mod notifications;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};

/// CLI client for the Layer Platform API.
#[derive(Debug, Parser)]
#[command(name = "layer-client")]
#[command(about = "CLI client for the Layer Platform API", long_about = None)]
pub struct Cli {
    /// Platform API host.
    #[arg(long, env = "LAYER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Application id, short or fully qualified.
    #[arg(long, env = "LAYER_APP_ID")]
    pub app_id: String,

    /// Platform API token.
    #[arg(long, env = "LAYER_PLATFORM_TOKEN", hide_env_values = true)]
    pub token: String,

    /// API version sent in the Accept header.
    #[arg(long, env = "LAYER_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Request timeout in seconds.
    #[arg(long, env = "LAYER_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration from the global flags.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.app_id, &self.token)
            .with_base_url(&self.base_url)
            .with_api_version(&self.api_version)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Conversation management.
    Conversations(conversations::ConversationsCommand),
    /// Messages within a conversation.
    Messages(messages::MessagesCommand),
    /// System announcements.
    Announcements(announcements::AnnouncementsCommand),
    /// Push notifications.
    Notifications(notifications::NotificationsCommand),
}
