//! layer_client - Client and CLI for the Layer Platform API.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod transport;

pub use client::announcements::{Announcement, Announcements};
pub use client::conversations::{Conversation, Conversations, NewConversation};
pub use client::messages::{Message, MessagePart, Messages, NewMessage, Sender};
pub use client::notifications::{Notification, Notifications, Push};
pub use client::resource::{ListParams, ParentRef, Resource, ResourceClient, ResourceKind};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ErrorDescriptor, ErrorKind, Result};
