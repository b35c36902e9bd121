//! Announcement API operations.
//!
//! Announcements are messages sent by the application itself to a set of
//! users, outside of any conversation.

use chrono::{DateTime, Utc};
use layer_core::resource::{ResourceDescriptor, ANNOUNCEMENT};
use serde_json::{json, Map, Value};

use super::messages::{parts_of, MessagePart};
use super::resource::{
    into_payload, with_recipients, Creatable, Resource, ResourceClient, ResourceKind,
};
use crate::error::Result;

#[derive(Debug)]
pub struct Announcements;

impl ResourceKind for Announcements {
    const DESCRIPTOR: ResourceDescriptor = ANNOUNCEMENT;
}

impl Creatable for Announcements {}

pub type Announcement = Resource<Announcements>;

impl ResourceClient<Announcements> {
    /// Send an announcement to `recipients`.
    ///
    /// `content` carries the parts and optional push settings; a
    /// `recipients` key in it is replaced by the explicit list.
    pub async fn create_for(
        &self,
        recipients: &[String],
        content: Map<String, Value>,
    ) -> Result<Announcement> {
        self.create(with_recipients(content, recipients)).await
    }

    /// Send a plain-text announcement from a named system sender.
    pub async fn send_text(
        &self,
        recipients: &[String],
        sender_name: &str,
        body: &str,
    ) -> Result<Announcement> {
        let content = into_payload(json!({
            "sender": { "name": sender_name },
            "parts": [MessagePart::text(body)],
        }));
        self.create_for(recipients, content).await
    }
}

impl Resource<Announcements> {
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.attributes().timestamp("sent_at")
    }

    pub fn recipients(&self) -> Vec<&str> {
        self.attributes().string_list("recipients")
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.attributes().object("sender")?.get("name")?.as_str()
    }

    pub fn parts(&self) -> Vec<MessagePart> {
        parts_of(self.attributes())
    }
}
