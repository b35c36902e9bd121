//! Push notification API operations.

use layer_core::resource::{ResourceDescriptor, NOTIFICATION};
use serde_json::{json, Map, Value};

use super::resource::{
    into_payload, with_recipients, Creatable, Resource, ResourceClient, ResourceKind,
};
use crate::error::Result;

#[derive(Debug)]
pub struct Notifications;

impl ResourceKind for Notifications {
    const DESCRIPTOR: ResourceDescriptor = NOTIFICATION;
}

impl Creatable for Notifications {}

pub type Notification = Resource<Notifications>;

/// Push notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Push {
    pub title: Option<String>,
    pub text: String,
    pub sound: Option<String>,
}

impl Push {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }
}

impl From<Push> for Map<String, Value> {
    fn from(push: Push) -> Self {
        let mut notification = into_payload(json!({ "text": push.text }));
        if let Some(title) = push.title {
            notification.insert("title".to_string(), json!(title));
        }
        if let Some(sound) = push.sound {
            notification.insert("sound".to_string(), json!(sound));
        }
        into_payload(json!({ "notification": notification }))
    }
}

impl ResourceClient<Notifications> {
    /// Send a notification to `recipients`.
    ///
    /// A `recipients` key in `content` is replaced by the explicit list.
    pub async fn create_for(
        &self,
        recipients: &[String],
        content: Map<String, Value>,
    ) -> Result<Notification> {
        self.create(with_recipients(content, recipients)).await
    }

    pub async fn push(&self, recipients: &[String], push: Push) -> Result<Notification> {
        self.create_for(recipients, push.into()).await
    }
}

impl Resource<Notifications> {
    pub fn recipients(&self) -> Vec<&str> {
        self.attributes().string_list("recipients")
    }

    pub fn notification(&self) -> Option<&Map<String, Value>> {
        self.attributes().object("notification")
    }
}
