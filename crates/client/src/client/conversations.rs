//! Conversation API operations.

use chrono::{DateTime, Utc};
use layer_core::resource::{ResourceDescriptor, CONVERSATION};
use serde_json::{json, Map, Value};

use super::messages::Messages;
use super::resource::{
    into_payload, Creatable, Destroyable, Findable, ParentRef, Resource, ResourceClient,
    ResourceKind,
};
use crate::error::Result;

/// Marker for the `conversations` collection.
#[derive(Debug)]
pub struct Conversations;

impl ResourceKind for Conversations {
    const DESCRIPTOR: ResourceDescriptor = CONVERSATION;

    fn create_defaults() -> Map<String, Value> {
        into_payload(json!({ "distinct": true }))
    }
}

impl Creatable for Conversations {}
impl Findable for Conversations {}
impl Destroyable for Conversations {}

pub type Conversation = Resource<Conversations>;

/// Request for creating a conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewConversation {
    pub participants: Vec<String>,
    /// Reuse an existing conversation with the same participants (server default: true).
    pub distinct: Option<bool>,
    pub metadata: Option<Value>,
}

impl NewConversation {
    pub fn new<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<NewConversation> for Map<String, Value> {
    fn from(req: NewConversation) -> Self {
        let mut payload = into_payload(json!({ "participants": req.participants }));
        if let Some(distinct) = req.distinct {
            payload.insert("distinct".to_string(), json!(distinct));
        }
        if let Some(metadata) = req.metadata {
            payload.insert("metadata".to_string(), metadata);
        }
        payload
    }
}

impl ResourceClient<Conversations> {
    /// Create a new conversation.
    pub async fn create_conversation(&self, req: NewConversation) -> Result<Conversation> {
        self.create(req.into()).await
    }
}

impl Resource<Conversations> {
    pub fn participants(&self) -> Vec<&str> {
        self.attributes().string_list("participants")
    }

    pub fn distinct(&self) -> Option<bool> {
        self.attributes().bool("distinct")
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.get("metadata")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attributes().timestamp("created_at")
    }

    pub fn messages_url(&self) -> Option<&str> {
        self.attributes().str("messages_url")
    }

    /// Messages of this conversation.
    ///
    /// The scope captures this conversation's id and url at call time.
    pub fn messages(&self) -> ResourceClient<Messages> {
        ResourceClient::new(
            self.client().clone(),
            ParentRef::from_attributes(self.attributes()),
        )
    }
}
