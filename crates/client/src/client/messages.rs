//! Message API operations.

use chrono::{DateTime, Utc};
use layer_core::resource::{Attributes, ResourceDescriptor, MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::resource::{
    into_payload, Creatable, Destroyable, Findable, Listable, Resource, ResourceClient,
    ResourceKind,
};
use crate::error::Result;

/// Marker for the `conversations/<id>/messages` collection.
#[derive(Debug)]
pub struct Messages;

impl ResourceKind for Messages {
    const DESCRIPTOR: ResourceDescriptor = MESSAGE;
}

impl Creatable for Messages {}
impl Listable for Messages {}
impl Findable for Messages {}
impl Destroyable for Messages {}

pub type Message = Resource<Messages>;

/// Who a message is sent as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// A user of the application.
    User(String),
    /// A system sender identified only by display name.
    Name(String),
}

impl Sender {
    fn to_value(&self) -> Value {
        match self {
            Sender::User(user_id) => json!({ "user_id": user_id }),
            Sender::Name(name) => json!({ "name": name }),
        }
    }
}

/// One part of a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub body: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl MessagePart {
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(body, "text/plain")
    }

    pub fn new(body: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            mime_type: mime_type.into(),
            encoding: None,
        }
    }
}

/// Request for sending a message.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub sender: Sender,
    pub parts: Vec<MessagePart>,
    /// Push notification settings (`{"text": ..., "sound": ...}`).
    pub notification: Option<Value>,
}

impl NewMessage {
    pub fn new(sender: Sender, parts: Vec<MessagePart>) -> Self {
        Self {
            sender,
            parts,
            notification: None,
        }
    }

    /// Single `text/plain` part sent by a user.
    pub fn text(user_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Sender::User(user_id.into()), vec![MessagePart::text(body)])
    }

    pub fn notification(mut self, notification: Value) -> Self {
        self.notification = Some(notification);
        self
    }
}

impl From<NewMessage> for Map<String, Value> {
    fn from(req: NewMessage) -> Self {
        let mut payload = into_payload(json!({
            "sender": req.sender.to_value(),
            "parts": req.parts,
        }));
        if let Some(notification) = req.notification {
            payload.insert("notification".to_string(), notification);
        }
        payload
    }
}

impl ResourceClient<Messages> {
    /// Send a message to the scoped conversation.
    pub async fn send(&self, req: NewMessage) -> Result<Message> {
        self.create(req.into()).await
    }
}

impl Resource<Messages> {
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.attributes().timestamp("sent_at")
    }

    pub fn sender(&self) -> Option<&Map<String, Value>> {
        self.attributes().object("sender")
    }

    pub fn sender_user_id(&self) -> Option<&str> {
        self.sender()?.get("user_id")?.as_str()
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.sender()?.get("name")?.as_str()
    }

    /// Message parts; malformed parts are skipped.
    pub fn parts(&self) -> Vec<MessagePart> {
        parts_of(self.attributes())
    }

    pub fn is_unread(&self) -> Option<bool> {
        self.attributes().bool("is_unread")
    }

    /// Per-recipient delivery state (`sent`, `delivered`, `read`).
    pub fn recipient_status(&self) -> Option<&Map<String, Value>> {
        self.attributes().object("recipient_status")
    }

    /// Embedded conversation reference as sent by the server.
    pub fn conversation(&self) -> Option<&Map<String, Value>> {
        self.attributes().object("conversation")
    }

    /// Id of the conversation this message belongs to.
    pub fn conversation_id(&self) -> Option<&str> {
        self.parent().map(|parent| parent.id())
    }
}

pub(crate) fn parts_of(attributes: &Attributes) -> Vec<MessagePart> {
    attributes
        .array("parts")
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| serde_json::from_value(part.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::conversations::NewConversation;
    use crate::client::test_support::mock_client;
    use crate::error::{ApiError, ErrorKind};
    use crate::transport::HttpResponse;

    fn message_params() -> NewMessage {
        NewMessage::text("alice", "Hello, World!")
    }

    #[test]
    fn test_new_message_payload() {
        let payload: Map<String, Value> = NewMessage::new(
            Sender::Name("Admin".to_string()),
            vec![MessagePart::text("hi")],
        )
        .notification(json!({"text": "hi", "sound": "chime.aiff"}))
        .into();

        assert_eq!(
            Value::Object(payload),
            json!({
                "sender": {"name": "Admin"},
                "parts": [{"body": "hi", "mime_type": "text/plain"}],
                "notification": {"text": "hi", "sound": "chime.aiff"}
            })
        );
    }

    #[tokio::test]
    async fn test_send_message_to_conversation() {
        let (client, mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice", "bob"]))
            .await
            .unwrap();

        let message = conversation.messages().send(message_params()).await.unwrap();

        assert!(message.id().is_some());
        assert!(message.url().is_some());
        assert!(message.sent_at().is_some());
        assert_eq!(message.sender_user_id(), Some("alice"));
        assert_eq!(message.parts(), vec![MessagePart::text("Hello, World!")]);
        assert_eq!(
            mock.last_request().unwrap().path,
            format!("conversations/{}/messages", conversation.uuid().unwrap())
        );
    }

    #[tokio::test]
    async fn test_invalid_params_are_validation_failed() {
        let (client, mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice"]))
            .await
            .unwrap();

        mock.push_response(HttpResponse::json(
            422,
            &json!({
                "id": "missing_property",
                "code": 104,
                "message": "The `sender` property is required",
                "url": "https://developer.layer.com/docs/platform#missing_property",
                "data": {"property": "sender"}
            }),
        ));

        let error = conversation
            .messages()
            .create(Map::new())
            .await
            .unwrap_err();

        match error {
            ApiError::ValidationFailed { status, descriptor } => {
                assert_eq!(status, 422);
                assert_eq!(descriptor.message, "The `sender` property is required");
                assert_eq!(descriptor.data, Some(json!({"property": "sender"})));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_returns_all_messages_of_conversation() {
        let (client, _mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice"]))
            .await
            .unwrap();

        for _ in 0..3 {
            conversation.messages().send(message_params()).await.unwrap();
        }

        let messages = conversation.messages().list().await.unwrap();
        assert_eq!(messages.len(), 3);
        for message in &messages {
            assert_eq!(message.conversation_id(), conversation.id());
            assert_eq!(
                message
                    .conversation()
                    .and_then(|c| c.get("id"))
                    .and_then(Value::as_str),
                conversation.id()
            );
        }
    }

    #[tokio::test]
    async fn test_list_returns_empty_collection() {
        let (client, _mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice"]).distinct(false))
            .await
            .unwrap();

        let messages = conversation.messages().list().await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_find_message_in_conversation() {
        let (client, _mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice"]))
            .await
            .unwrap();
        let existing = conversation.messages().send(message_params()).await.unwrap();

        let message = conversation
            .messages()
            .find(existing.uuid().unwrap())
            .await
            .unwrap();
        assert_eq!(message.id(), existing.id());
        assert_eq!(message.conversation_id(), conversation.id());
    }

    #[tokio::test]
    async fn test_destroy_message_then_find_is_not_found() {
        let (client, _mock) = mock_client();
        let conversation = client
            .conversations()
            .create_conversation(NewConversation::new(["alice"]))
            .await
            .unwrap();
        let message = conversation.messages().send(message_params()).await.unwrap();

        message.destroy().await.unwrap();

        let error = conversation
            .messages()
            .find(message.uuid().unwrap())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_destroy_uses_message_scope() {
        let (client, mock) = mock_client();
        let message = client
            .messages("b127ccbe-5f95-4d6a-9c01-c1e98e147f4f")
            .send(message_params())
            .await
            .unwrap();

        client
            .messages("some-other-conversation")
            .destroy(&message)
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().path,
            format!(
                "conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f/messages/{}",
                message.uuid().unwrap()
            )
        );
    }

    #[tokio::test]
    async fn test_list_without_conversation_scope_fails_locally() {
        let (client, mock) = mock_client();
        let error = client.messages("").list().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingIdentifier);
        assert_eq!(mock.request_count(), 0);
    }
}
