//! Raw attribute container for resources returned by the API.
//!
//! [`Attributes`] wraps the JSON object the server sent for one resource.
//! Typed accessors cover the fields shared by every kind; [`Attributes::get`]
//! and [`Attributes::as_map`] are the escape hatch for anything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identifier::short_id;

/// An untyped, immutable JSON object describing one remote resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Wraps an existing JSON object.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Converts a JSON value, returning `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw lookup of any field, including ones without a typed accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if `key` is present (even when null).
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String value of `key`, if present and a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Boolean value of `key`, if present and a boolean.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Integer value of `key`, if present and an integer.
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Nested object at `key`.
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// Array at `key`.
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Array of strings at `key`; non-string elements are skipped.
    pub fn string_list(&self, key: &str) -> Vec<&str> {
        self.array(key)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// RFC 3339 timestamp at `key`.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.str(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The fully qualified identifier, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.str("id").filter(|id| !id.trim().is_empty())
    }

    /// Trailing segment of the identifier.
    pub fn uuid(&self) -> Option<&str> {
        self.id().and_then(short_id)
    }

    /// API URL of the resource.
    pub fn url(&self) -> Option<&str> {
        self.str("url")
    }

    /// Identifier of an embedded reference such as `{"conversation": {"id": ...}}`.
    pub fn reference_id(&self, key: &str) -> Option<&str> {
        self.object(key)
            .and_then(|reference| reference.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Attributes> for Value {
    fn from(attributes: Attributes) -> Self {
        Value::Object(attributes.0)
    }
}

/// Merges `overrides` on top of `defaults`.
///
/// Keys in `overrides` win; the merge is shallow and last-write-wins.
///
/// # Examples
///
/// ```
/// use layer_core::resource::merge_payload;
/// use serde_json::json;
///
/// let defaults = json!({"distinct": true, "metadata": {}});
/// let overrides = json!({"distinct": false});
/// let merged = merge_payload(defaults.as_object().unwrap(), overrides.as_object().unwrap());
/// assert_eq!(merged["distinct"], json!(false));
/// assert_eq!(merged["metadata"], json!({}));
/// ```
pub fn merge_payload(
    defaults: &Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn message_attributes() -> Attributes {
        Attributes::from_value(json!({
            "id": "layer:///messages/779fe2ec-8c1a-4b7c-993c-22df0465af1c",
            "url": "https://api.layer.com/apps/app/messages/779fe2ec-8c1a-4b7c-993c-22df0465af1c",
            "sent_at": "2014-09-09T04:44:47+00:00",
            "is_unread": true,
            "recipient_status": {"alice": "read"},
            "parts": [{"body": "Hello", "mime_type": "text/plain"}],
            "conversation": {
                "id": "layer:///conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f"
            },
            "participants": ["alice", "bob", 3]
        }))
        .unwrap()
    }

    #[test]
    fn test_identity_accessors() {
        let attrs = message_attributes();
        assert_eq!(
            attrs.id(),
            Some("layer:///messages/779fe2ec-8c1a-4b7c-993c-22df0465af1c")
        );
        assert_eq!(attrs.uuid(), Some("779fe2ec-8c1a-4b7c-993c-22df0465af1c"));
        assert!(attrs.url().is_some());
    }

    #[test]
    fn test_empty_id_is_absent() {
        let attrs = Attributes::from_value(json!({"id": ""})).unwrap();
        assert_eq!(attrs.id(), None);
        assert_eq!(attrs.uuid(), None);
    }

    #[test]
    fn test_timestamp_accessor() {
        let attrs = message_attributes();
        assert_eq!(
            attrs.timestamp("sent_at"),
            Some(Utc.with_ymd_and_hms(2014, 9, 9, 4, 44, 47).unwrap())
        );
        assert_eq!(attrs.timestamp("missing"), None);
    }

    #[test]
    fn test_reference_id() {
        let attrs = message_attributes();
        assert_eq!(
            attrs.reference_id("conversation"),
            Some("layer:///conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f")
        );
        assert_eq!(attrs.reference_id("sender"), None);
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        assert_eq!(
            message_attributes().string_list("participants"),
            vec!["alice", "bob"]
        );
    }

    #[test]
    fn test_escape_hatch_for_unknown_fields() {
        let attrs = message_attributes();
        assert_eq!(
            attrs.get("recipient_status"),
            Some(&json!({"alice": "read"}))
        );
        assert_eq!(attrs.bool("is_unread"), Some(true));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Attributes::from_value(json!([1, 2])).is_none());
        assert!(Attributes::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_merge_payload_last_write_wins() {
        let defaults = json!({"a": 1, "b": 2});
        let overrides = json!({"b": 3, "c": 4});
        let merged = merge_payload(
            defaults.as_object().unwrap(),
            overrides.as_object().unwrap(),
        );
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 3, "c": 4}));
    }
}
