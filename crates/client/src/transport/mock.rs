//! In-memory platform simulator for tests.
//!
//! [`MockTransport`] answers create/list/find/destroy requests from an
//! in-memory store laid out the same way as the platform's URL space. Every
//! request is recorded, so tests can assert on headers, bodies and call
//! counts. Scripted responses and failures take precedence over simulation.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use layer_core::resource::{qualified_id, Method};
use serde_json::{json, Map, Value};

use super::{HttpRequest, HttpResponse, Transport, TransportError};

const MOCK_ROOT: &str = "https://api.layer.com/apps/mock";

#[derive(Debug, Default)]
struct MockState {
    /// Collection path (`conversations/<id>/messages`) to stored resources.
    collections: BTreeMap<String, Vec<Map<String, Value>>>,
    scripted: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// Transport that simulates the platform API in memory.
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned response for the next request.
    pub fn push_response(&self, response: HttpResponse) {
        self.lock().scripted.push_back(Ok(response));
    }

    /// Queue a transport failure for the next request.
    pub fn push_failure(&self, error: TransportError) {
        self.lock().scripted.push_back(Err(error));
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        if let Some(scripted) = state.scripted.pop_front() {
            return scripted;
        }
        Ok(simulate(&mut state, &request))
    }
}

fn simulate(state: &mut MockState, request: &HttpRequest) -> HttpResponse {
    let segments: Vec<&str> = request
        .path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        return not_found(&request.path);
    }

    // Odd segment counts address a collection, even counts a member.
    let (collection, member) = if segments.len() % 2 == 1 {
        (segments.join("/"), None)
    } else {
        let last = segments.len() - 1;
        (segments[..last].join("/"), Some(segments[last]))
    };

    match (request.method, member) {
        (Method::Post, None) => create(state, &segments, &collection, request.body.as_ref()),
        (Method::Get, None) => {
            let items = state
                .collections
                .get(&collection)
                .cloned()
                .unwrap_or_default();
            HttpResponse::json(
                200,
                &Value::Array(items.into_iter().map(Value::Object).collect()),
            )
        }
        (Method::Get, Some(id)) => match find(state, &collection, id) {
            Some(resource) => HttpResponse::json(200, &Value::Object(resource.clone())),
            None => not_found(&request.path),
        },
        (Method::Delete, Some(id)) => {
            let removed = state.collections.get_mut(&collection).and_then(|items| {
                let index = items.iter().position(|item| has_short_id(item, id))?;
                Some(items.remove(index))
            });
            match removed {
                Some(_) => HttpResponse::new(204, Vec::new()),
                None => not_found(&request.path),
            }
        }
        _ => HttpResponse::json(
            405,
            &json!({
                "id": "method_not_allowed",
                "code": 107,
                "message": format!("{} is not supported on {}", request.method, request.path),
            }),
        ),
    }
}

fn create(
    state: &mut MockState,
    segments: &[&str],
    collection: &str,
    body: Option<&Value>,
) -> HttpResponse {
    let Some(Value::Object(payload)) = body else {
        return HttpResponse::json(
            422,
            &json!({
                "id": "invalid_request_body",
                "code": 104,
                "message": "Request body must be a JSON object",
            }),
        );
    };

    let plural = segments[segments.len() - 1];
    let short = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut resource = payload.clone();
    resource.insert("id".to_string(), json!(qualified_id(plural, &short)));
    resource.insert(
        "url".to_string(),
        json!(format!("{}/{}/{}", MOCK_ROOT, collection, short)),
    );
    resource.insert("created_at".to_string(), json!(now));
    if plural == "messages" || plural == "announcements" {
        resource.insert("sent_at".to_string(), json!(now));
    }

    if let [.., parent_plural, parent_id, _] = *segments {
        let singular = parent_plural.strip_suffix('s').unwrap_or(parent_plural);
        resource.insert(
            singular.to_string(),
            json!({
                "id": qualified_id(parent_plural, parent_id),
                "url": format!("{}/{}/{}", MOCK_ROOT, parent_plural, parent_id),
            }),
        );
    }

    state
        .collections
        .entry(collection.to_string())
        .or_default()
        .push(resource.clone());

    HttpResponse::json(201, &Value::Object(resource))
}

fn find<'a>(state: &'a MockState, collection: &str, id: &str) -> Option<&'a Map<String, Value>> {
    state
        .collections
        .get(collection)?
        .iter()
        .find(|item| has_short_id(item, id))
}

fn has_short_id(item: &Map<String, Value>, id: &str) -> bool {
    item.get("id")
        .and_then(Value::as_str)
        .and_then(|full| full.rsplit('/').next())
        == Some(id)
}

fn not_found(path: &str) -> HttpResponse {
    HttpResponse::json(
        404,
        &json!({
            "id": "not_found",
            "code": 102,
            "message": format!("The requested resource was not found: {}", path),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(path: &str, body: Value) -> HttpRequest {
        let mut request = HttpRequest::new(Method::Post, path);
        request.body = Some(body);
        request
    }

    fn body(response: &HttpResponse) -> Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_parent() {
        let mock = MockTransport::new();
        let response = mock
            .send(post(
                "conversations/c1/messages",
                json!({"parts": [{"body": "hi", "mime_type": "text/plain"}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        let created = body(&response);
        assert!(created["id"]
            .as_str()
            .unwrap()
            .starts_with("layer:///messages/"));
        assert_eq!(
            created["conversation"]["id"],
            json!("layer:///conversations/c1")
        );
        assert!(created["sent_at"].is_string());
    }

    #[tokio::test]
    async fn test_find_list_and_delete() {
        let mock = MockTransport::new();
        let created = body(
            &mock
                .send(post("conversations", json!({"participants": ["a"]})))
                .await
                .unwrap(),
        );
        let short = created["id"].as_str().unwrap().rsplit('/').next().unwrap();
        let member = format!("conversations/{}", short);

        let found = mock
            .send(HttpRequest::new(Method::Get, member.clone()))
            .await
            .unwrap();
        assert_eq!(found.status, 200);

        let listed = mock
            .send(HttpRequest::new(Method::Get, "conversations"))
            .await
            .unwrap();
        assert_eq!(body(&listed).as_array().unwrap().len(), 1);

        let deleted = mock
            .send(HttpRequest::new(Method::Delete, member.clone()))
            .await
            .unwrap();
        assert_eq!(deleted.status, 204);

        let missing = mock
            .send(HttpRequest::new(Method::Get, member))
            .await
            .unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(mock.request_count(), 5);
    }

    #[tokio::test]
    async fn test_scripted_responses_take_precedence() {
        let mock = MockTransport::new();
        mock.push_response(HttpResponse::new(503, "maintenance"));
        mock.push_failure(TransportError::Connection("refused".to_string()));

        let first = mock
            .send(HttpRequest::new(Method::Get, "conversations"))
            .await
            .unwrap();
        assert_eq!(first.status, 503);

        let second = mock
            .send(HttpRequest::new(Method::Get, "conversations"))
            .await;
        assert_eq!(
            second,
            Err(TransportError::Connection("refused".to_string()))
        );

        let third = mock
            .send(HttpRequest::new(Method::Get, "conversations"))
            .await
            .unwrap();
        assert_eq!(third.status, 200);
    }

    #[tokio::test]
    async fn test_create_requires_object_body() {
        let mock = MockTransport::new();
        let response = mock
            .send(HttpRequest::new(Method::Post, "conversations"))
            .await
            .unwrap();
        assert_eq!(response.status, 422);
    }
}
