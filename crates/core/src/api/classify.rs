//! Pure functions turning HTTP responses into parsed bodies or typed errors.
//!
//! This is the only place where status codes are interpreted. Everything
//! above it deals with [`ApiError`] kinds.

use serde_json::{Map, Value};

use super::error::{ApiError, ErrorDescriptor, Result};
use crate::resource::Attributes;

/// Classifies a response by status code and body.
///
/// - 2xx: the body parsed as JSON (`Value::Null` when empty)
/// - 404: [`ApiError::NotFound`]
/// - 400, 422: [`ApiError::ValidationFailed`]
/// - other 4xx, and any non-2xx below 400: [`ApiError::RequestRejected`]
/// - 5xx: [`ApiError::ServerError`]
///
/// # Examples
///
/// ```
/// use layer_core::api::{classify, ErrorKind};
///
/// let body = br#"{"id": "not_found", "code": 102, "message": "No such message"}"#;
/// let error = classify(404, body).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::NotFound);
///
/// assert_eq!(classify(204, b"").unwrap(), serde_json::Value::Null);
/// ```
pub fn classify(status: u16, body: &[u8]) -> Result<Value> {
    if (200..300).contains(&status) {
        return parse_success_body(status, body);
    }

    let descriptor = parse_error_descriptor(status, body);
    Err(match status {
        404 => ApiError::NotFound(descriptor),
        400 | 422 => ApiError::ValidationFailed { status, descriptor },
        500..=599 => ApiError::ServerError { status, descriptor },
        _ => ApiError::RequestRejected { status, descriptor },
    })
}

fn parse_success_body(status: u16, body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedResponse {
        status,
        reason: e.to_string(),
    })
}

/// Extracts the platform error document from a failing response.
///
/// Non-JSON bodies are kept verbatim as the message. Empty bodies fall back
/// to the status reason phrase.
pub fn parse_error_descriptor(status: u16, body: &[u8]) -> ErrorDescriptor {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return ErrorDescriptor::from_message(reason_phrase(status));
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(document)) => {
            let mut descriptor = descriptor_fields(&document);
            if descriptor.message.is_empty() {
                descriptor.message = fallback_message(&Value::Object(document), status);
            }
            descriptor
        }
        _ => ErrorDescriptor::from_message(text),
    }
}

/// Reads each descriptor field on its own, so one oddly typed field does not
/// discard the rest of the document.
fn descriptor_fields(document: &Map<String, Value>) -> ErrorDescriptor {
    let scalar = |key: &str| match document.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    ErrorDescriptor {
        id: scalar("id"),
        code: match document.get("code") {
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(code) => code.as_i64(),
            None => None,
        },
        message: document
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        url: document
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_string),
        data: document.get("data").filter(|data| !data.is_null()).cloned(),
    }
}

/// Message for error documents without a `message` field: a string `error`
/// field, a list of `errors`, or the reason phrase.
fn fallback_message(value: &Value, status: u16) -> String {
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }
    reason_phrase(status).to_string()
}

/// Reason phrase for the status codes the platform documents.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        409 => "Conflict",
        410 => "Gone",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unexpected Status",
    }
}

/// Checks that a successful body is a single resource with a non-empty `id`.
pub fn expect_resource(status: u16, body: Value) -> Result<Attributes> {
    let kind = json_kind(&body);
    let attributes = Attributes::from_value(body).ok_or_else(|| ApiError::MalformedResponse {
        status,
        reason: format!("expected a JSON object, got {}", kind),
    })?;
    if attributes.id().is_none() {
        return Err(ApiError::MalformedResponse {
            status,
            reason: "resource is missing an `id`".to_string(),
        });
    }
    Ok(attributes)
}

/// Checks that a successful body is an array of resources, each with an `id`.
///
/// An empty array yields an empty `Vec`.
pub fn expect_collection(status: u16, body: Value) -> Result<Vec<Attributes>> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| expect_resource(status, item))
            .collect(),
        other => Err(ApiError::MalformedResponse {
            status,
            reason: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
