//! JSON output formatting.

use serde_json::json;

use crate::error::ApiError;

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format an API failure as a JSON object on one line.
pub fn format_error(error: &ApiError) -> String {
    let value = json!({
        "error": format!("{:?}", error.kind()),
        "status": error.status(),
        "message": error.to_string(),
        "descriptor": error.descriptor(),
    });
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDescriptor;
    use serde_json::Value;

    #[test]
    fn test_format_error_includes_descriptor() {
        let error = ApiError::NotFound(ErrorDescriptor {
            id: Some("not_found".to_string()),
            code: Some(102),
            message: "gone".to_string(),
            ..ErrorDescriptor::default()
        });
        let value: Value = serde_json::from_str(&format_error(&error)).unwrap();

        assert_eq!(value["error"], "NotFound");
        assert_eq!(value["status"], 404);
        assert_eq!(value["descriptor"]["id"], "not_found");
    }

    #[test]
    fn test_format_error_for_local_failure() {
        let error = ApiError::TransportFailure("refused".to_string());
        let value: Value = serde_json::from_str(&format_error(&error)).unwrap();

        assert_eq!(value["error"], "TransportFailure");
        assert!(value["status"].is_null());
        assert!(value["descriptor"].is_null());
    }
}
