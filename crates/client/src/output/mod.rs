//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_output_json_is_compact() {
        let value = json!({"id": "layer:///conversations/c1"});
        assert_eq!(
            format_output(&value, OutputFormat::Json),
            r#"{"id":"layer:///conversations/c1"}"#
        );
        assert!(format_output(&value, OutputFormat::Pretty).contains('\n'));
    }
}
