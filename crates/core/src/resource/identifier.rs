//! Helpers for fully qualified resource identifiers.
//!
//! The platform identifies resources as `layer:///<plural>/<uuid>`. The
//! trailing segment (the "short id") is what nested paths are built from.

/// Scheme prefix of fully qualified identifiers.
pub const ID_SCHEME: &str = "layer:///";

/// Returns the trailing path segment of an identifier.
///
/// Short ids pass through unchanged. Returns `None` for empty input or an
/// identifier ending in a slash.
///
/// # Examples
///
/// ```
/// use layer_core::resource::short_id;
///
/// assert_eq!(
///     short_id("layer:///messages/779fe2ec-8c1a-4b7c-993c-22df0465af1c"),
///     Some("779fe2ec-8c1a-4b7c-993c-22df0465af1c")
/// );
/// assert_eq!(short_id("779fe2ec"), Some("779fe2ec"));
/// assert_eq!(short_id(""), None);
/// ```
pub fn short_id(id: &str) -> Option<&str> {
    let segment = id.rsplit('/').next()?;
    if segment.trim().is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// Builds a fully qualified identifier for a short id of the given kind.
pub fn qualified_id(plural: &str, short: &str) -> String {
    format!("{}{}/{}", ID_SCHEME, plural, short)
}

/// Returns the plural kind segment of a fully qualified identifier.
///
/// `layer:///conversations/<uuid>` yields `conversations`. Short ids yield `None`.
pub fn kind_segment(id: &str) -> Option<&str> {
    let rest = id.strip_prefix(ID_SCHEME)?;
    let (kind, _) = rest.split_once('/')?;
    if kind.is_empty() {
        None
    } else {
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_of_qualified_id() {
        assert_eq!(
            short_id("layer:///conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f"),
            Some("b127ccbe-5f95-4d6a-9c01-c1e98e147f4f")
        );
    }

    #[test]
    fn test_short_id_of_app_id() {
        assert_eq!(short_id("layer:///apps/staging/abc-123"), Some("abc-123"));
    }

    #[test]
    fn test_short_id_rejects_trailing_slash() {
        assert_eq!(short_id("layer:///messages/"), None);
        assert_eq!(short_id("   "), None);
    }

    #[test]
    fn test_qualified_id_round_trip() {
        let id = qualified_id("messages", "abc");
        assert_eq!(id, "layer:///messages/abc");
        assert_eq!(short_id(&id), Some("abc"));
        assert_eq!(kind_segment(&id), Some("messages"));
    }

    #[test]
    fn test_kind_segment_of_short_id() {
        assert_eq!(kind_segment("abc"), None);
        assert_eq!(kind_segment("layer:///abc"), None);
    }
}
