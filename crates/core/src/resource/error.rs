use thiserror::Error;

/// Errors raised while building a resource path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A required id was absent or empty. `missing` names the kind whose id
    /// is needed, which is the parent kind for scoped paths.
    #[error("Missing {missing} identifier for {kind}")]
    MissingIdentifier {
        kind: &'static str,
        missing: &'static str,
    },

    /// An id that cannot address a `expected` resource: a `.` or `..`
    /// segment, or a fully qualified id of another kind.
    #[error("Invalid {expected} identifier {id:?} for {kind}")]
    InvalidIdentifier {
        kind: &'static str,
        expected: &'static str,
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identifier_display() {
        let error = PathError::MissingIdentifier {
            kind: "message",
            missing: "conversation",
        };
        assert_eq!(
            error.to_string(),
            "Missing conversation identifier for message"
        );
    }

    #[test]
    fn test_invalid_identifier_display() {
        let error = PathError::InvalidIdentifier {
            kind: "message",
            expected: "conversation",
            id: "..".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid conversation identifier \"..\" for message"
        );
    }
}
