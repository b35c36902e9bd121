//! Pure path building for resource operations.
//!
//! Paths are relative to the application root (`<base>/apps/<app_id>/`) and
//! never start with a slash.

use std::fmt;

use super::descriptor::ResourceDescriptor;
use super::error::PathError;
use super::identifier::{kind_segment, short_id};

/// The generic operations every resource kind may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    List,
    Find,
    Destroy,
}

impl Operation {
    /// HTTP method used for this operation.
    pub fn method(self) -> Method {
        match self {
            Operation::Create => Method::Post,
            Operation::List | Operation::Find => Method::Get,
            Operation::Destroy => Method::Delete,
        }
    }

    /// Returns true if the operation addresses a single member of a collection.
    pub fn targets_member(self) -> bool {
        matches!(self, Operation::Find | Operation::Destroy)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Find => "find",
            Operation::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// HTTP methods used by the platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the relative path for `operation` on a resource kind.
///
/// - create/list on a top-level kind: `<plural>`
/// - create/list on a child kind: `<parent_plural>/<parent_id>/<plural>`
/// - find/destroy: the list path followed by `/<own_id>`
///
/// Ids may be fully qualified (`layer:///messages/<uuid>`) or short; only the
/// trailing segment is used, percent-encoded. Top-level kinds ignore
/// `parent_id`. Dot segments and qualified ids of the wrong kind fail with
/// [`PathError::InvalidIdentifier`].
///
/// # Examples
///
/// ```
/// use layer_core::resource::{build_path, Operation, MESSAGE};
///
/// let path = build_path(
///     &MESSAGE,
///     Some("layer:///conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f"),
///     Operation::Destroy,
///     Some("779fe2ec-8c1a-4b7c-993c-22df0465af1c"),
/// )
/// .unwrap();
/// assert_eq!(
///     path,
///     "conversations/b127ccbe-5f95-4d6a-9c01-c1e98e147f4f/messages/779fe2ec-8c1a-4b7c-993c-22df0465af1c"
/// );
/// ```
pub fn build_path(
    descriptor: &ResourceDescriptor,
    parent_id: Option<&str>,
    operation: Operation,
    own_id: Option<&str>,
) -> Result<String, PathError> {
    let mut path = match descriptor.parent {
        Some(parent) => {
            let parent_segment = segment(descriptor, parent, parent_id)?;
            format!("{}/{}/{}", parent.plural, parent_segment, descriptor.plural)
        }
        None => descriptor.plural.to_string(),
    };

    if operation.targets_member() {
        let own_segment = segment(descriptor, descriptor, own_id)?;
        path.push('/');
        path.push_str(&own_segment);
    }

    Ok(path)
}

/// Short, percent-encoded path segment for an id of kind `target`.
///
/// Dot segments are rejected since URL resolution would collapse them, as
/// are fully qualified ids whose kind is not `target`.
fn segment(
    descriptor: &ResourceDescriptor,
    target: &ResourceDescriptor,
    id: Option<&str>,
) -> Result<String, PathError> {
    let missing = || PathError::MissingIdentifier {
        kind: descriptor.singular,
        missing: target.singular,
    };
    let id = id.ok_or_else(missing)?;
    let short = short_id(id).ok_or_else(missing)?;

    let wrong_kind = kind_segment(id).is_some_and(|plural| plural != target.plural);
    if short == "." || short == ".." || wrong_kind {
        return Err(PathError::InvalidIdentifier {
            kind: descriptor.singular,
            expected: target.singular,
            id: id.to_string(),
        });
    }

    Ok(urlencoding::encode(short).into_owned())
}
