mod attributes;
mod descriptor;
mod error;
mod identifier;
mod path;

pub use attributes::{merge_payload, Attributes};
pub use descriptor::{ResourceDescriptor, ANNOUNCEMENT, CONVERSATION, MESSAGE, NOTIFICATION};
pub use error::PathError;
pub use identifier::{kind_segment, qualified_id, short_id, ID_SCHEME};
pub use path::{build_path, Method, Operation};
