mod classify;
mod error;

pub use classify::{
    classify, expect_collection, expect_resource, parse_error_descriptor, reason_phrase,
};
pub use error::{ApiError, ErrorDescriptor, ErrorKind, Result};
