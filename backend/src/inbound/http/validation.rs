//! Shared validation helpers for inbound HTTP adapters.

use crate::domain::{BlogId, BlogValidationError, Error, UserValidationError};

/// 400 for a field the endpoint requires but the body omitted.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}"))
}

/// Pull a required string field out of a request body.
pub(crate) fn require_field(value: Option<String>, field: &str) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a path segment into a blog identifier.
pub(crate) fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::new(raw).map_err(|_| Error::invalid_request(format!("malformed blog id: {raw}")))
}

impl From<BlogValidationError> for Error {
    fn from(err: BlogValidationError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Self::invalid_request(err.to_string())
    }
}
