//! Mapping from port errors to domain errors at the HTTP boundary.

use crate::domain::Error;
use crate::domain::ports::{BlogPersistenceError, UserPersistenceError};

pub(crate) fn map_blog_persistence_error(error: BlogPersistenceError) -> Error {
    match error {
        // The owner vanished between token verification and the insert;
        // clients see the same response as for a stale token.
        BlogPersistenceError::MissingOwner => Error::unauthorized("token missing or invalid"),
        BlogPersistenceError::Connection { message } | BlogPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(error.to_string())
        }
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn duplicate_username_is_a_client_error() {
        let err = map_user_persistence_error(UserPersistenceError::duplicate_username("root"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "expected `username` to be unique");
    }

    #[test]
    fn missing_owner_reads_like_a_bad_token() {
        let err = map_blog_persistence_error(BlogPersistenceError::missing_owner());
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn infrastructure_failures_stay_internal() {
        let err = map_blog_persistence_error(BlogPersistenceError::connection("refused"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        let err = map_user_persistence_error(UserPersistenceError::query("syntax"));
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
