//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserCredentials, UserId, UserWithBlogs, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already holds the requested username.
        DuplicateUsername { username: String } => "expected `username` to be unique",
    }
}

/// Persistence port for registered accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account and return it.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is already taken; the store must stay unchanged in that case.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account and its credential digest by username.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// All accounts with their blogs resolved, in registration order.
    async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserPersistenceError>;
}
