//! Diesel-backed `LoginService` adapter.
//!
//! Authenticates credentials against stored Argon2id digests. Unknown
//! usernames and wrong passwords produce the same error so the endpoint
//! does not reveal which accounts exist.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, User, Username, verify_password};

use super::diesel_user_repository::DieselUserRepository;

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Login adapter backed by a user repository.
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Create a service backed by a Diesel user repository.
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // A name that fails username validation cannot name an account.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        let stored = self
            .users
            .find_credentials(&username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))?;

        // Argon2id verification is deliberately slow; keep it off the
        // async workers.
        let password = credentials.password().to_owned();
        let hash = stored.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?;

        if matches {
            Ok(stored.user)
        } else {
            Err(Error::unauthorized(BAD_CREDENTIALS))
        }
    }
}
