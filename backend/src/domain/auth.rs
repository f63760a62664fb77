//! Authentication and authorisation primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port, and keep the
//! ownership decision here so it stays a pure, testable function.

use std::fmt;

use zeroize::Zeroizing;

use super::error::Error;
use super::user::UserId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication adapters.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Decide whether `subject` may mutate a record owned by `owner`.
///
/// This is the whole of the ownership check: an identity comparison between
/// the token subject and the owner stamped on the record at creation.
///
/// # Examples
/// ```
/// use backend::domain::{UserId, authorize_owner_mutation};
///
/// let owner = UserId::random();
/// assert!(authorize_owner_mutation(&owner, &owner).is_ok());
/// assert!(authorize_owner_mutation(&UserId::random(), &owner).is_err());
/// ```
pub fn authorize_owner_mutation(subject: &UserId, owner: &UserId) -> Result<(), Error> {
    if subject == owner {
        Ok(())
    } else {
        Err(Error::forbidden("removing other peoples blogs is not allowed"))
    }
}
