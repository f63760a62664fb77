//! Driving port for credential exchange.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing infrastructure, which keeps HTTP handler tests
//! deterministic: they substitute a test double instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; both yield `Unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
