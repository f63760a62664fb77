//! Driving port for issuing and verifying bearer tokens.

use crate::domain::{Error, User, UserId};

/// Signs tokens at login and verifies them on gated mutations.
///
/// Verification is a pure per-request decision: no state, no side effects,
/// no expiry or revocation tracking.
pub trait TokenService: Send + Sync {
    /// Sign a token asserting the given account's identity.
    fn issue(&self, user: &User) -> Result<String, Error>;

    /// Verify a raw token and decode the subject identifier.
    ///
    /// Malformed or unverifiable tokens yield `Unauthorized`.
    fn verify(&self, raw: &str) -> Result<UserId, Error>;
}
