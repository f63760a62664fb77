//! Password digest handling — Argon2id.
//!
//! Digests are PHC-format strings (`$argon2id$v=19$...`) produced with the
//! default memory-hard parameters. Plaintext never leaves this module's
//! function arguments and is never stored.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Failure while hashing or verifying a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password digest error: {message}")]
pub struct PasswordHashError {
    message: String,
}

impl PasswordHashError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Argon2id digest of an account password, in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-produced PHC string, e.g. one read back from storage.
    pub fn from_phc_string(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string form stored in the database.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash(hash.to_string()))
        .map_err(|err| PasswordHashError::new(format!("hashing failed: {err}")))
}

/// Verify a plaintext password against a stored digest.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored digest
/// itself is malformed.
pub fn verify_password(
    password: &str,
    hash: &PasswordHash,
) -> Result<bool, PasswordHashError> {
    let parsed = argon2::password_hash::PasswordHash::new(hash.as_str())
        .map_err(|err| PasswordHashError::new(format!("malformed digest: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
