//! User identity and account model.

use std::fmt;

use uuid::Uuid;

use super::password::PasswordHash;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;

/// Validation errors raised by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// The username was missing or blank once trimmed.
    EmptyUsername,
    /// The username was shorter than [`USERNAME_MIN`] characters.
    UsernameTooShort {
        /// Minimum number of characters required.
        min: usize,
    },
    /// The username was longer than [`USERNAME_MAX`] characters.
    UsernameTooLong {
        /// Maximum number of characters allowed.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters long")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters long")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login name chosen at registration.
///
/// ## Invariants
/// - trimmed of surrounding whitespace;
/// - between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Registered account.
///
/// The user's blog list is not stored here; it is the set of blogs whose
/// owner references this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: Option<String>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, username: Username, name: Option<String>) -> Self {
        Self { id, username, name }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Account data required to store a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login name.
    pub username: Username,
    /// Optional display name.
    pub name: Option<String>,
    /// Argon2id digest of the chosen password.
    pub password_hash: PasswordHash,
}

/// A stored user together with the credential digest needed to verify a login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The account.
    pub user: User,
    /// Argon2id digest of the account password.
    pub password_hash: PasswordHash,
}

/// A user together with the blogs they own, as returned by the users listing.
#[derive(Debug, Clone)]
pub struct UserWithBlogs {
    /// The account.
    pub user: User,
    /// Blogs owned by the account, in creation order.
    pub blogs: Vec<super::blog::Blog>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
    fn username_rejects_invalid_input(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = Username::new(raw).expect_err("invalid username must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn username_rejects_overlong_input() {
        let raw = "x".repeat(USERNAME_MAX + 1);
        let err = Username::new(raw).expect_err("overlong username must fail");
        assert_eq!(err, UserValidationError::UsernameTooLong { max: USERNAME_MAX });
    }

    #[rstest]
    #[case("root")]
    #[case("  pansuola  ")]
    fn username_trims_and_accepts(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw.trim());
    }

    #[test]
    fn user_id_rejects_non_uuid() {
        let err = UserId::new("not-a-uuid").expect_err("must fail");
        assert_eq!(err, UserValidationError::InvalidId);
    }

    #[test]
    fn user_id_round_trips() {
        let id = UserId::random();
        let reparsed = UserId::new(id.to_string()).expect("round trip");
        assert_eq!(id, reparsed);
    }
}
