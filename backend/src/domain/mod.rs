//! Domain primitives and pure logic.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the pure functions (statistics, ownership
//! check) that make up the service's actual logic. Keep types immutable and
//! document invariants in each type's Rustdoc.

pub mod auth;
pub mod blog;
pub mod error;
pub mod password;
pub mod ports;
pub mod stats;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, authorize_owner_mutation};
pub use self::blog::{
    Blog, BlogId, BlogTitle, BlogUpdate, BlogUrl, BlogValidationError, BlogWithOwner, NewBlog,
};
pub use self::error::{Error, ErrorCode};
pub use self::password::{PasswordHash, PasswordHashError, hash_password, verify_password};
pub use self::user::{
    NewUser, User, UserCredentials, UserId, UserValidationError, UserWithBlogs, Username,
};

/// Convenient result alias for operations that surface domain errors.
pub type ApiResult<T> = Result<T, Error>;
