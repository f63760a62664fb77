//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_repository;
mod login_service;
mod token_service;
mod user_repository;

pub use blog_repository::{BlogPersistenceError, BlogRepository};
pub use login_service::LoginService;
pub use token_service::TokenService;
pub use user_repository::{UserPersistenceError, UserRepository};
