//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O. The bundle is
//! built once at startup and cloned per worker; construction and teardown
//! stay in `server`.

use std::sync::Arc;

use crate::domain::ports::{BlogRepository, LoginService, TokenService, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Blog persistence port.
    pub blogs: Arc<dyn BlogRepository>,
    /// User persistence port.
    pub users: Arc<dyn UserRepository>,
    /// Credential exchange port.
    pub login: Arc<dyn LoginService>,
    /// Token issue/verify port.
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Bundle the given port implementations.
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        login: Arc<dyn LoginService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            blogs,
            users,
            login,
            tokens,
        }
    }
}
