//! Blog-listing service backend.
//!
//! A small CRUD backend: blogs are created, listed, updated, and deleted
//! over HTTP; registration and token-based login gate the mutations. The
//! crate follows a hexagonal layout: `domain` holds the types and pure
//! logic, `inbound` the HTTP adapter, `outbound` the PostgreSQL and JWT
//! adapters, and `server` the wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
