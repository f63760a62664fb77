//! Outbound adapters.

pub mod persistence;
pub mod token;
