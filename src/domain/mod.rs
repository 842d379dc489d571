//! Domain layer: token claims and capabilities, users, and the shared error type

pub mod auth;
pub mod user;

mod error;

pub use error::DomainError;
