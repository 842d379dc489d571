//! User infrastructure module
//!
//! The in-memory repository and the adapter that lets the token verifier
//! resolve users by `jti`.

mod lookup;
mod repository;

pub use lookup::UserIdentityLookup;
pub use repository::InMemoryUserRepository;
