//! User domain
//!
//! The default identity type behind a token and the repository trait the
//! identity lookup is built on.

mod entity;
mod repository;

pub use entity::{User, UserId, UserIdError, UserStatus};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::mock::MockUserRepository;
