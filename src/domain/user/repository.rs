//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Id-keyed user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert or replace the user stored under its id
    async fn save(&self, user: User) -> Result<(), DomainError>;
}
