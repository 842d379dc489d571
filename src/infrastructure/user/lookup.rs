//! Resolves token `jti` values to users

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::auth::IdentityLookup;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Adapts a [`UserRepository`] to [`IdentityLookup`] by primary key.
///
/// A `jti` that is not a valid user id, or that names a suspended user,
/// resolves to nothing.
#[derive(Debug)]
pub struct UserIdentityLookup<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserIdentityLookup<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UserRepository> IdentityLookup for UserIdentityLookup<R> {
    type Identity = User;

    async fn find_by_unique_id(&self, id: &Value) -> Result<Option<User>, DomainError> {
        let user_id = match UserId::from_claim(id) {
            Ok(user_id) => user_id,
            Err(e) => {
                debug!(error = %e, "jti is not a user id");
                return Ok(None);
            }
        };

        let user = self.repository.get(&user_id).await?;

        Ok(user.filter(|u| {
            if !u.is_active() {
                debug!(user_id = %u.id(), "Token presented for suspended user");
            }
            u.is_active()
        }))
    }
}
