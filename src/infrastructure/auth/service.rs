//! Token issuance and request authentication for stored users

use std::sync::Arc;

use tracing::{debug, info};

use super::config::JwtConfig;
use super::issuer::TokenIssuer;
use super::verifier::TokenVerifier;
use crate::domain::auth::{ClaimSet, Clock, IssuerContext, TokenError};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::UserIdentityLookup;

/// Ties the user store to token issuance and verification
#[derive(Debug)]
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    issuer: TokenIssuer,
    verifier: TokenVerifier<UserIdentityLookup<R>>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(config: JwtConfig, repository: Arc<R>) -> Result<Self, DomainError> {
        let config = Arc::new(config);
        let lookup = Arc::new(UserIdentityLookup::new(repository.clone()));

        Ok(Self {
            repository,
            issuer: TokenIssuer::new(config.clone())?,
            verifier: TokenVerifier::new(config, lookup)?,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.issuer = self.issuer.with_clock(clock.clone());
        self.verifier = self.verifier.with_clock(clock);
        self
    }

    pub fn with_issuer_context(mut self, context: Arc<dyn IssuerContext>) -> Self {
        self.issuer = self.issuer.with_issuer_context(context);
        self
    }

    /// Issue a token for a stored, active user.
    ///
    /// `Ok(None)` means there is no such user or the user is suspended.
    pub async fn issue_for(
        &self,
        id: &UserId,
        extra_claims: ClaimSet,
    ) -> Result<Option<String>, TokenError> {
        let user = match self.repository.get(id).await? {
            Some(user) if user.is_active() => user,
            _ => {
                debug!(user_id = %id, "No active user to issue a token for");
                return Ok(None);
            }
        };

        let token = self.issuer.issue(&user, extra_claims)?;
        info!(user_id = %user.id(), "Token issued");

        Ok(Some(token))
    }

    /// Resolve the user behind a bearer token
    pub async fn authenticate(&self, token: &str) -> Result<User, TokenError> {
        self.verifier.verify(token).await
    }
}
