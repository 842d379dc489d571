//! Capabilities a token subject and its identity store must provide

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

/// Something a token can be issued for.
///
/// `payload_uid` is written to the `uid` claim and is informational only.
/// `unique_lookup_id` is written to `jti` and must be accepted by the
/// matching [`IdentityLookup`].
pub trait TokenSubject {
    fn payload_uid(&self) -> Value;

    fn unique_lookup_id(&self) -> Value;
}

/// Resolves the `jti` of a verified token to a concrete identity
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    type Identity: Send;

    /// Find an identity by its unique lookup id.
    ///
    /// `Ok(None)` means the id is unknown; `Err` is reserved for backend failures.
    async fn find_by_unique_id(&self, id: &Value) -> Result<Option<Self::Identity>, DomainError>;
}
