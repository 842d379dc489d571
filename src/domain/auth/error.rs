//! Token issuance and verification errors

use thiserror::Error;

use crate::domain::DomainError;

/// Text shown for every authentication rejection, whatever the cause
pub const REJECTION_MESSAGE: &str = "Incorrect token";

/// Errors produced while issuing or verifying a token.
///
/// `InvalidToken` and `UnauthorizedIdentity` render the same message so a
/// remote caller cannot tell them apart. Use [`TokenError::reason`] for logs.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing primitive rejected the claims or configuration
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),

    /// Malformed, badly signed, expired, not yet valid or missing `jti`
    #[error("Incorrect token")]
    InvalidToken { reason: String },

    /// The `jti` did not resolve to a known identity
    #[error("Incorrect token")]
    UnauthorizedIdentity,

    /// The identity store failed
    #[error("Identity lookup failed: {0}")]
    Lookup(#[from] DomainError),
}

impl TokenError {
    pub fn signing(message: impl Into<String>) -> Self {
        Self::SigningFailure(message.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// True for failures that should become an authentication rejection
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::UnauthorizedIdentity)
    }

    /// Internal detail for logging; never send this to the client
    pub fn reason(&self) -> String {
        match self {
            Self::SigningFailure(message) => message.clone(),
            Self::InvalidToken { reason } => reason.clone(),
            Self::UnauthorizedIdentity => "jti does not resolve to an identity".to_string(),
            Self::Lookup(e) => e.to_string(),
        }
    }
}
