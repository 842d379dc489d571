//! Optional source of the issuer string for `iss` / `aud`

use std::fmt::Debug;

/// Supplies the host/issuer identity of the current request, if there is one
pub trait IssuerContext: Send + Sync + Debug {
    fn issuer(&self) -> Option<String>;
}

/// Issuer context with a fixed value, e.g. the public base URL of the service
#[derive(Debug, Clone)]
pub struct StaticIssuer(String);

impl StaticIssuer {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self(issuer.into())
    }
}

impl IssuerContext for StaticIssuer {
    fn issuer(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
