//! JWT identity tokens
//!
//! Issues stateless bearer tokens that bind a signed claim set to a locally
//! resolvable identity, and verifies them back to that identity:
//! - `TokenIssuer` builds the canonical claim set (`iss`, `aud`, `iat`, `nbf`,
//!   `exp`, `uid`, `jti`) and signs it
//! - `TokenVerifier` checks signature, pinned algorithm and time window, then
//!   resolves `jti` through an `IdentityLookup`
//! - `AuthService` wires both to an id-keyed user store

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::auth::{
    ClaimSet, Clock, FixedClock, IdentityLookup, IssuerContext, StaticIssuer, SystemClock,
    TokenError, TokenSubject,
};
pub use domain::DomainError;
pub use infrastructure::auth::{AuthService, JwtConfig, TokenDecoder, TokenIssuer, TokenVerifier};
