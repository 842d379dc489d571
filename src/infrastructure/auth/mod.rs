//! Authentication infrastructure module
//!
//! Token issuance and verification on top of `jsonwebtoken`, the shared
//! configuration, and the service that issues and checks tokens for stored
//! users.

mod config;
mod issuer;
mod service;
mod verifier;

pub use config::{JwtConfig, SecretEncoding};
pub use issuer::TokenIssuer;
pub use service::AuthService;
pub use verifier::{TokenDecoder, TokenVerifier};
