//! Token domain
//!
//! Claim set schema, the capabilities a subject and identity store must
//! provide, time and issuer sources, and the token error taxonomy.

pub mod claims;
mod clock;
mod context;
mod error;
mod subject;

pub use claims::ClaimSet;
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{IssuerContext, StaticIssuer};
pub use error::{TokenError, REJECTION_MESSAGE};
pub use subject::{IdentityLookup, TokenSubject};
