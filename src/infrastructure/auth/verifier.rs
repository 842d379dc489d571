//! Token verification and identity resolution

use std::fmt::Debug;
use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::config::JwtConfig;
use crate::domain::auth::claims::{EXP, IAT, NBF};
use crate::domain::auth::{ClaimSet, Clock, IdentityLookup, SystemClock, TokenError};
use crate::domain::DomainError;

/// Signature and time-window checks, without identity resolution
#[derive(Clone)]
pub struct TokenDecoder {
    config: Arc<JwtConfig>,
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("algorithm", &self.algorithm)
            .field("decoding_key", &"[hidden]")
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenDecoder {
    pub fn new(config: impl Into<Arc<JwtConfig>>) -> Result<Self, DomainError> {
        let config = config.into();
        config.validate()?;
        let algorithm = config.algorithm()?;
        let decoding_key = DecodingKey::from_secret(&config.secret_bytes()?);

        Ok(Self {
            config,
            algorithm,
            decoding_key,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Verify the signature against the configured algorithm only, then
    /// check `exp`, `nbf` and `iat` against the clock.
    pub fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        // The primitive checks signature and algorithm; time claims are
        // checked below against the injected clock.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::invalid(format!("{:?}", e.kind())))?
            .claims;

        self.check_time_window(&claims)?;

        Ok(claims)
    }

    fn check_time_window(&self, claims: &ClaimSet) -> Result<(), TokenError> {
        let now = self.clock.now();
        let leeway = i64::try_from(self.config.leeway_seconds).unwrap_or(i64::MAX);
        let malformed = |name: &str| TokenError::invalid(format!("{} is not a numeric date", name));

        match claims.timestamp(EXP).map_err(malformed)? {
            Some(exp) if now.saturating_sub(leeway) >= exp => {
                return Err(TokenError::invalid("ExpiredSignature"));
            }
            None if self.config.require_exp => {
                return Err(TokenError::invalid("Missing required claim: exp"));
            }
            _ => {}
        }

        if let Some(nbf) = claims.timestamp(NBF).map_err(malformed)? {
            if nbf > now.saturating_add(leeway) {
                return Err(TokenError::invalid("ImmatureSignature"));
            }
        }

        if let Some(iat) = claims.timestamp(IAT).map_err(malformed)? {
            if iat > now.saturating_add(leeway) {
                return Err(TokenError::invalid("Token issued in the future"));
            }
        }

        Ok(())
    }
}

/// Verifies bearer tokens and resolves their `jti` to an identity
pub struct TokenVerifier<L: IdentityLookup> {
    decoder: TokenDecoder,
    lookup: Arc<L>,
}

impl<L: IdentityLookup> Clone for TokenVerifier<L> {
    fn clone(&self) -> Self {
        Self {
            decoder: self.decoder.clone(),
            lookup: self.lookup.clone(),
        }
    }
}

impl<L: IdentityLookup> Debug for TokenVerifier<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl<L: IdentityLookup> TokenVerifier<L> {
    pub fn new(config: impl Into<Arc<JwtConfig>>, lookup: Arc<L>) -> Result<Self, DomainError> {
        Ok(Self {
            decoder: TokenDecoder::new(config)?,
            lookup,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.decoder = self.decoder.with_clock(clock);
        self
    }

    /// Decode and validate a token without resolving its identity
    pub fn decode_claims(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.decoder.decode(token)
    }

    /// Authenticate a bearer token.
    ///
    /// Every rejection is logged with its internal reason; the returned error
    /// only says "Incorrect token".
    pub async fn verify(&self, token: &str) -> Result<L::Identity, TokenError> {
        let result = self.resolve(token).await;

        if let Err(e) = &result {
            match e {
                TokenError::Lookup(_) => warn!(error = %e.reason(), "Identity lookup failed"),
                _ => debug!(reason = %e.reason(), "Token rejected"),
            }
        }

        result
    }

    async fn resolve(&self, token: &str) -> Result<L::Identity, TokenError> {
        let claims = self.decoder.decode(token)?;

        let jti = claims
            .jti()
            .ok_or_else(|| TokenError::invalid("Missing required claim: jti"))?;

        self.lookup
            .find_by_unique_id(jti)
            .await?
            .ok_or(TokenError::UnauthorizedIdentity)
    }
}
