//! Token issuance

use std::fmt::Debug;
use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::debug;

use super::config::JwtConfig;
use crate::domain::auth::claims::{AUD, EXP, IAT, ISS, JTI, NBF, UID};
use crate::domain::auth::{ClaimSet, Clock, IssuerContext, SystemClock, TokenError, TokenSubject};
use crate::domain::DomainError;

/// Builds the canonical claim set for a subject and signs it
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<JwtConfig>,
    header: Header,
    encoding_key: EncodingKey,
    clock: Arc<dyn Clock>,
    issuer_context: Option<Arc<dyn IssuerContext>>,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("clock", &self.clock)
            .field("issuer_context", &self.issuer_context)
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer using the wall clock and no issuer context
    pub fn new(config: impl Into<Arc<JwtConfig>>) -> Result<Self, DomainError> {
        let config = config.into();
        config.validate()?;
        let header = config.header()?;
        let encoding_key = EncodingKey::from_secret(&config.secret_bytes()?);

        Ok(Self {
            config,
            header,
            encoding_key,
            clock: Arc::new(SystemClock),
            issuer_context: None,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_issuer_context(mut self, context: Arc<dyn IssuerContext>) -> Self {
        self.issuer_context = Some(context);
        self
    }

    /// Issue a token carrying only the standard claims
    pub fn issue_token<S: TokenSubject + ?Sized>(&self, subject: &S) -> Result<String, TokenError> {
        self.issue(subject, ClaimSet::new())
    }

    /// Issue a token for `subject`, starting from `extra_claims`
    pub fn issue<S: TokenSubject + ?Sized>(
        &self,
        subject: &S,
        extra_claims: ClaimSet,
    ) -> Result<String, TokenError> {
        let claims = self.build_claims(subject, extra_claims);

        debug!(
            algorithm = ?self.header.alg,
            claims = claims.len(),
            "Signing token"
        );

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::signing(e.to_string()))
    }

    /// Claim set that `issue` would sign.
    ///
    /// Caller claims come first. `iss`, `aud`, `iat`, `nbf` and `uid` are
    /// always set by the issuer; `exp` and `jti` only when the caller left
    /// them out.
    pub fn build_claims<S: TokenSubject + ?Sized>(
        &self,
        subject: &S,
        extra_claims: ClaimSet,
    ) -> ClaimSet {
        let mut claims = extra_claims;
        let now = self.clock.now();
        let issuer = self
            .issuer_context
            .as_ref()
            .and_then(|ctx| ctx.issuer())
            .unwrap_or_default();

        claims.insert(ISS, issuer.clone());
        claims.insert(AUD, issuer);
        claims.insert(IAT, now);
        claims.insert(NBF, now);
        claims.insert_if_absent(EXP, now.saturating_add(self.expiry()));
        claims.insert(UID, subject.payload_uid());
        claims.insert_if_absent(JTI, subject.unique_lookup_id());

        claims
    }

    fn expiry(&self) -> i64 {
        i64::try_from(self.config.expiry_seconds).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{FixedClock, StaticIssuer};
    use crate::infrastructure::auth::TokenDecoder;
    use jsonwebtoken::{decode_header, Algorithm};
    use serde_json::{json, Value};

    struct Subject;

    impl TokenSubject for Subject {
        fn payload_uid(&self) -> Value {
            json!(42)
        }

        fn unique_lookup_id(&self) -> Value {
            json!(42)
        }
    }

    fn issuer_at(now: i64) -> TokenIssuer {
        TokenIssuer::new(JwtConfig::new("s3cr3t", 3600))
            .unwrap()
            .with_clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_standard_claims_in_order() {
        let claims = issuer_at(1000).build_claims(&Subject, ClaimSet::new());

        let names: Vec<&str> = claims.names().collect();
        assert_eq!(names, vec!["iss", "aud", "iat", "nbf", "exp", "uid", "jti"]);
        assert_eq!(
            serde_json::to_value(&claims).unwrap(),
            json!({"iss": "", "aud": "", "iat": 1000, "nbf": 1000, "exp": 4600, "uid": 42, "jti": 42})
        );
    }

    #[test]
    fn test_caller_exp_is_kept() {
        let claims =
            issuer_at(1000).build_claims(&Subject, ClaimSet::new().with(EXP, 1500));

        assert_eq!(claims.get(EXP), Some(&json!(1500)));
        assert_eq!(claims.get(NBF), claims.get(IAT));
    }

    #[test]
    fn test_null_exp_is_filled() {
        let issuer = issuer_at(1000);
        let claims = issuer.build_claims(&Subject, ClaimSet::new().with(EXP, Value::Null));

        assert_eq!(claims.get(EXP), Some(&json!(4600)));
        let names: Vec<&str> = claims.names().collect();
        assert_eq!(names[0], "exp");

        let token = issuer.issue(&Subject, ClaimSet::new().with(EXP, Value::Null)).unwrap();
        let decoded = TokenDecoder::new(JwtConfig::new("s3cr3t", 3600))
            .unwrap()
            .with_clock(Arc::new(FixedClock(2000)))
            .decode(&token)
            .unwrap();
        assert_eq!(decoded.get(EXP), Some(&json!(4600)));
    }

    #[test]
    fn test_caller_jti_is_kept() {
        let claims =
            issuer_at(1000).build_claims(&Subject, ClaimSet::new().with(JTI, "session-9"));

        assert_eq!(claims.get(JTI), Some(&json!("session-9")));
        assert_eq!(claims.get(UID), Some(&json!(42)));
    }

    #[test]
    fn test_issuer_managed_claims_override_caller() {
        let extra = ClaimSet::new()
            .with(IAT, 1)
            .with(UID, "spoofed")
            .with("role", "admin");
        let claims = issuer_at(1000).build_claims(&Subject, extra);

        assert_eq!(claims.get(IAT), Some(&json!(1000)));
        assert_eq!(claims.get(UID), Some(&json!(42)));
        assert_eq!(claims.get("role"), Some(&json!("admin")));
    }

    #[test]
    fn test_issuer_context_fills_iss_and_aud() {
        let issuer = issuer_at(1000)
            .with_issuer_context(Arc::new(StaticIssuer::new("https://auth.example.com")));
        let claims = issuer.build_claims(&Subject, ClaimSet::new());

        assert_eq!(claims.get(ISS), Some(&json!("https://auth.example.com")));
        assert_eq!(claims.get(AUD), Some(&json!("https://auth.example.com")));
    }

    #[test]
    fn test_issue_uses_configured_header() {
        let config = JwtConfig::new("s3cr3t", 3600)
            .with_algorithm("HS384")
            .with_header("kid", "key-1");
        let token = TokenIssuer::new(config).unwrap().issue_token(&Subject).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS384);
        assert_eq!(header.kid.as_deref(), Some("key-1"));
    }

    #[test]
    fn test_mismatched_algorithm_is_signing_failure() {
        // An HMAC secret cannot produce an RSA signature
        let config = JwtConfig::new("s3cr3t", 3600).with_algorithm("RS256");
        let result = TokenIssuer::new(config).unwrap().issue_token(&Subject);

        assert!(matches!(result, Err(TokenError::SigningFailure(_))));
    }

    #[test]
    fn test_unknown_algorithm_rejected_at_construction() {
        let config = JwtConfig::new("s3cr3t", 3600).with_algorithm("none");
        assert!(TokenIssuer::new(config).is_err());
    }

    #[test]
    fn test_empty_secret_rejected_at_construction() {
        let result = TokenIssuer::new(JwtConfig::new("", 3600));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = TokenIssuer::new(JwtConfig::new("s3cr3t", 0));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
