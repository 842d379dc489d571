//! JWT configuration shared by the issuer and the verifier

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{Algorithm, Header};
use serde::Deserialize;

use crate::domain::DomainError;

/// How the configured secret string is turned into key bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// UTF-8 bytes of the string
    #[default]
    Plain,
    /// Unpadded base64url, as in the `k` member of an `oct` JWK
    Base64Url,
}

/// Header members that may be set through `extra_header`
const SUPPORTED_HEADER_FIELDS: &[&str] = &["kid", "typ", "cty", "jku", "x5u", "x5t"];

/// Immutable token configuration, loaded once at startup
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub secret_encoding: SecretEncoding,
    /// JWA name, e.g. `HS256`
    pub algorithm: String,
    pub expiry_seconds: u64,
    /// Clock skew tolerated on `exp`, `nbf` and `iat`
    pub leeway_seconds: u64,
    /// Reject tokens that carry no `exp` claim
    pub require_exp: bool,
    pub extra_header: BTreeMap<String, String>,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("secret_encoding", &self.secret_encoding)
            .field("algorithm", &self.algorithm)
            .field("expiry_seconds", &self.expiry_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("require_exp", &self.require_exp)
            .field("extra_header", &self.extra_header)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            secret_encoding: SecretEncoding::Plain,
            algorithm: "HS256".to_string(),
            expiry_seconds: 3600,
            leeway_seconds: 0,
            require_exp: true,
            extra_header: BTreeMap::new(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiry_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            expiry_seconds,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_secret_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.secret_encoding = encoding;
        self
    }

    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    pub fn with_require_exp(mut self, require: bool) -> Self {
        self.require_exp = require;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_header.insert(name.into(), value.into());
        self
    }

    /// Check everything that can be checked without signing a token
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.secret.is_empty() {
            return Err(DomainError::configuration("JWT secret must not be empty"));
        }

        if self.expiry_seconds == 0 {
            return Err(DomainError::configuration(
                "JWT expiry must be greater than zero",
            ));
        }

        self.algorithm()?;
        self.secret_bytes()?;
        self.header()?;

        Ok(())
    }

    pub fn algorithm(&self) -> Result<Algorithm, DomainError> {
        Algorithm::from_str(&self.algorithm).map_err(|_| {
            DomainError::configuration(format!("Unsupported JWT algorithm: {}", self.algorithm))
        })
    }

    pub fn secret_bytes(&self) -> Result<Vec<u8>, DomainError> {
        match self.secret_encoding {
            SecretEncoding::Plain => Ok(self.secret.as_bytes().to_vec()),
            SecretEncoding::Base64Url => URL_SAFE_NO_PAD.decode(&self.secret).map_err(|e| {
                DomainError::configuration(format!("Invalid base64url JWT secret: {}", e))
            }),
        }
    }

    /// Token header: the configured algorithm plus any extra members
    pub fn header(&self) -> Result<Header, DomainError> {
        let mut header = Header::new(self.algorithm()?);

        for (name, value) in &self.extra_header {
            let value = Some(value.clone());
            match name.as_str() {
                "kid" => header.kid = value,
                "typ" => header.typ = value,
                "cty" => header.cty = value,
                "jku" => header.jku = value,
                "x5u" => header.x5u = value,
                "x5t" => header.x5t = value,
                other => {
                    return Err(DomainError::configuration(format!(
                        "Unsupported JWT header field: {} (supported: {})",
                        other,
                        SUPPORTED_HEADER_FIELDS.join(", ")
                    )))
                }
            }
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::new("s3cr3t", 3600);

        assert_eq!(config.algorithm().unwrap(), Algorithm::HS256);
        assert_eq!(config.leeway_seconds, 0);
        assert!(config.require_exp);
        assert!(config.extra_header.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtConfig::new("", 3600).validate().is_err());
    }

    #[test]
    fn test_zero_expiry_rejected() {
        assert!(JwtConfig::new("s3cr3t", 0).validate().is_err());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let config = JwtConfig::new("s3cr3t", 3600).with_algorithm("HS999");
        assert!(config.algorithm().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base64url_secret() {
        let config = JwtConfig::new(URL_SAFE_NO_PAD.encode(b"raw-key"), 60)
            .with_secret_encoding(SecretEncoding::Base64Url);
        assert_eq!(config.secret_bytes().unwrap(), b"raw-key".to_vec());

        let broken = JwtConfig::new("not base64!", 60)
            .with_secret_encoding(SecretEncoding::Base64Url);
        assert!(broken.secret_bytes().is_err());
    }

    #[test]
    fn test_extra_header_fields() {
        let header = JwtConfig::new("s3cr3t", 60)
            .with_header("kid", "key-1")
            .with_header("cty", "user")
            .header()
            .unwrap();

        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.kid.as_deref(), Some("key-1"));
        assert_eq!(header.cty.as_deref(), Some("user"));
    }

    #[test]
    fn test_unknown_header_field_rejected() {
        let config = JwtConfig::new("s3cr3t", 60).with_header("foo", "bar");
        assert!(config.header().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", JwtConfig::new("s3cr3t", 60));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: JwtConfig =
            serde_json::from_str(r#"{"secret": "s3cr3t", "algorithm": "HS512"}"#).unwrap();

        assert_eq!(config.algorithm().unwrap(), Algorithm::HS512);
        assert_eq!(config.expiry_seconds, 3600);
        assert_eq!(config.secret_encoding, SecretEncoding::Plain);
    }
}
