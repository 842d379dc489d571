//! User entity and related types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::auth::TokenSubject;

const MAX_USER_ID_LENGTH: usize = 64;

/// Largest float that still converts to a `u64` without saturating
const U64_FLOAT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserIdError {
    #[error("User ID cannot be empty")]
    Empty,

    #[error("User ID exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("User ID contains invalid character: '{0}'")]
    InvalidCharacter(char),

    #[error("User ID claim must be a string or a non-negative whole number")]
    UnsupportedClaim,
}

/// User identifier - ASCII alphanumerics, `-` and `_`, at most 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(UserIdError::Empty);
        }

        if id.len() > MAX_USER_ID_LENGTH {
            return Err(UserIdError::TooLong(MAX_USER_ID_LENGTH));
        }

        if let Some(c) = id
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(UserIdError::InvalidCharacter(c));
        }

        Ok(Self(id))
    }

    /// Build a UserId from a `jti` claim value.
    ///
    /// Strings are taken as-is. Non-negative whole numbers, integer or
    /// float (`42` and `42.0`), are rendered in decimal so numeric primary
    /// keys round-trip through the token.
    pub fn from_claim(value: &Value) -> Result<Self, UserIdError> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(int), _) => Self::new(int.to_string()),
                (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f < U64_FLOAT_LIMIT => {
                    Self::new((f as u64).to_string())
                }
                _ => Err(UserIdError::UnsupportedClaim),
            },
            _ => Err(UserIdError::UnsupportedClaim),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

/// The default identity behind a token's `jti`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    status: UserStatus,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            status: UserStatus::Active,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Whether tokens may be issued to or resolved for this user
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
    }

    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
    }
}

/// Users are looked up by primary key, which is also their public uid
impl TokenSubject for User {
    fn payload_uid(&self) -> Value {
        Value::String(self.id.as_str().to_string())
    }

    fn unique_lookup_id(&self) -> Value {
        Value::String(self.id.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::new("user-1").is_ok());
        assert!(UserId::new("42").is_ok());
        assert_eq!(UserId::new(""), Err(UserIdError::Empty));
        assert_eq!(UserId::new("a".repeat(65)), Err(UserIdError::TooLong(64)));
        assert_eq!(UserId::new("bad id"), Err(UserIdError::InvalidCharacter(' ')));
    }

    #[test]
    fn test_user_id_from_claim() {
        assert_eq!(UserId::from_claim(&json!("user-1")).unwrap().as_str(), "user-1");
        assert_eq!(UserId::from_claim(&json!(42)).unwrap().as_str(), "42");
    }

    #[test]
    fn test_user_id_from_whole_float_claim() {
        assert_eq!(UserId::from_claim(&json!(42.0)).unwrap().as_str(), "42");
        assert_eq!(UserId::from_claim(&json!(0.0)).unwrap().as_str(), "0");
    }

    #[test]
    fn test_user_id_from_unsupported_claim() {
        assert_eq!(UserId::from_claim(&json!(-1)), Err(UserIdError::UnsupportedClaim));
        assert_eq!(UserId::from_claim(&json!(42.5)), Err(UserIdError::UnsupportedClaim));
        assert_eq!(UserId::from_claim(&json!(-3.0)), Err(UserIdError::UnsupportedClaim));
        assert_eq!(UserId::from_claim(&json!(1e30)), Err(UserIdError::UnsupportedClaim));
        assert_eq!(
            UserId::from_claim(&json!({"id": 1})),
            Err(UserIdError::UnsupportedClaim)
        );
        assert!(UserId::from_claim(&json!("bad id")).is_err());
    }

    #[test]
    fn test_user_is_token_subject() {
        let user = User::new(UserId::new("user-7").unwrap());
        assert_eq!(user.payload_uid(), json!("user-7"));
        assert_eq!(user.unique_lookup_id(), json!("user-7"));
    }

    #[test]
    fn test_user_status_changes() {
        let mut user = User::new(UserId::new("admin").unwrap());
        assert!(user.is_active());

        user.suspend();
        assert!(!user.is_active());
        assert_eq!(user.status(), UserStatus::Suspended);

        user.activate();
        assert!(user.is_active());
    }
}
