//! Claim set carried inside a token payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issuer claim name
pub const ISS: &str = "iss";
/// Audience claim name
pub const AUD: &str = "aud";
/// Issued-at claim name
pub const IAT: &str = "iat";
/// Not-before claim name
pub const NBF: &str = "nbf";
/// Expiration claim name
pub const EXP: &str = "exp";
/// Payload uid claim name
pub const UID: &str = "uid";
/// Unique lookup identifier claim name
pub const JTI: &str = "jti";

/// Insertion-ordered mapping of claim name to JSON value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a claim, replacing any previous value but keeping its position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Set a claim only if it is absent or explicitly `null`
    pub fn insert_if_absent(&mut self, name: &str, value: impl Into<Value>) {
        if self.get(name).is_none_or(Value::is_null) {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claim names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The `jti` claim, treating an explicit `null` as absent
    pub fn jti(&self) -> Option<&Value> {
        self.get(JTI).filter(|v| !v.is_null())
    }

    /// Read a numeric date claim (seconds since epoch).
    ///
    /// Returns `Ok(None)` when the claim is absent and `Err` with the claim
    /// name when it is present but not a number.
    pub fn timestamp(&self, name: &'static str) -> Result<Option<i64>, &'static str> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .or_else(|| value.as_f64().map(|f| f.floor() as i64))
                .map(Some)
                .ok_or(name),
        }
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
