//! Opaque request identifiers
//!
//! JSON-RPC clients correlate a response with its request by comparing the
//! `id` token they sent with the one they get back. Many clients compare the
//! raw token rather than a decoded value, so `123` and `"123"` are different
//! ids to them. `RawId` therefore never decodes the identifier: it keeps the
//! exact JSON fragment captured from the request and writes it back unchanged.
//!
//! # Validation
//!
//! Construction only checks that the bytes hold exactly one JSON value.
//! Nothing is normalised: numeric tokens stay numeric, quoted tokens stay
//! quoted, and whitespace inside the token is kept as is. Whitespace around
//! the token is not part of the value and is dropped.
//!
//! # Examples
//!
//! ```rust
//! use rpcenv_core::RawId;
//!
//! let numeric = RawId::new("123").unwrap();
//! let quoted = RawId::new(r#""123""#).unwrap();
//!
//! assert_eq!(numeric.as_str(), "123");
//! assert_eq!(quoted.as_str(), "\"123\"");
//! assert_ne!(numeric, quoted);
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::value::RawValue;
use std::fmt;
use std::hash::{Hash, Hasher};

/// JSON-RPC request identifier, stored as the raw JSON token
///
/// Serializes verbatim through `serde_json`, so the bytes written to the wire
/// are the bytes that were captured from the request.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RawId(Box<RawValue>);

impl RawId {
    /// Wrap an already-encoded JSON token
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidId` if `token` is empty or is not a single
    /// well-formed JSON value.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidId("id token is empty".to_string()));
        }
        RawValue::from_string(token)
            .map(RawId)
            .map_err(|e| Error::InvalidId(e.to_string()))
    }

    /// Wrap an already-encoded JSON token given as bytes
    ///
    /// This is the form the request layer usually has on hand: a slice of
    /// the inbound request body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let token = std::str::from_utf8(bytes).map_err(|e| Error::InvalidId(e.to_string()))?;
        Self::new(token)
    }

    /// The `null` identifier
    ///
    /// Used when the request id could not be recovered, e.g. when the
    /// request body was not valid JSON.
    pub fn null() -> Self {
        RawId(RawValue::NULL.to_owned())
    }

    /// The token exactly as it will be written
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    pub fn is_null(&self) -> bool {
        self.as_str() == "null"
    }

    /// Check whether this token is usable for request/response correlation
    ///
    /// A quoted string must not be empty, and objects and arrays are never
    /// accepted. Numbers, booleans and `null` pass. The encoder does not call
    /// this; it is meant for the layer that accepts requests.
    pub fn is_valid_correlation_id(&self) -> bool {
        let token = self.as_str();
        if token.starts_with('"') {
            return token.len() > 2;
        }
        !token.starts_with('{') && !token.starts_with('[')
    }
}

// Equality is lexical on purpose: `1` and `1.0` are different ids.
impl PartialEq for RawId {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RawId {}

impl Hash for RawId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RawId {
    type Error = Error;

    fn try_from(token: &str) -> Result<Self> {
        RawId::new(token)
    }
}

impl TryFrom<String> for RawId {
    type Error = Error;

    fn try_from(token: String) -> Result<Self> {
        RawId::new(token)
    }
}

impl TryFrom<Vec<u8>> for RawId {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        let token = String::from_utf8(bytes).map_err(|e| Error::InvalidId(e.to_string()))?;
        RawId::new(token)
    }
}
