//! JSON-RPC 2.0 response envelope
//!
//! A response carries either a result or an error, never both and never
//! neither. Rather than two optional fields checked at encode time, the
//! choice is a sum type, `Outcome`, so an ill-formed envelope cannot be
//! built in the first place.
//!
//! # Wire Shape
//!
//! Members are always written in the same order:
//!
//! ```text
//! {"jsonrpc":"2.0","result":<value>,"id":<raw id>}
//! {"jsonrpc":"2.0","error":{"code":..,"message":..[,"data":..]},"id":<raw id>}
//! ```
//!
//! A null result is a real success value and is written as `"result":null`.
//!
//! # Examples
//!
//! ```rust
//! use rpcenv_core::{ErrorObject, RawId, Response};
//! use serde_json::json;
//!
//! let ok: Response = Response::success(RawId::new("1").unwrap(), json!("0x10"));
//! assert!(ok.is_success());
//!
//! let failed: Response = Response::failure(
//!     RawId::new("2").unwrap(),
//!     ErrorObject::method_not_found("eth_foo"),
//! );
//! assert!(failed.is_error());
//! ```

use crate::error::ErrorObject;
use crate::id::RawId;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Protocol version written in every response
pub const JSONRPC_VERSION: &str = "2.0";

/// Result of handling one request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = serde_json::Value, D = serde_json::Value> {
    /// Written as the `result` member
    Success(T),
    /// Written as the `error` member
    Failure(ErrorObject<D>),
}

impl<T, D> Outcome<T, D> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }
}

impl<T, D> From<Result<T, ErrorObject<D>>> for Outcome<T, D> {
    fn from(result: Result<T, ErrorObject<D>>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Built once per answered request, encoded, then dropped. The `id` is the
/// token captured from the request and is echoed without being decoded.
///
/// `T` is the result type and `D` the type of the error's `data`; both
/// default to `serde_json::Value`. Any `Serialize` type works, and a value
/// that cannot be represented as JSON makes encoding fail with
/// `Error::Serialization`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = serde_json::Value, D = serde_json::Value> {
    /// Success value or error object
    pub outcome: Outcome<T, D>,
    /// Raw id token from the request
    pub id: RawId,
}

impl<T, D> Response<T, D> {
    pub fn new(id: RawId, outcome: Outcome<T, D>) -> Self {
        Self { outcome, id }
    }

    /// Create a successful response
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcenv_core::{RawId, Response};
    ///
    /// let response: Response<Option<u64>> = Response::success(RawId::new("9").unwrap(), None);
    /// assert!(response.is_success());
    /// ```
    pub fn success(id: RawId, result: T) -> Self {
        Self::new(id, Outcome::Success(result))
    }

    /// Create a failed response
    pub fn failure(id: RawId, error: ErrorObject<D>) -> Self {
        Self::new(id, Outcome::Failure(error))
    }

    /// Create a failed response from any error convertible to an error object
    ///
    /// `ErrorObject` passes through unchanged; a crate `Error` becomes an
    /// internal error (-32603) carrying its message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcenv_core::{Error, RawId, Response};
    ///
    /// let response: Response = Response::from_error(
    ///     RawId::null(),
    ///     Error::Serialization("key must be a string".into()),
    /// );
    /// assert_eq!(response.error().unwrap().code, -32603);
    /// ```
    pub fn from_error(id: RawId, error: impl Into<ErrorObject<D>>) -> Self {
        Self::failure(id, error.into())
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_error()
    }

    /// The result value, if this is a success
    pub fn result(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The error object, if this is a failure
    pub fn error(&self) -> Option<&ErrorObject<D>> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn id(&self) -> &RawId {
        &self.id
    }

    pub fn into_parts(self) -> (RawId, Outcome<T, D>) {
        (self.id, self.outcome)
    }
}

impl<T: Serialize, D: Serialize> Serialize for Response<T, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Response", 3)?;
        state.serialize_field("jsonrpc", JSONRPC_VERSION)?;
        match &self.outcome {
            Outcome::Success(result) => state.serialize_field("result", result)?,
            Outcome::Failure(error) => state.serialize_field("error", error)?,
        }
        state.serialize_field("id", &self.id)?;
        state.end()
    }
}
