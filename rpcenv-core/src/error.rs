//! Error types for rpcenv
//!
//! Two kinds of error live here and they should not be confused:
//!
//! - **Error**: what the encoder itself returns when it cannot produce bytes
//! - **ErrorObject**: the wire-format `error` member of a failed JSON-RPC
//!   response, supplied by the caller and written out by the encoder
//!
//! # Standard Error Codes
//!
//! JSON-RPC 2.0 reserves these codes:
//! - `-32700`: Parse error
//! - `-32600`: Invalid Request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32000 to -32099`: Server error (implementation-defined)
//!
//! The encoder does not check codes against these ranges; any `i64` is
//! written as given.
//!
//! # Examples
//!
//! ```rust
//! use rpcenv_core::ErrorObject;
//! use serde_json::json;
//!
//! let plain: ErrorObject = ErrorObject::new(1234, "test err");
//! assert!(plain.data.is_none());
//!
//! let detailed = ErrorObject::with_data(3, "execution reverted", json!("0x08c379a0"));
//! assert_eq!(detailed.code, 3);
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for rpcenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or encoding a response envelope
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The `result` or `data` value has no JSON representation
    ///
    /// Raised for NaN or infinite floats, maps with non-string keys, or any
    /// `Serialize` impl that reports a failure. Encoding is all-or-nothing, so no bytes are
    /// produced when this is returned.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The bytes given as a request id are not a single JSON value
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// The writer passed to `codec::encode_to_writer` failed
    #[error("IO error: {0}")]
    Io(String),
}

/// JSON-RPC 2.0 error object
///
/// Written as the `error` member of a failed response. `code` and `message`
/// are always emitted; `data` only when it was supplied. An explicit
/// `Some(Value::Null)`, an empty string or `false` all count as supplied and
/// are written out.
///
/// `http_status` is a hint for the transport and is never serialized.
///
/// # Examples
///
/// ```rust
/// use rpcenv_core::ErrorObject;
///
/// let error: ErrorObject = ErrorObject::method_not_found("eth_foo");
/// assert_eq!(error.code, -32601);
///
/// let json = serde_json::to_string(&error).unwrap();
/// assert_eq!(json, r#"{"code":-32601,"message":"Method not found: eth_foo"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject<D = serde_json::Value> {
    /// Numeric error code
    pub code: i64,

    /// Short human-readable description
    pub message: String,

    /// Optional auxiliary information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,

    /// HTTP status the transport should use when this error is the whole reply
    #[serde(skip)]
    pub http_status: Option<u16>,
}

impl<D> ErrorObject<D> {
    /// Create an error object without `data`
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            http_status: None,
        }
    }

    /// Create an error object carrying `data`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcenv_core::ErrorObject;
    /// use serde_json::json;
    ///
    /// let error = ErrorObject::with_data(
    ///     -32602,
    ///     "Invalid params",
    ///     json!({"missing": ["to"]}),
    /// );
    /// assert!(error.data.is_some());
    /// ```
    pub fn with_data(code: i64, message: impl Into<String>, data: D) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
            http_status: None,
        }
    }

    /// Attach `data`, possibly of a different type
    pub fn data<E>(self, data: E) -> ErrorObject<E> {
        ErrorObject {
            code: self.code,
            message: self.message,
            data: Some(data),
            http_status: self.http_status,
        }
    }

    /// Attach an HTTP status hint for the transport
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Parse error (-32700)
    ///
    /// Invalid JSON was received by the server.
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    /// Invalid request (-32600)
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(-32600, msg)
    }

    /// Method not found (-32601)
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// Invalid params (-32602)
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, msg)
    }

    /// Internal error (-32603)
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, msg)
    }

    /// Implementation-defined server error
    ///
    /// The reserved range is -32000 to -32099, but `code` is taken as is.
    pub fn server_error(code: i64, msg: impl Into<String>) -> Self {
        Self::new(code, msg)
    }
}

impl<D> fmt::Display for ErrorObject<D> {
    /// Formats as "[code] message", e.g. "[-32601] Method not found: foo"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl<D: fmt::Debug> std::error::Error for ErrorObject<D> {}

impl<D> From<Error> for ErrorObject<D> {
    /// Any encoder-side failure is reported to the peer as an internal error.
    fn from(err: Error) -> Self {
        ErrorObject::internal_error(err.to_string())
    }
}
