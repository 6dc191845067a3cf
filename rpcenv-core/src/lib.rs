//! Core JSON-RPC 2.0 response envelope types and encoder for rpcenv
//!
//! This crate is the last step before a reply goes on the wire. A transport
//! hands it the logical outcome of a request (a result value, or an error
//! code/message with optional data) together with the raw id token captured
//! from the request, and gets back compact JSON bytes.
//!
//! - **Types**: `Response` and `Outcome`, where success and failure are
//!   distinct variants so both-or-neither envelopes cannot be built
//! - **Id**: `RawId`, the request id kept as its original JSON token
//! - **Codec**: the encode operation, plus writer and batch variants
//! - **Error handling**: the encoder's `Error` and the wire `ErrorObject`
//! - **Observability**: `tracing` subscriber and OpenTelemetry setup
//!
//! Parsing requests, routing and the transport itself live elsewhere.
//!
//! # Example
//!
//! ```rust
//! use rpcenv_core::{codec, ErrorObject, RawId, Response};
//! use serde_json::json;
//!
//! // The id bytes exactly as they appeared in the request
//! let id = RawId::from_slice(br#""123""#).unwrap();
//!
//! let ok: Response = Response::success(id.clone(), json!("foobar"));
//! assert_eq!(
//!     codec::encode_to_string(&ok).unwrap(),
//!     r#"{"jsonrpc":"2.0","result":"foobar","id":"123"}"#
//! );
//!
//! let failed: Response = Response::failure(
//!     id,
//!     ErrorObject::with_data(1234, "test err", json!("revert")),
//! );
//! assert_eq!(
//!     codec::encode_to_string(&failed).unwrap(),
//!     r#"{"jsonrpc":"2.0","error":{"code":1234,"message":"test err","data":"revert"},"id":"123"}"#
//! );
//! ```

pub mod codec;
pub mod error;
mod finite;
pub mod id;
pub mod observability;
pub mod types;

pub use error::{Error, ErrorObject, Result};
pub use id::RawId;
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{Outcome, Response, JSONRPC_VERSION};
