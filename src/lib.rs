//! rpcenv - JSON-RPC 2.0 response envelopes
//!
//! Convenience crate re-exporting `rpcenv-core`. Depend on this crate when
//! you want the encoder, its types and the observability setup behind a
//! single name.
//!
//! # Quick Start
//!
//! ```rust
//! use rpcenv::{codec, RawId, Response};
//! use serde_json::json;
//!
//! fn reply(raw_id: &[u8], value: serde_json::Value) -> rpcenv::Result<Vec<u8>> {
//!     let response: Response = Response::success(RawId::from_slice(raw_id)?, value);
//!     codec::encode(&response)
//! }
//!
//! assert_eq!(
//!     reply(b"123", json!({"str": "test"})).unwrap(),
//!     br#"{"jsonrpc":"2.0","result":{"str":"test"},"id":123}"#
//! );
//! ```

pub use rpcenv_core as core;

pub use rpcenv_core::{
    codec, init_observability, shutdown_observability, Error, ErrorObject, ObservabilityConfig,
    Outcome, RawId, Response, Result, JSONRPC_VERSION,
};
