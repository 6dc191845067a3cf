//! Response encoding
//!
//! Turns a `Response` into the compact JSON bytes handed to the transport.
//! Encoding is a pure function of the envelope: it keeps no state, takes no
//! locks and can run on any number of threads at once.
//!
//! # Error Handling
//!
//! The only way encoding can fail is a `result` or `data` value that has no
//! JSON form: a NaN or infinite float, a map with non-string keys, or a
//! `Serialize` impl that reports an error. That surfaces as
//! `Error::Serialization` and nothing is returned or written. The id was
//! checked when the `RawId` was built, so it cannot fail here.
//!
//! `serde_json` on its own writes non-finite floats as `null`; the encoder
//! rejects them instead so a caller's value is never silently replaced.
//!
//! This module never builds a fallback error envelope on failure. Mapping a
//! failed encode to an internal-error reply is left to the caller, which can
//! use `Response::from_error` and encode again.
//!
//! # Examples
//!
//! ```rust
//! use rpcenv_core::{codec, RawId, Response};
//! use serde_json::json;
//!
//! let response: Response = Response::success(RawId::new("123").unwrap(), json!("foobar"));
//! let bytes = codec::encode(&response).unwrap();
//! assert_eq!(bytes, br#"{"jsonrpc":"2.0","result":"foobar","id":123}"#);
//! ```

use crate::error::{Error, Result};
use crate::finite::ensure_finite;
use crate::types::Response;
use serde::Serialize;
use std::io::Write;

/// Encode a response to compact JSON bytes
///
/// # Errors
///
/// Returns `Error::Serialization` if the result or error data cannot be
/// represented as JSON, including NaN and infinite floats.
#[tracing::instrument(level = "trace", skip(response), fields(id = %response.id()))]
pub fn encode<T: Serialize, D: Serialize>(response: &Response<T, D>) -> Result<Vec<u8>> {
    let bytes = checked(response, serde_json::to_vec)?;

    tracing::trace!(
        len = bytes.len(),
        is_error = response.is_error(),
        "Response encoded"
    );
    Ok(bytes)
}

/// Encode a response to a JSON string
///
/// Same output as `encode`, for transports that send text frames.
pub fn encode_to_string<T: Serialize, D: Serialize>(response: &Response<T, D>) -> Result<String> {
    checked(response, serde_json::to_string)
}

/// Reject non-finite floats, then run `serialize`, logging any failure
fn checked<T, D, O>(
    response: &Response<T, D>,
    serialize: impl FnOnce(&Response<T, D>) -> serde_json::Result<O>,
) -> Result<O>
where
    T: Serialize,
    D: Serialize,
{
    ensure_finite(response)
        .and_then(|()| serialize(response))
        .map_err(|e| {
            tracing::warn!(error = %e, id = %response.id(), "Failed to encode response");
            Error::Serialization(e.to_string())
        })
}

/// Encode a response and write it to `writer`
///
/// The response is fully encoded before anything is written, so a
/// serialization failure leaves the writer untouched.
///
/// # Errors
///
/// - `Error::Serialization` if the response cannot be encoded
/// - `Error::Io` if the writer fails
///
/// # Examples
///
/// ```rust
/// use rpcenv_core::{codec, ErrorObject, RawId, Response};
///
/// let response: Response = Response::failure(
///     RawId::new("\"7\"").unwrap(),
///     ErrorObject::new(1234, "test err"),
/// );
///
/// let mut body = Vec::new();
/// codec::encode_to_writer(&mut body, &response).unwrap();
/// assert_eq!(
///     body,
///     br#"{"jsonrpc":"2.0","error":{"code":1234,"message":"test err"},"id":"7"}"#
/// );
/// ```
pub fn encode_to_writer<W, T, D>(mut writer: W, response: &Response<T, D>) -> Result<()>
where
    W: Write,
    T: Serialize,
    D: Serialize,
{
    let bytes = encode(response)?;
    writer.write_all(&bytes).map_err(|e| {
        tracing::warn!(error = %e, id = %response.id(), "Failed to write response");
        Error::Io(e.to_string())
    })
}

/// Encode several responses as one JSON array
///
/// Used to answer a batch request. Responses keep their input order; ids are
/// neither checked for uniqueness nor reordered. An empty slice encodes as
/// `[]`. If any element fails to encode, the whole batch fails.
///
/// # Examples
///
/// ```rust
/// use rpcenv_core::{codec, RawId, Response};
/// use serde_json::json;
///
/// let responses: Vec<Response> = vec![
///     Response::success(RawId::new("1").unwrap(), json!(42)),
///     Response::success(RawId::new("2").unwrap(), json!(99)),
/// ];
///
/// let bytes = codec::encode_batch(&responses).unwrap();
/// assert_eq!(
///     bytes,
///     br#"[{"jsonrpc":"2.0","result":42,"id":1},{"jsonrpc":"2.0","result":99,"id":2}]"#
/// );
/// ```
#[tracing::instrument(level = "trace", skip(responses), fields(batch_size = responses.len()))]
pub fn encode_batch<T: Serialize, D: Serialize>(responses: &[Response<T, D>]) -> Result<Vec<u8>> {
    let bytes = ensure_finite(responses)
        .and_then(|()| serde_json::to_vec(responses))
        .map_err(|e| {
            tracing::warn!(error = %e, batch_size = responses.len(), "Failed to encode batch");
            Error::Serialization(e.to_string())
        })?;

    tracing::debug!(
        batch_size = responses.len(),
        len = bytes.len(),
        "Batch encoded"
    );
    Ok(bytes)
}
