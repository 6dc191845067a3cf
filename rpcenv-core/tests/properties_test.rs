//! Structural properties of encoded responses

mod common;

use common::{id, layout, raw_id_member};
use rpcenv_core::{codec, ErrorObject, Outcome, RawId, Response};
use serde_json::{json, Value};

fn success_values() -> Vec<Value> {
    vec![
        Value::Null,
        json!(false),
        json!(0),
        json!(-1.5),
        json!(""),
        json!("0xdeadbeef"),
        json!([]),
        json!([1, "two", null]),
        json!({}),
        json!({"nested": {"deep": [true]}}),
    ]
}

fn error_objects() -> Vec<ErrorObject> {
    vec![
        ErrorObject::new(1234, "test err"),
        ErrorObject::new(0, ""),
        ErrorObject::with_data(-32000, "server error", Value::Null),
        ErrorObject::with_data(3, "execution reverted", json!("0x08c379a0")),
        ErrorObject::with_data(-1, "zero-like", json!(false)),
        ErrorObject::method_not_found("eth_foo").with_http_status(404),
    ]
}

fn ids() -> Vec<RawId> {
    ["123", "\"123\"", "0", "-7", "1.50", "\"\"", "null", "\"a b\"", "18446744073709551616"]
        .iter()
        .map(|t| id(t))
        .collect()
}

#[test]
fn test_success_has_result_and_no_error() {
    for value in success_values() {
        let resp: Response = Response::success(id("1"), value.clone());
        let bytes = codec::encode(&resp).unwrap();

        let keys = layout(&bytes);
        assert_eq!(keys.top, vec!["jsonrpc", "result", "id"]);
        assert!(keys.error.is_none());

        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["result"], value);
    }
}

#[test]
fn test_failure_has_error_and_no_result() {
    for error in error_objects() {
        let resp: Response = Response::failure(id("1"), error);
        let keys = layout(&codec::encode(&resp).unwrap());

        assert_eq!(keys.top, vec!["jsonrpc", "error", "id"]);
    }
}

#[test]
fn test_error_member_keys() {
    for error in error_objects() {
        let expected: Vec<&str> = if error.data.is_some() {
            vec!["code", "message", "data"]
        } else {
            vec!["code", "message"]
        };

        let resp: Response = Response::failure(id("1"), error);
        let keys = layout(&codec::encode(&resp).unwrap());
        assert_eq!(keys.error.unwrap(), expected);
    }
}

#[test]
fn test_outcome_from_handler_result() {
    let handled: Vec<Result<Value, ErrorObject>> = vec![
        Ok(json!("0x1")),
        Err(ErrorObject::invalid_params("missing block")),
    ];

    let layouts: Vec<Vec<String>> = handled
        .into_iter()
        .map(|r| Response::new(id("9"), Outcome::from(r)))
        .map(|resp: Response| layout(&codec::encode(&resp).unwrap()).top)
        .collect();

    assert_eq!(layouts[0], vec!["jsonrpc", "result", "id"]);
    assert_eq!(layouts[1], vec!["jsonrpc", "error", "id"]);
}

#[test]
fn test_id_is_byte_identical() {
    for raw in ids() {
        let ok: Response = Response::success(raw.clone(), json!(1));
        let failed: Response = Response::failure(raw.clone(), ErrorObject::new(1, "m"));

        for resp in [ok, failed] {
            let bytes = codec::encode(&resp).unwrap();
            assert_eq!(raw_id_member(&bytes), raw.as_str());
        }
    }
}

#[test]
fn test_id_token_kind_preserved() {
    let numeric: Response = Response::success(id("123"), json!(null));
    let quoted: Response = Response::success(id("\"123\""), json!(null));

    let numeric = codec::encode_to_string(&numeric).unwrap();
    let quoted = codec::encode_to_string(&quoted).unwrap();

    assert!(numeric.ends_with(r#""id":123}"#));
    assert!(quoted.ends_with(r#""id":"123"}"#));
}

#[test]
fn test_large_numeric_id_not_rounded() {
    let resp: Response = Response::success(id("18446744073709551616"), json!(true));
    assert_eq!(
        codec::encode_to_string(&resp).unwrap(),
        r#"{"jsonrpc":"2.0","result":true,"id":18446744073709551616}"#
    );
}

#[test]
fn test_id_from_request_bytes() {
    // The slice a request parser would capture for the id member
    let request = br#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":"abc-1"}"#;
    let start = request.windows(5).position(|w| w == b"\"id\":").unwrap() + 5;
    let raw = RawId::from_slice(&request[start..request.len() - 1]).unwrap();

    let resp: Response = Response::success(raw, json!("0xa"));
    assert_eq!(
        codec::encode_to_string(&resp).unwrap(),
        r#"{"jsonrpc":"2.0","result":"0xa","id":"abc-1"}"#
    );
}

#[test]
fn test_every_response_starts_with_version() {
    let mut responses: Vec<Response> = success_values()
        .into_iter()
        .map(|v| Response::success(id("1"), v))
        .collect();
    responses.extend(error_objects().into_iter().map(|e| Response::failure(id("1"), e)));

    for resp in &responses {
        let text = codec::encode_to_string(resp).unwrap();
        assert!(text.starts_with(r#"{"jsonrpc":"2.0","#));
    }
}
