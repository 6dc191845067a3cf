//! Shared helpers for rpcenv-core integration tests
//!
//! `serde_json::Value` sorts object keys, so member order is checked with a
//! small visitor that records keys as they appear in the encoded bytes.

#![allow(dead_code)]

use rpcenv_core::RawId;
use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use std::fmt;

/// Build an id from a token known to be valid
pub fn id(token: &str) -> RawId {
    RawId::new(token).expect("valid id token")
}

/// Object keys in wire order
#[derive(Debug, Default, PartialEq)]
pub struct OrderedKeys(pub Vec<String>);

impl<'de> Deserialize<'de> for OrderedKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = OrderedKeys;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut keys = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    keys.push(key);
                }
                Ok(OrderedKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

/// Key layout of an encoded response: top-level keys and, when present,
/// the keys of the nested error object
#[derive(Debug, Default)]
pub struct Layout {
    pub top: Vec<String>,
    pub error: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LayoutVisitor;

        impl<'de> Visitor<'de> for LayoutVisitor {
            type Value = Layout;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON-RPC response object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut layout = Layout::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "error" {
                        layout.error = Some(map.next_value::<OrderedKeys>()?.0);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                    layout.top.push(key);
                }
                Ok(layout)
            }
        }

        deserializer.deserialize_map(LayoutVisitor)
    }
}

pub fn layout(bytes: &[u8]) -> Layout {
    serde_json::from_slice(bytes).expect("encoded response is a JSON object")
}

/// The raw text of the top-level `id` member
pub fn raw_id_member(bytes: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct IdOnly<'a> {
        #[serde(borrow)]
        id: &'a serde_json::value::RawValue,
    }

    let parsed: IdOnly = serde_json::from_slice(bytes).expect("response has an id member");
    parsed.id.get().to_string()
}
