//! Serde helpers for integers whose exact decimal text has to survive
//! decoding.
//!
//! Order amounts are arbitrary precision and are checked syntactically before
//! they are interpreted, so they are kept as the literal token the client sent.
//! Both JSON numbers (of any size, thanks to serde_json's
//! `arbitrary_precision`) and JSON strings are accepted.

use {
    serde::{Deserialize, Deserializer, Serializer, de},
    serde_json::Value,
};

pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => Ok(number.to_string()),
        Value::String(string) => Ok(string),
        other => Err(de::Error::custom(format!(
            "expected an integer encoded as a JSON number or string but got {other}"
        ))),
    }
}
