use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document entry as returned by the store, before decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Serialized payload, usually JSON text but sometimes already decoded
    pub data: Value,
}

/// A single keyed record within an owner's collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub owner: String,
    pub collection: String,
    /// Unique within (owner, collection)
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn from_raw(owner: &str, collection: &str, id: String, raw: RawDocument) -> Self {
        Self {
            owner: owner.to_string(),
            collection: collection.to_string(),
            id,
            data: raw.data,
        }
    }

    /// Decode the payload into the caller's type
    ///
    /// String payloads are treated as encoded JSON text and parsed; if that
    /// fails the string is decoded as a plain value. Anything else arrived
    /// pre-decoded and is converted directly.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.data {
            Value::String(text) => serde_json::from_str(text)
                .or_else(|_| serde_json::from_value(Value::String(text.clone()))),
            other => serde_json::from_value(other.clone()),
        }
    }
}

/// Encode a value into the store's payload representation (JSON text)
pub fn encode_payload<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
