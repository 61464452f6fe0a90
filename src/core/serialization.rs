//! JSON and MessagePack persistence for designs, roots and responses.
//!
//! Every public data type in the crate derives serde, so saving a design is a
//! single call.
//!
//! # Examples
//! ```rust
//! use polezero::core::{from_json, from_msgpack, to_json_pretty, to_msgpack};
//! use polezero::design::{FilterDesign, RootKind};
//!
//! let mut design = FilterDesign::from_import("zeros = [-1]\npoles = [0.5i]").unwrap();
//! design.move_root(RootKind::Pole, 0, polezero::math::Complex::new(0.0, 0.6)).unwrap();
//!
//! let json = to_json_pretty(&design).expect("json serialization");
//! let decoded: FilterDesign = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, design);
//!
//! let bytes = to_msgpack(&design).expect("msgpack serialization");
//! let decoded_msgpack: FilterDesign = from_msgpack(&bytes).expect("msgpack deserialization");
//! assert_eq!(decoded_msgpack, design);
//! ```

use serde::de::DeserializeOwned;

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Serialize a value to MessagePack bytes.
pub fn to_msgpack<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(value)
}

/// Deserialize a value from MessagePack bytes.
pub fn from_msgpack<T: DeserializeOwned>(payload: &[u8]) -> Result<T, rmp_serde::decode::Error> {
    rmp_serde::from_slice(payload)
}
