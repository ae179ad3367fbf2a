//! Tibs text codec.
//!
//! Tibs is a superset of JSON over the same value model as Nibs: byte
//! literals (`<010203>`), references (`&0`), scopes (`(value,ref0,...)`),
//! indexed containers (`[#...]`, `{#...}`), `inf`/`-inf`/`nan` literals,
//! and trailing commas.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::TibsDecoder;
pub use encoder::{EncodeHook, TibsEncoder};
pub use error::TibsError;

use crate::value::Value;

/// Parses one full Tibs document.
pub fn decode(input: &[u8]) -> Result<Value, TibsError> {
    TibsDecoder::new().decode(input)
}

/// Serializes a value to Tibs text.
pub fn encode(value: &Value) -> String {
    TibsEncoder::new().encode(value)
}
