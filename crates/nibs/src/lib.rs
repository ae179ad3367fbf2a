//! Nibs binary serialization and the Tibs text format.
//!
//! Nibs is a self-describing binary format with zero-copy lazy access to
//! composite containers; Tibs is its human-readable counterpart, a
//! superset of JSON with byte strings, big integers, references, scopes,
//! and indexed containers. Both codecs share one [`Value`] model, so a
//! document flows Tibs text ⇄ [`Value`] ⇄ Nibs bytes.
//!
//! # Example
//!
//! ```
//! use nibs::{tibs, Value};
//!
//! let value = tibs::decode(b"{\"name\":\"Tim\"}").unwrap();
//! let bytes = nibs::encode(&value).unwrap();
//! assert_eq!(
//!     bytes,
//!     [0xb9, 0x94, 0x6e, 0x61, 0x6d, 0x65, 0x93, 0x54, 0x69, 0x6d]
//! );
//!
//! // Containers decode lazily: the map handle walks the buffer on
//! // demand instead of materializing pairs.
//! let (decoded, consumed) = nibs::decode(&bytes).unwrap();
//! assert_eq!(consumed, bytes.len());
//! let nibs::Decoded::Map(map) = decoded else { panic!() };
//! assert_eq!(
//!     map.get(&Value::Str("name".into())).unwrap(),
//!     Some(nibs::Decoded::Str("Tim"))
//! );
//! ```

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod head;
pub mod tibs;
mod value;

pub use decoder::{decode, decode_at, skip, Decoded, MapHandle, MapIter, TupleHandle, TupleIter};
pub use encoder::{encode, NibsEncoder};
pub use error::{DecodeError, EncodeError};
pub use nibs_hex::{from_hex, to_hex, HexError};
pub use tibs::{TibsDecoder, TibsEncoder, TibsError};
pub use value::Value;
