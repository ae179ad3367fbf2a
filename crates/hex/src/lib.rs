//! Hex encoding and decoding utilities.
//!
//! Tibs carries binary data as `<68656c6c6f>` byte literals; this crate
//! provides the byte↔ASCII-hex conversions behind that syntax. Output
//! digits are always lowercase; decoding accepts both cases.
//!
//! # Example
//!
//! ```
//! use nibs_hex::{from_hex, to_hex};
//!
//! let data = b"hello";
//! let encoded = to_hex(data);
//! assert_eq!(encoded, "68656c6c6f");
//! let decoded = from_hex(&encoded).unwrap();
//! assert_eq!(decoded.as_slice(), data);
//! ```

mod constants;
mod from_hex;
mod to_hex;

pub use constants::ALPHABET;
pub use from_hex::{from_hex, hex_val};
pub use to_hex::to_hex;

use thiserror::Error;

/// Error type for hex operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    /// The input has an odd number of digits.
    #[error("hex input has odd length {0}")]
    OddLength(usize),
    /// The input contains a byte that is not a hex digit.
    #[error("invalid hex digit 0x{0:02x} at offset {1}")]
    InvalidDigit(u8, usize),
}
