//! Nibs codec errors.

use thiserror::Error;

/// Errors produced while encoding a [`crate::Value`] to Nibs bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value kind has no representation on the wire.
    #[error("cannot encode {0} to nibs")]
    Unsupported(&'static str),
    /// Integer magnitude outside the zigzag-representable 64-bit range.
    #[error("integer {0} does not fit the 64-bit wire range")]
    IntegerOverflow(i128),
}

/// Errors produced while decoding Nibs bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The small tag at `offset` is not defined by this revision.
    #[error("unknown small tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    /// The SIMPLE subtype code is not false/true/null.
    #[error("unknown simple code {code} at offset {offset}")]
    UnknownSimple { code: u64, offset: usize },
    /// The buffer ends inside a head.
    #[error("truncated head at offset {0}")]
    TruncatedHead(usize),
    /// A declared body extends past the end of the buffer.
    #[error("truncated body at offset {offset}: need {need} bytes, have {have}")]
    TruncatedBody {
        offset: usize,
        need: usize,
        have: usize,
    },
    /// A string body is not valid UTF-8.
    #[error("string body at offset {0} is not valid utf-8")]
    InvalidUtf8(usize),
}
