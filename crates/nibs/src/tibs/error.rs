//! Tibs parse errors.

use thiserror::Error;

/// A Tibs syntax error at a byte offset, with the row and column derived
/// by scanning from the start of the document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TibsError {
    /// An unexpected byte.
    #[error("Unexpected '{found}' at index {index} (row {row} / col {col})")]
    Unexpected {
        found: char,
        index: usize,
        row: usize,
        col: usize,
    },
    /// Input ended where more was required.
    #[error("Unexpected EOS at index {index} (row {row} / col {col})")]
    UnexpectedEos {
        index: usize,
        row: usize,
        col: usize,
    },
}

impl TibsError {
    /// The byte offset the error was reported at.
    pub fn index(&self) -> usize {
        match self {
            TibsError::Unexpected { index, .. } | TibsError::UnexpectedEos { index, .. } => *index,
        }
    }
}
