//! Nibs wire constants.

/// Small tag values (the high nibble of a head's first byte).
pub const INT: u8 = 0;
pub const FLOAT: u8 = 1;
pub const SIMPLE: u8 = 2;
pub const REF: u8 = 3;
pub const TAG: u8 = 7;
pub const BYTES: u8 = 8;
pub const STRING: u8 = 9;
pub const TUPLE: u8 = 10;
pub const MAP: u8 = 11;
/// Reserved for indexed lists; no encoder of this revision emits it.
pub const ARRAY: u8 = 12;

/// `SIMPLE` subtype codes carried in the head payload.
pub const SIMPLE_FALSE: u64 = 0;
pub const SIMPLE_TRUE: u64 = 1;
pub const SIMPLE_NULL: u64 = 2;
