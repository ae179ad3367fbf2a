/// The sixteen lowercase hex digits, indexed by nibble value.
pub const ALPHABET: [u8; 16] = *b"0123456789abcdef";
