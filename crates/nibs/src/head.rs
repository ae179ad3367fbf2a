//! Nibs head codec.
//!
//! Every Nibs value starts with a head: a 4-bit small tag in the high
//! nibble of byte 0 plus an unsigned payload (the "big" value). Payloads
//! below 12 pack into the low nibble; larger ones spill into 1, 2, 4, or 8
//! follow-up bytes selected by the low-nibble values 12 through 15.
//! Follow-up bytes are little-endian regardless of host.

use nibs_buffers::Writer;

use crate::error::DecodeError;

/// Number of bytes [`write_head`] emits for payload `big`.
#[inline]
pub fn head_size(big: u64) -> usize {
    if big < 12 {
        1
    } else if big < 0x100 {
        2
    } else if big < 0x1_0000 {
        3
    } else if big < 0x1_0000_0000 {
        5
    } else {
        9
    }
}

/// Writes a head with the given small tag and payload.
pub fn write_head(writer: &mut Writer, tag: u8, big: u64) {
    if big < 12 {
        writer.u8(tag << 4 | big as u8);
    } else if big < 0x100 {
        writer.u8(tag << 4 | 12);
        writer.u8(big as u8);
    } else if big < 0x1_0000 {
        writer.u8(tag << 4 | 13);
        writer.u16(big as u16);
    } else if big < 0x1_0000_0000 {
        writer.u8(tag << 4 | 14);
        writer.u32(big as u32);
    } else {
        writer.u8(tag << 4 | 15);
        writer.u64(big);
    }
}

/// Reads the head at `offset`. Returns `(head_len, tag, big)`.
pub fn read_head(data: &[u8], offset: usize) -> Result<(usize, u8, u64), DecodeError> {
    let first = *data.get(offset).ok_or(DecodeError::TruncatedHead(offset))?;
    let tag = first >> 4;
    let low = first & 0xf;
    match low {
        0..=11 => Ok((1, tag, low as u64)),
        12 => {
            let b = data
                .get(offset + 1)
                .ok_or(DecodeError::TruncatedHead(offset))?;
            Ok((2, tag, *b as u64))
        }
        13 => {
            let b = data
                .get(offset + 1..offset + 3)
                .ok_or(DecodeError::TruncatedHead(offset))?;
            Ok((3, tag, u16::from_le_bytes([b[0], b[1]]) as u64))
        }
        14 => {
            let b = data
                .get(offset + 1..offset + 5)
                .ok_or(DecodeError::TruncatedHead(offset))?;
            Ok((5, tag, u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u64))
        }
        _ => {
            let b = data
                .get(offset + 1..offset + 9)
                .ok_or(DecodeError::TruncatedHead(offset))?;
            Ok((
                9,
                tag,
                u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
            ))
        }
    }
}

/// Maps a signed integer to its unsigned zigzag form: small absolute
/// values map to small unsigned values.
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(zz: u64) -> i64 {
    ((zz >> 1) as i64) ^ -((zz & 1) as i64)
}
