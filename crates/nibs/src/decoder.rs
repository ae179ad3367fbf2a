//! Lazy Nibs decoder.
//!
//! Scalars decode directly; containers come back as handles that borrow
//! the backing buffer and walk it on demand. A handle stays valid while
//! the buffer it was decoded from is alive and unmodified; none of the
//! handle operations copy container bodies.

use crate::constants::{
    BYTES, FLOAT, INT, MAP, REF, SIMPLE, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE, STRING, TAG,
    TUPLE,
};
use crate::error::DecodeError;
use crate::head::{read_head, zigzag_decode};
use crate::value::Value;

/// Decodes the value at the start of `data`. Returns the value and the
/// total bytes it occupies (head plus body).
pub fn decode(data: &[u8]) -> Result<(Decoded<'_>, usize), DecodeError> {
    decode_at(data, 0)
}

/// One decoded Nibs value.
///
/// Scalar variants are materialized; `Tuple` and `Map` are lazy views
/// over the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Ref(u64),
    Bytes(&'a [u8]),
    Str(&'a str),
    Tuple(TupleHandle<'a>),
    Map(MapHandle<'a>),
}

impl<'a> Decoded<'a> {
    /// True for the lazy container variants.
    pub fn is_container(&self) -> bool {
        matches!(self, Decoded::Tuple(_) | Decoded::Map(_))
    }

    /// Materializes an owned [`Value`], recursing into containers.
    pub fn to_value(&self) -> Result<Value, DecodeError> {
        Ok(match self {
            Decoded::Null => Value::Null,
            Decoded::Bool(b) => Value::Bool(*b),
            Decoded::Int(n) => Value::Int(*n),
            Decoded::Float(f) => Value::Float(*f),
            Decoded::Ref(n) => Value::Ref(*n),
            Decoded::Bytes(b) => Value::Bytes(b.to_vec()),
            Decoded::Str(s) => Value::Str((*s).to_owned()),
            Decoded::Tuple(tuple) => {
                let mut items = Vec::new();
                for item in tuple.iter() {
                    let (_, value) = item?;
                    items.push(value.to_value()?);
                }
                Value::List(items)
            }
            Decoded::Map(map) => {
                let mut pairs = Vec::new();
                for pair in map.iter() {
                    let (key, value) = pair?;
                    pairs.push((key.to_value()?, value.to_value()?));
                }
                Value::Map(pairs)
            }
        })
    }
}

/// Decodes the value at `offset` in `data`.
pub fn decode_at(data: &[u8], offset: usize) -> Result<(Decoded<'_>, usize), DecodeError> {
    let mut x = offset;
    let (mut head, mut tag, mut big) = read_head(data, x)?;
    while tag == TAG {
        // Tag metadata is discarded; the wrapped value is the value.
        x += head;
        (head, tag, big) = read_head(data, x)?;
    }
    // Bytes consumed by tag wrappers plus this value's own head.
    let prefix = x - offset + head;
    match tag {
        INT => Ok((Decoded::Int(zigzag_decode(big)), prefix)),
        FLOAT => Ok((Decoded::Float(f64::from_bits(big)), prefix)),
        SIMPLE => match big {
            SIMPLE_FALSE => Ok((Decoded::Bool(false), prefix)),
            SIMPLE_TRUE => Ok((Decoded::Bool(true), prefix)),
            SIMPLE_NULL => Ok((Decoded::Null, prefix)),
            code => Err(DecodeError::UnknownSimple { code, offset: x }),
        },
        REF => Ok((Decoded::Ref(big), prefix)),
        BYTES => {
            let (start, end) = body_range(data, x, head, big)?;
            Ok((Decoded::Bytes(&data[start..end]), prefix + (end - start)))
        }
        STRING => {
            let (start, end) = body_range(data, x, head, big)?;
            let s = std::str::from_utf8(&data[start..end])
                .map_err(|_| DecodeError::InvalidUtf8(start))?;
            Ok((Decoded::Str(s), prefix + (end - start)))
        }
        TUPLE => {
            let (start, end) = body_range(data, x, head, big)?;
            Ok((
                Decoded::Tuple(TupleHandle {
                    data,
                    first: start,
                    last: end,
                }),
                prefix + (end - start),
            ))
        }
        MAP => {
            let (start, end) = body_range(data, x, head, big)?;
            Ok((
                Decoded::Map(MapHandle {
                    data,
                    first: start,
                    last: end,
                }),
                prefix + (end - start),
            ))
        }
        tag => Err(DecodeError::UnknownTag { tag, offset: x }),
    }
}

/// Advances past the value at `offset` without decoding it. Returns the
/// offset of the next value.
pub fn skip(data: &[u8], offset: usize) -> Result<usize, DecodeError> {
    let mut x = offset;
    loop {
        let (head, tag, big) = read_head(data, x)?;
        return match tag {
            0..=5 => Ok(x + head),
            TAG => {
                x += head;
                continue;
            }
            8..=15 => {
                let (_, end) = body_range(data, x, head, big)?;
                Ok(end)
            }
            tag => Err(DecodeError::UnknownTag { tag, offset: x }),
        };
    }
}

/// Bounds-checks a declared body of `big` bytes following the head.
fn body_range(
    data: &[u8],
    offset: usize,
    head: usize,
    big: u64,
) -> Result<(usize, usize), DecodeError> {
    let start = offset + head;
    let have = data.len().saturating_sub(start);
    if big > have as u64 {
        return Err(DecodeError::TruncatedBody {
            offset: start,
            need: big as usize,
            have,
        });
    }
    Ok((start, start + big as usize))
}

/// Lazy view over the body of an encoded tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TupleHandle<'a> {
    data: &'a [u8],
    first: usize,
    last: usize,
}

impl<'a> TupleHandle<'a> {
    /// Counts elements by walking the body. O(n).
    pub fn len(&self) -> Result<usize, DecodeError> {
        let mut count = 0;
        let mut x = self.first;
        while x < self.last {
            x = self.skip_within(x)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    fn skip_within(&self, x: usize) -> Result<usize, DecodeError> {
        let next = skip(self.data, x)?;
        check_within(x, next - x, self.last)?;
        Ok(next)
    }

    /// Returns the `index`-th element, 1-based. O(index).
    pub fn get(&self, index: usize) -> Result<Option<Decoded<'a>>, DecodeError> {
        if index == 0 {
            return Ok(None);
        }
        let mut x = self.first;
        for _ in 1..index {
            if x >= self.last {
                return Ok(None);
            }
            x = self.skip_within(x)?;
        }
        if x >= self.last {
            return Ok(None);
        }
        let (value, consumed) = decode_at(self.data, x)?;
        check_within(x, consumed, self.last)?;
        Ok(Some(value))
    }

    /// Iterates `(index, value)` in encoded order, 1-based.
    pub fn iter(&self) -> TupleIter<'a> {
        TupleIter {
            data: self.data,
            x: self.first,
            last: self.last,
            index: 0,
        }
    }
}

/// Cursor over a tuple body.
pub struct TupleIter<'a> {
    data: &'a [u8],
    x: usize,
    last: usize,
    index: usize,
}

impl<'a> Iterator for TupleIter<'a> {
    type Item = Result<(usize, Decoded<'a>), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.last {
            return None;
        }
        match self.step() {
            Ok(item) => Some(Ok(item)),
            Err(e) => {
                // Poison the cursor so the error is reported once.
                self.x = self.last;
                Some(Err(e))
            }
        }
    }
}

impl<'a> TupleIter<'a> {
    fn step(&mut self) -> Result<(usize, Decoded<'a>), DecodeError> {
        let (value, consumed) = decode_at(self.data, self.x)?;
        check_within(self.x, consumed, self.last)?;
        self.x += consumed;
        self.index += 1;
        Ok((self.index, value))
    }
}

/// Lazy view over the body of an encoded map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapHandle<'a> {
    data: &'a [u8],
    first: usize,
    last: usize,
}

impl<'a> MapHandle<'a> {
    /// Counts key/value pairs by walking the body. O(n).
    pub fn len(&self) -> Result<usize, DecodeError> {
        let mut count = 0;
        let mut x = self.first;
        while x < self.last {
            x = self.skip_within(x)?;
            x = self.check_value_offset(x)?;
            x = self.skip_within(x)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    fn skip_within(&self, x: usize) -> Result<usize, DecodeError> {
        let next = skip(self.data, x)?;
        check_within(x, next - x, self.last)?;
        Ok(next)
    }

    /// Looks up `key` by value equality, skipping non-matching values.
    /// O(n) in the body size.
    pub fn get(&self, key: &Value) -> Result<Option<Decoded<'a>>, DecodeError> {
        let mut x = self.first;
        while x < self.last {
            let (candidate, consumed) = decode_at(self.data, x)?;
            check_within(x, consumed, self.last)?;
            x = self.check_value_offset(x + consumed)?;
            if key_matches(&candidate, key) {
                let (value, consumed) = decode_at(self.data, x)?;
                check_within(x, consumed, self.last)?;
                return Ok(Some(value));
            }
            x = self.skip_within(x)?;
        }
        Ok(None)
    }

    /// Iterates `(key, value)` pairs in encoded order.
    pub fn iter(&self) -> MapIter<'a> {
        MapIter {
            data: self.data,
            x: self.first,
            last: self.last,
        }
    }

    fn check_value_offset(&self, x: usize) -> Result<usize, DecodeError> {
        if x >= self.last {
            // A key with no value: the body ends mid-pair.
            return Err(DecodeError::TruncatedBody {
                offset: x,
                need: 1,
                have: 0,
            });
        }
        Ok(x)
    }
}

/// Cursor over a map body.
pub struct MapIter<'a> {
    data: &'a [u8],
    x: usize,
    last: usize,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = Result<(Decoded<'a>, Decoded<'a>), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.last {
            return None;
        }
        match self.step() {
            Ok(pair) => Some(Ok(pair)),
            Err(e) => {
                self.x = self.last;
                Some(Err(e))
            }
        }
    }
}

impl<'a> MapIter<'a> {
    fn step(&mut self) -> Result<(Decoded<'a>, Decoded<'a>), DecodeError> {
        let (key, consumed) = decode_at(self.data, self.x)?;
        check_within(self.x, consumed, self.last)?;
        self.x += consumed;
        if self.x >= self.last {
            return Err(DecodeError::TruncatedBody {
                offset: self.x,
                need: 1,
                have: 0,
            });
        }
        let (value, consumed) = decode_at(self.data, self.x)?;
        check_within(self.x, consumed, self.last)?;
        self.x += consumed;
        Ok((key, value))
    }
}

/// A nested value must not extend past its container's body.
fn check_within(offset: usize, consumed: usize, last: usize) -> Result<(), DecodeError> {
    if offset + consumed > last {
        return Err(DecodeError::TruncatedBody {
            offset,
            need: consumed,
            have: last - offset,
        });
    }
    Ok(())
}

/// Scalar key equality between a lazily decoded key and a needle value.
/// Container keys never match (lookup by container is not supported).
fn key_matches(candidate: &Decoded<'_>, key: &Value) -> bool {
    match (candidate, key) {
        (Decoded::Null, Value::Null) => true,
        (Decoded::Bool(a), Value::Bool(b)) => a == b,
        (Decoded::Int(a), Value::Int(b)) => a == b,
        (Decoded::Int(a), Value::BigInt(b)) => i128::from(*a) == *b,
        (Decoded::Float(a), Value::Float(b)) => a == b,
        (Decoded::Ref(a), Value::Ref(b)) => a == b,
        (Decoded::Str(a), Value::Str(b)) => *a == b.as_str(),
        (Decoded::Bytes(a), Value::Bytes(b)) => *a == b.as_slice(),
        _ => false,
    }
}
