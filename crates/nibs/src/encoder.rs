//! Nibs binary encoder.

use nibs_buffers::Writer;

use crate::constants::{
    BYTES, FLOAT, INT, MAP, REF, SIMPLE, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE, STRING, TUPLE,
};
use crate::error::EncodeError;
use crate::head::{head_size, write_head, zigzag_encode};
use crate::value::Value;

/// Encodes one value into a fresh Nibs buffer.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    NibsEncoder::new().encode(value)
}

/// Encodes values into contiguous Nibs buffers.
///
/// Encoding runs in two passes: a size pass that records the body length
/// of every container in visit order, then a write pass that emits heads
/// and leaf bytes into a single allocation. Container heads carry the
/// byte length of their body, so child sizes must be known before the
/// first byte of a container is written.
pub struct NibsEncoder {
    writer: Writer,
    /// Container body sizes recorded by the size pass, in visit order.
    sizes: Vec<usize>,
    /// Read cursor into `sizes` during the write pass.
    size_x: usize,
    /// Registered reference-table entries, matched by value equality.
    refs: Vec<(u64, Value)>,
}

impl Default for NibsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NibsEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            sizes: Vec::new(),
            size_x: 0,
            refs: Vec::new(),
        }
    }

    /// Registers a reference-table entry. Values equal to `value` encode
    /// as `Ref(index)` from then on.
    pub fn register_ref(&mut self, index: u64, value: Value) {
        self.refs.push((index, value));
    }

    /// Encodes one value into a fresh buffer.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        self.sizes.clear();
        self.size_x = 0;
        let total = self.measure(value)?;
        self.writer.ensure_capacity(total);
        self.write_any(value)?;
        debug_assert_eq!(self.writer.written(), total);
        Ok(self.writer.flush())
    }

    fn ref_index(&self, value: &Value) -> Option<u64> {
        self.refs.iter().find(|(_, v)| v == value).map(|(i, _)| *i)
    }

    /// Size pass. Returns the serialized size of `value` and records every
    /// container body length for the write pass.
    fn measure(&mut self, value: &Value) -> Result<usize, EncodeError> {
        if let Some(index) = self.ref_index(value) {
            return Ok(head_size(index));
        }
        Ok(match value {
            Value::Null | Value::Bool(_) => 1,
            Value::Int(n) => head_size(zigzag_encode(*n)),
            Value::BigInt(n) => head_size(zigzag_encode(narrow(*n)?)),
            Value::Float(f) => head_size(f.to_bits()),
            Value::Ref(n) => head_size(*n),
            Value::Bytes(b) => head_size(b.len() as u64) + b.len(),
            Value::Str(s) => head_size(s.len() as u64) + s.len(),
            Value::List(items) | Value::Array(items) => {
                let slot = self.sizes.len();
                self.sizes.push(0);
                let mut body = 0;
                for item in items {
                    body += self.measure(item)?;
                }
                self.sizes[slot] = body;
                head_size(body as u64) + body
            }
            Value::Map(pairs) | Value::Trie(pairs) => {
                let slot = self.sizes.len();
                self.sizes.push(0);
                let mut body = 0;
                for (key, val) in pairs {
                    body += self.measure(key)?;
                    body += self.measure(val)?;
                }
                self.sizes[slot] = body;
                head_size(body as u64) + body
            }
            Value::Scope(..) => return Err(EncodeError::Unsupported("scope")),
        })
    }

    /// Write pass. Consumes the recorded container sizes in the same
    /// order the size pass produced them.
    fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        if let Some(index) = self.ref_index(value) {
            write_head(&mut self.writer, REF, index);
            return Ok(());
        }
        match value {
            Value::Null => write_head(&mut self.writer, SIMPLE, SIMPLE_NULL),
            Value::Bool(true) => write_head(&mut self.writer, SIMPLE, SIMPLE_TRUE),
            Value::Bool(false) => write_head(&mut self.writer, SIMPLE, SIMPLE_FALSE),
            Value::Int(n) => write_head(&mut self.writer, INT, zigzag_encode(*n)),
            Value::BigInt(n) => write_head(&mut self.writer, INT, zigzag_encode(narrow(*n)?)),
            Value::Float(f) => write_head(&mut self.writer, FLOAT, f.to_bits()),
            Value::Ref(n) => write_head(&mut self.writer, REF, *n),
            Value::Bytes(b) => {
                write_head(&mut self.writer, BYTES, b.len() as u64);
                self.writer.buf(b);
            }
            Value::Str(s) => {
                write_head(&mut self.writer, STRING, s.len() as u64);
                self.writer.utf8(s);
            }
            Value::List(items) | Value::Array(items) => {
                let body = self.take_size();
                write_head(&mut self.writer, TUPLE, body as u64);
                for item in items {
                    self.write_any(item)?;
                }
            }
            Value::Map(pairs) | Value::Trie(pairs) => {
                let body = self.take_size();
                write_head(&mut self.writer, MAP, body as u64);
                for (key, val) in pairs {
                    self.write_any(key)?;
                    self.write_any(val)?;
                }
            }
            Value::Scope(..) => return Err(EncodeError::Unsupported("scope")),
        }
        Ok(())
    }

    fn take_size(&mut self) -> usize {
        let size = self.sizes[self.size_x];
        self.size_x += 1;
        size
    }
}

fn narrow(n: i128) -> Result<i64, EncodeError> {
    i64::try_from(n).map_err(|_| EncodeError::IntegerOverflow(n))
}
