//! `TibsEncoder` — Tibs text encoder (writes UTF-8 text to a Writer
//! buffer).

use std::rc::Rc;

use nibs_buffers::Writer;
use nibs_hex::to_hex;

use crate::value::Value;

/// Hook invoked for composite values before the default encoding runs.
///
/// Returning `true` means the hook wrote a rendition of the value;
/// `false` falls through to the default encoding. Recursive calls on the
/// value currently being hooked bypass the hook; other values keep going
/// through it.
pub type EncodeHook = Rc<dyn Fn(&mut TibsEncoder, &Value) -> bool>;

pub struct TibsEncoder {
    pub writer: Writer,
    hook: Option<EncodeHook>,
    /// Identities of the values currently inside a hook call.
    active: Vec<*const Value>,
}

impl Default for TibsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TibsEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            hook: None,
            active: Vec::new(),
        }
    }

    pub fn with_hook(hook: EncodeHook) -> Self {
        let mut encoder = Self::new();
        encoder.hook = Some(hook);
        encoder
    }

    pub fn set_hook(&mut self, hook: EncodeHook) {
        self.hook = Some(hook);
    }

    /// Serializes one value to Tibs text.
    pub fn encode(&mut self, value: &Value) -> String {
        self.writer.reset();
        self.write_any(value);
        let bytes = self.writer.flush();
        // The writer only ever receives UTF-8.
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.writer.ascii("null"),
            Value::Bool(true) => self.writer.ascii("true"),
            Value::Bool(false) => self.writer.ascii("false"),
            Value::Int(n) => self.writer.ascii(&n.to_string()),
            Value::BigInt(n) => self.writer.ascii(&n.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::Str(s) => self.write_str(s),
            Value::Bytes(b) => self.write_bytes(b),
            Value::Ref(n) => {
                self.writer.u8(b'&');
                self.writer.ascii(&n.to_string());
            }
            Value::List(items) => self.write_list(value, items, false),
            Value::Array(items) => self.write_list(value, items, true),
            Value::Map(pairs) => self.write_map(value, pairs, false),
            Value::Trie(pairs) => self.write_map(value, pairs, true),
            Value::Scope(child, refs) => self.write_scope(value, child, refs),
        }
    }

    /// Runs the hook for `value` unless it is already being hooked.
    fn try_hook(&mut self, value: &Value) -> bool {
        let Some(hook) = self.hook.clone() else {
            return false;
        };
        let id = value as *const Value;
        if self.active.contains(&id) {
            return false;
        }
        self.active.push(id);
        let handled = hook(self, value);
        self.active.pop();
        handled
    }

    pub fn write_float(&mut self, float: f64) {
        if float.is_nan() {
            self.writer.ascii("nan");
        } else if float == f64::INFINITY {
            self.writer.ascii("inf");
        } else if float == f64::NEG_INFINITY {
            self.writer.ascii("-inf");
        } else {
            // Debug keeps the trailing `.0` on integral floats.
            self.writer.ascii(&format!("{float:?}"));
        }
    }

    /// Writes a double-quoted string. Escapes exactly `\ " \b \f \n \r
    /// \t`; every other byte passes through verbatim.
    pub fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let len = bytes.len();

        // Fast path: nothing that needs escaping.
        let mut has_special = false;
        for &b in bytes {
            if matches!(b, b'"' | b'\\' | 0x08 | 0x0c | b'\n' | b'\r' | b'\t') {
                has_special = true;
                break;
            }
        }
        if !has_special {
            self.writer.ensure_capacity(len + 2);
            self.writer.u8(b'"');
            self.writer.buf(bytes);
            self.writer.u8(b'"');
            return;
        }

        self.writer.u8(b'"');
        for &b in bytes {
            match b {
                b'"' => self.writer.buf(b"\\\""),
                b'\\' => self.writer.buf(b"\\\\"),
                0x08 => self.writer.buf(b"\\b"),
                0x0c => self.writer.buf(b"\\f"),
                b'\n' => self.writer.buf(b"\\n"),
                b'\r' => self.writer.buf(b"\\r"),
                b'\t' => self.writer.buf(b"\\t"),
                _ => self.writer.u8(b),
            }
        }
        self.writer.u8(b'"');
    }

    pub fn write_bytes(&mut self, buf: &[u8]) {
        self.writer.u8(b'<');
        self.writer.ascii(&to_hex(buf));
        self.writer.u8(b'>');
    }

    fn write_list(&mut self, whole: &Value, items: &[Value], indexed: bool) {
        if self.try_hook(whole) {
            return;
        }
        self.writer.u8(b'[');
        if indexed {
            self.writer.u8(b'#');
        }
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            self.write_any(item);
            if i < last {
                self.writer.u8(b',');
            }
        }
        self.writer.u8(b']');
    }

    fn write_map(&mut self, whole: &Value, pairs: &[(Value, Value)], indexed: bool) {
        if self.try_hook(whole) {
            return;
        }
        self.writer.u8(b'{');
        if indexed {
            self.writer.u8(b'#');
        }
        let last = pairs.len().saturating_sub(1);
        for (i, (key, val)) in pairs.iter().enumerate() {
            self.write_any(key);
            self.writer.u8(b':');
            self.write_any(val);
            if i < last {
                self.writer.u8(b',');
            }
        }
        self.writer.u8(b'}');
    }

    fn write_scope(&mut self, whole: &Value, child: &Value, refs: &[Value]) {
        if self.try_hook(whole) {
            return;
        }
        self.writer.u8(b'(');
        self.write_any(child);
        for r in refs {
            self.writer.u8(b',');
            self.write_any(r);
        }
        self.writer.u8(b')');
    }
}
