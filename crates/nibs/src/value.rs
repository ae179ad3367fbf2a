//! [`Value`] — the universal value type shared by the Nibs and Tibs codecs.

use std::fmt;

/// Universal value type that spans the Nibs binary format and the Tibs
/// text format.
///
/// Containers come in two flavors: plain (`List`, `Map`) and indexed
/// (`Array`, `Trie`). The indexed flavor carries the `#` marker in Tibs
/// text; on the Nibs wire both flavors currently encode identically.
///
/// Maps preserve insertion order and key duplicates resolve last-write-wins
/// at parse time. Keys may be any variant.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence marker.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer in the fast 64-bit range.
    Int(i64),
    /// Integer literal that overflows i64 (two's complement, wide).
    BigInt(i128),
    /// IEEE-754 64-bit float. NaN and the infinities are representable.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Opaque byte string.
    Bytes(Vec<u8>),
    /// Dense ordered sequence.
    List(Vec<Value>),
    /// Same payload as `List`, marked for indexed encoding.
    Array(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Same payload as `Map`, marked for indexed encoding.
    Trie(Vec<(Value, Value)>),
    /// Index into an ambient reference table.
    Ref(u64),
    /// A value paired with the local reference table it resolves against.
    Scope(Box<Value>, Vec<Value>),
}

/// Equality compares numeric value across the `Int`/`BigInt` split; all
/// other variants compare structurally. NaN is unequal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (BigInt(a), BigInt(b)) => a == b,
            (Int(a), BigInt(b)) | (BigInt(b), Int(a)) => i128::from(*a) == *b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (List(a), List(b)) | (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) | (Trie(a), Trie(b)) => a == b,
            (Ref(a), Ref(b)) => a == b,
            (Scope(a, ar), Scope(b, br)) => a == b && ar == br,
            _ => false,
        }
    }
}

impl Value {
    /// Indicates whether a value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the indexed container flavors (`Array`, `Trie`).
    pub fn is_indexed(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Trie(_))
    }

    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload if it fits i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::BigInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the byte-string payload, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the element vector of either list flavor.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the pair vector of either map flavor.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) | Value::Trie(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Resolves `Ref` nodes against a reference table.
    ///
    /// `Scope` nodes resolve their child against their own table (itself
    /// resolved against the ambient one first) and disappear from the
    /// result. Out-of-range indexes stay as `Ref` nodes.
    pub fn resolve_refs(&self, refs: &[Value]) -> Value {
        match self {
            Value::Ref(n) => match usize::try_from(*n).ok().and_then(|i| refs.get(i)) {
                Some(v) => v.clone(),
                None => Value::Ref(*n),
            },
            Value::Scope(child, table) => {
                let table: Vec<Value> = table.iter().map(|v| v.resolve_refs(refs)).collect();
                child.resolve_refs(&table)
            }
            Value::List(items) => {
                Value::List(items.iter().map(|v| v.resolve_refs(refs)).collect())
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| v.resolve_refs(refs)).collect())
            }
            Value::Map(pairs) => Value::Map(resolve_pairs(pairs, refs)),
            Value::Trie(pairs) => Value::Trie(resolve_pairs(pairs, refs)),
            other => other.clone(),
        }
    }

    /// Converts to a `serde_json::Value` where a faithful mapping exists.
    ///
    /// Returns `None` for byte strings, refs, scopes, non-finite floats,
    /// and integers beyond the JSON number range.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Int(n) => Some(serde_json::Value::from(*n)),
            Value::BigInt(n) => i64::try_from(*n)
                .map(serde_json::Value::from)
                .ok()
                .or_else(|| u64::try_from(*n).ok().map(serde_json::Value::from)),
            Value::Float(f) => serde_json::Number::from_f64(*f).map(serde_json::Value::Number),
            Value::Str(s) => Some(serde_json::Value::String(s.clone())),
            Value::List(items) | Value::Array(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Map(pairs) | Value::Trie(pairs) => {
                let mut obj = serde_json::Map::with_capacity(pairs.len());
                for (k, v) in pairs {
                    obj.insert(k.as_str()?.to_owned(), v.to_json()?);
                }
                Some(serde_json::Value::Object(obj))
            }
            Value::Bytes(_) | Value::Ref(_) | Value::Scope(..) => None,
        }
    }
}

fn resolve_pairs(pairs: &[(Value, Value)], refs: &[Value]) -> Vec<(Value, Value)> {
    pairs
        .iter()
        .map(|(k, v)| (k.resolve_refs(refs), v.resolve_refs(refs)))
        .collect()
}

impl fmt::Display for Value {
    /// Formats as Tibs text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::tibs::encode(self))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(i128::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::List(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Value { Value::Int(n as i64) }
        }
    )*};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Value {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(i128::from(n)),
        }
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Value {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(n),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Value {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Value {
        Value::Map(pairs)
    }
}
