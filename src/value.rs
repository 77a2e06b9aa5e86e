//! Recursive value tree.
//!
//! [`Value`] is a tagged representation of any document the emitter can
//! produce. It is a convenience layer, not part of the streaming core: a
//! tree self-serializes by issuing one matched sequence of structural and
//! scalar calls against a live [`Emitter`](crate::Emitter), which is the
//! only entry point data-model code has into the core.
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{to_string, tree, Value};
//!
//! let data = tree!({
//!     "name": "Alice",
//!     "tags": ["rust", "json"]
//! });
//!
//! assert_eq!(
//!     to_string(&data).unwrap(),
//!     r#"{"name":"Alice","tags":["rust","json"]}"#
//! );
//!
//! if let Value::Object(obj) = &data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```

use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::emitter::Emitter;
use crate::error::Result;
use crate::generator::Generator;
use crate::map::Map;

/// A dynamically-typed value that can emit itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// An arbitrary-precision integer.
    BigInt(BigInt),
    /// A float.
    Float(f64),
    /// An arbitrary-precision decimal.
    BigFloat(BigDecimal),
    /// A string.
    String(String),
    /// A byte string, emitted base64-quoted.
    Bytes(Vec<u8>),
    /// A single character, emitted as a one-character string.
    Rune(char),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An insertion-ordered set of named fields.
    Object(Map),
}

impl Value {
    /// Emits this tree through `e` as one matched call sequence.
    ///
    /// # Errors
    ///
    /// Propagates the first emitter error; for a fresh emitter and a single
    /// tree the sequence is always well-formed, so only sink errors
    /// surface in practice.
    pub fn emit_to<W: Write, G: Generator>(&self, e: &mut Emitter<W, G>) -> Result<()> {
        match self {
            Value::Null => e.emit_null(),
            Value::Bool(v) => e.emit_bool(*v),
            Value::Int(v) => e.emit_i64(*v),
            Value::Uint(v) => e.emit_u64(*v),
            Value::BigInt(v) => e.emit_big_int(Some(v)),
            Value::Float(v) => e.emit_f64(*v),
            Value::BigFloat(v) => e.emit_big_float(Some(v)),
            Value::String(v) => e.emit_string(v),
            Value::Bytes(v) => e.emit_bytes(v),
            Value::Rune(v) => e.emit_char(*v),
            Value::Array(items) => {
                e.start_array()?;
                for item in items {
                    item.emit_to(e)?;
                }
                e.end_array()
            }
            Value::Object(fields) => {
                e.start_object()?;
                for (key, value) in fields {
                    e.emit_key(key)?;
                    value.emit_to(e)?;
                }
                e.end_object()
            }
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for any numeric variant.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Uint(_) | Value::BigInt(_) | Value::Float(_) | Value::BigFloat(_)
        )
    }

    /// Returns `true` for [`Value::String`].
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` for [`Value::Object`].
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for [`Value::Array`].
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as an `i64` where the conversion is lossless.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Uint(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The value as a `u64` where the conversion is lossless.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The float, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// The element list, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The field map, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }
}

/// Mirrors the emitted JSON where serde can express it: bytes become base64
/// strings, runes become one-character strings, non-finite floats become the
/// `"NaN"`/`"+Inf"`/`"-Inf"` literals. Big numbers serialize as decimal
/// strings because serde has no arbitrary-precision number type; the
/// emitter itself writes them as bare numbers.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::BigInt(v) => serializer.collect_str(v),
            Value::Float(v) => {
                if v.is_nan() {
                    serializer.serialize_str("NaN")
                } else if v.is_infinite() {
                    serializer.serialize_str(if *v < 0.0 { "-Inf" } else { "+Inf" })
                } else {
                    serializer.serialize_f64(*v)
                }
            }
            Value::BigFloat(v) => serializer.collect_str(v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_str(&BASE64_STANDARD.encode(v)),
            Value::Rune(v) => serializer.serialize_char(*v),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Uint(v.into())
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Uint(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Rune(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigFloat(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Object(v)
    }
}
