//! # jsonemit
//!
//! A streaming, push-based JSON emitter: a sequence of "write this value /
//! start this container" calls becomes well-formed serialized output, with
//! grammar correctness enforced as the calls arrive and sink writes batched
//! through an internal buffer.
//!
//! ## Key Features
//!
//! - **Grammar enforcement**: a state machine rejects out-of-order calls
//!   (a key outside an object, an unmatched container end) before any bytes
//!   are produced for the offending call
//! - **Streaming**: output is flushed to the sink in blocks, so document
//!   size does not affect memory use
//! - **Three layouts**: compact, one-line, and multi-line with configurable
//!   indentation
//! - **Full scalar surface**: integers of every width, floats (with
//!   `"NaN"`/`"+Inf"`/`"-Inf"` placeholders for non-finite values),
//!   arbitrary-precision numbers, strings, base64 byte strings
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! Streaming emission against any [`std::io::Write`]:
//!
//! ```rust
//! use jsonemit::{Emitter, JsonGenerator, JsonOptions};
//!
//! let mut out = Vec::new();
//! let mut e = Emitter::new(&mut out, JsonGenerator::new(JsonOptions::new()));
//!
//! e.start_object().unwrap();
//! e.emit_key("id").unwrap();
//! e.emit_u32(123).unwrap();
//! e.emit_key("name").unwrap();
//! e.emit_string("Alice").unwrap();
//! e.end_object().unwrap();
//! e.close().unwrap();
//!
//! assert_eq!(out, br#"{"id":123,"name":"Alice"}"#);
//! ```
//!
//! Or build a [`Value`] tree and let it emit itself:
//!
//! ```rust
//! use jsonemit::{to_string_pretty, tree};
//!
//! let data = tree!(["a", "b", "c"]);
//! assert_eq!(to_string_pretty(&data).unwrap(), "[\n  \"a\",\n  \"b\",\n  \"c\"\n]\n");
//! ```
//!
//! ## Error Model
//!
//! Protocol violations (calls in an order the JSON grammar forbids) are
//! caller bugs: they fail the offending call immediately and permanently.
//! Sink write failures are remembered as a sticky error and reported at the
//! next [`Emitter::flush`] or [`Emitter::close`], so a document is never
//! silently completed after a partial write. See [`error`] for details.
//!
//! ## Concurrency
//!
//! One emitter/generator pair serves one document stream; nothing is
//! synchronized internally. Use one emitter per thread.

pub mod emitter;
pub mod error;
pub mod format;
pub mod fragment;
pub mod generator;
pub mod macros;
pub mod map;
pub mod state;
pub mod value;

pub use emitter::{Emitter, JsonEmitter, Scalar, BLOCK_SIZE};
pub use error::{Error, Result};
pub use format::{IndentUnit, JsonOptions, Layout};
pub use fragment::{Fragment, FragmentBuilder};
pub use generator::{Generator, JsonGenerator};
pub use map::Map;
pub use state::{State, StateMachine};
pub use value::Value;

use std::io;

/// Serializes a value tree to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{to_string, tree};
///
/// let data = tree!({"a": 1, "b": 2});
/// assert_eq!(to_string(&data).unwrap(), r#"{"a":1,"b":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error only if emission fails, which an in-memory sink never
/// does for a well-formed tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, JsonOptions::new())
}

/// Serializes a value tree to multi-line JSON with 2-space indentation and
/// a trailing newline.
///
/// # Errors
///
/// Returns an error only if emission fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Value) -> Result<String> {
    to_string_with_options(value, JsonOptions::pretty())
}

/// Serializes a value tree to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{to_string_with_options, tree, JsonOptions, Layout};
///
/// let data = tree!([1, 2]);
/// let options = JsonOptions::new().with_layout(Layout::OneLine);
/// assert_eq!(to_string_with_options(&data, options).unwrap(), "[1, 2]\n");
/// ```
///
/// # Errors
///
/// Returns an error only if emission fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: JsonOptions) -> Result<String> {
    let out = to_vec_with_options(value, options)?;
    // The generator only ever produces UTF-8.
    String::from_utf8(out).map_err(Error::custom)
}

/// Serializes a value tree to a compact JSON byte vector.
///
/// # Errors
///
/// Returns an error only if emission fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_vec_with_options(value, JsonOptions::new())
}

/// Serializes a value tree to a JSON byte vector with custom options.
///
/// # Errors
///
/// Returns an error only if emission fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(value: &Value, options: JsonOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(options));
    value.emit_to(&mut e)?;
    e.close()?;
    drop(e);
    Ok(out)
}

/// Serializes a value tree as compact JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{to_writer, tree};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &tree!([1, 2, 3])).unwrap();
/// assert_eq!(buffer, b"[1,2,3]");
/// ```
///
/// # Errors
///
/// Returns an error if emission or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> Result<()> {
    to_writer_with_options(writer, value, JsonOptions::new())
}

/// Serializes a value tree into a writer with custom options.
///
/// # Errors
///
/// Returns an error if emission or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W: io::Write>(
    writer: W,
    value: &Value,
    options: JsonOptions,
) -> Result<()> {
    let mut e = Emitter::new(writer, JsonGenerator::new(options));
    value.emit_to(&mut e)?;
    e.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_scalars() {
        assert_eq!(to_string(&Value::Null).unwrap(), "null");
        assert_eq!(to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(to_string(&Value::Int(-42)).unwrap(), "-42");
        assert_eq!(to_string(&Value::from("abc")).unwrap(), "\"abc\"");
        assert_eq!(to_string(&Value::Bytes(b"abc".to_vec())).unwrap(), "\"YWJj\"");
    }

    #[test]
    fn compact_containers() {
        let arr = tree!(['a', 'b', 'c']);
        assert_eq!(to_string(&arr).unwrap(), r#"["a","b","c"]"#);

        let obj = tree!({"a": 1, "b": 2, "c": 3});
        assert_eq!(to_string(&obj).unwrap(), r#"{"a":1,"b":2,"c":3}"#);
    }

    #[test]
    fn pretty_array() {
        let arr = tree!(["a", "b", "c"]);
        assert_eq!(
            to_string_pretty(&arr).unwrap(),
            "[\n  \"a\",\n  \"b\",\n  \"c\"\n]\n"
        );
    }

    #[test]
    fn writer_and_vec_agree() {
        let data = tree!({"k": [true, null]});
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &data).unwrap();
        assert_eq!(buffer, to_vec(&data).unwrap());
    }
}
