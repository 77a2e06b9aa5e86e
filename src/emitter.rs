//! The streaming emitter.
//!
//! [`Emitter`] is the public driver: it owns a [`Generator`] and a reusable
//! output buffer, feeds structural calls to the generator, accumulates the
//! returned fragments, and flushes to the sink once the buffer reaches a
//! block threshold or the stream is closed. The sink is any
//! [`std::io::Write`]; the emitter never closes it.
//!
//! Single-threaded and synchronous by design: there is no internal locking,
//! and sharing one emitter across threads is not supported. To abandon a
//! document mid-stream, stop calling and drop the emitter; bytes already
//! flushed are permanent.
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{Emitter, JsonGenerator, JsonOptions};
//!
//! let mut out = Vec::new();
//! let mut e = Emitter::new(&mut out, JsonGenerator::new(JsonOptions::new()));
//!
//! e.start_object().unwrap();
//! e.emit_key("greeting").unwrap();
//! e.emit_string("hello").unwrap();
//! e.end_object().unwrap();
//! e.close().unwrap();
//!
//! assert_eq!(out, br#"{"greeting":"hello"}"#);
//! ```

use std::io::Write;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::generator::Generator;
use crate::value::Value;

/// Buffer length at which pending output is flushed to the sink.
pub const BLOCK_SIZE: usize = 4096;

/// Initial buffer capacity; short documents never reallocate.
const BUFFER_CAPACITY: usize = 2 * BLOCK_SIZE;

/// A scalar the emitter can write, as a closed sum.
///
/// This replaces dynamic "emit anything" dispatch: the supported kinds are
/// fixed at compile time, and the explicit [`Unsupported`] variant is the
/// designated escape hatch for callers bridging from foreign type systems —
/// emitting it reports [`Error::Unsupported`] instead of panicking.
/// Reflection-style tree walking of arbitrary user types is out of scope.
///
/// [`Unsupported`]: Scalar::Unsupported
///
/// # Examples
///
/// ```rust
/// use jsonemit::{Emitter, JsonGenerator, JsonOptions, Scalar};
///
/// let mut out = Vec::new();
/// let mut e = Emitter::new(&mut out, JsonGenerator::new(JsonOptions::new()));
///
/// e.start_array().unwrap();
/// e.emit(42i64).unwrap();
/// e.emit("abc").unwrap();
/// e.emit(Scalar::Byte(b'x')).unwrap();
/// e.end_array().unwrap();
/// e.close().unwrap();
///
/// assert_eq!(out, br#"[42,"abc","x"]"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Scalar<'a> {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// An arbitrary-precision integer.
    BigInt(&'a BigInt),
    /// A float; NaN and infinities are routed to their placeholders.
    Float(f64),
    /// An arbitrary-precision decimal.
    BigFloat(&'a BigDecimal),
    /// A string.
    Str(&'a str),
    /// A byte string, emitted base64-quoted.
    Bytes(&'a [u8]),
    /// A single byte, emitted as a one-character string.
    Byte(u8),
    /// A single character, emitted as a one-character string.
    Rune(char),
    /// A value kind the emitter does not support; carries the kind name for
    /// the error message.
    Unsupported(&'static str),
}

impl From<()> for Scalar<'_> {
    fn from((): ()) -> Self {
        Scalar::Null
    }
}

impl From<bool> for Scalar<'_> {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i8> for Scalar<'_> {
    fn from(v: i8) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i16> for Scalar<'_> {
    fn from(v: i16) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i32> for Scalar<'_> {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i64> for Scalar<'_> {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u8> for Scalar<'_> {
    fn from(v: u8) -> Self {
        Scalar::Uint(v.into())
    }
}

impl From<u16> for Scalar<'_> {
    fn from(v: u16) -> Self {
        Scalar::Uint(v.into())
    }
}

impl From<u32> for Scalar<'_> {
    fn from(v: u32) -> Self {
        Scalar::Uint(v.into())
    }
}

impl From<u64> for Scalar<'_> {
    fn from(v: u64) -> Self {
        Scalar::Uint(v)
    }
}

impl From<f32> for Scalar<'_> {
    fn from(v: f32) -> Self {
        Scalar::Float(v.into())
    }
}

impl From<f64> for Scalar<'_> {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<char> for Scalar<'_> {
    fn from(v: char) -> Self {
        Scalar::Rune(v)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(v: &'a str) -> Self {
        Scalar::Str(v)
    }
}

impl<'a> From<&'a [u8]> for Scalar<'a> {
    fn from(v: &'a [u8]) -> Self {
        Scalar::Bytes(v)
    }
}

impl<'a> From<&'a BigInt> for Scalar<'a> {
    fn from(v: &'a BigInt) -> Self {
        Scalar::BigInt(v)
    }
}

impl<'a> From<&'a BigDecimal> for Scalar<'a> {
    fn from(v: &'a BigDecimal) -> Self {
        Scalar::BigFloat(v)
    }
}

/// The streaming emitter. See the [module docs](self) for an overview.
///
/// Error behavior: protocol violations (out-of-order calls) surface
/// immediately on the offending call and put the emitter into sticky failure
/// mode; sink write failures go sticky silently and surface on the next
/// [`flush`](Emitter::flush) or [`close`](Emitter::close). Once sticky, no
/// further bytes are buffered and the document can never be silently
/// completed.
#[derive(Debug)]
pub struct Emitter<W: Write, G: Generator> {
    sink: W,
    generator: G,
    out: Vec<u8>,
    written: u64,
    err: Option<Error>,
    closed: bool,
}

/// An [`Emitter`] driving the [`JsonGenerator`](crate::JsonGenerator).
pub type JsonEmitter<W> = Emitter<W, crate::JsonGenerator>;

impl<W: Write, G: Generator> Emitter<W, G> {
    /// Creates an emitter over `sink`, taking ownership of `generator`.
    ///
    /// The generator is reset and the document is begun implicitly; the
    /// state machine sits at the root, ready for one value.
    #[must_use]
    pub fn new(sink: W, generator: G) -> Self {
        let mut e = Emitter {
            sink,
            generator,
            out: Vec::with_capacity(BUFFER_CAPACITY),
            written: 0,
            err: None,
            closed: false,
        };
        e.generator.reset();
        let begin = e.generator.begin();
        let _ = e.apply(begin);
        e
    }

    /// Resets the emitter for a second document against the same sink,
    /// also resetting the owned generator.
    pub fn reset(&mut self) {
        self.generator.reset();
        self.out.clear();
        self.written = 0;
        self.err = None;
        self.closed = false;
        let begin = self.generator.begin();
        let _ = self.apply(begin);
    }

    /// The owned generator.
    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Bytes successfully handed to the sink so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Consumes the emitter, returning the sink. Pending unflushed bytes
    /// are discarded; call [`close`](Emitter::close) first.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Opens an object.
    pub fn start_object(&mut self) -> Result<()> {
        let fragments = self.generator.start_object();
        self.apply(fragments)
    }

    /// Closes the innermost object.
    pub fn end_object(&mut self) -> Result<()> {
        let fragments = self.generator.end_object();
        self.apply(fragments)
    }

    /// Opens an array.
    pub fn start_array(&mut self) -> Result<()> {
        let fragments = self.generator.start_array();
        self.apply(fragments)
    }

    /// Closes the innermost array.
    pub fn end_array(&mut self) -> Result<()> {
        let fragments = self.generator.end_array();
        self.apply(fragments)
    }

    /// Emits an object key.
    pub fn emit_key(&mut self, key: &str) -> Result<()> {
        let fragments = self.generator.key(key);
        self.apply(fragments)
    }

    /// Emits a whole value tree through this emitter.
    pub fn emit_value(&mut self, value: &Value) -> Result<()> {
        value.emit_to(self)
    }

    /// Emits a null value.
    pub fn emit_null(&mut self) -> Result<()> {
        let fragments = self.generator.null_value();
        self.apply(fragments)
    }

    /// Emits a boolean value.
    pub fn emit_bool(&mut self, value: bool) -> Result<()> {
        let fragments = self.generator.bool_value(value);
        self.apply(fragments)
    }

    /// Emits a signed 8-bit integer.
    pub fn emit_i8(&mut self, value: i8) -> Result<()> {
        self.emit_i64(value.into())
    }

    /// Emits a signed 16-bit integer.
    pub fn emit_i16(&mut self, value: i16) -> Result<()> {
        self.emit_i64(value.into())
    }

    /// Emits a signed 32-bit integer.
    pub fn emit_i32(&mut self, value: i32) -> Result<()> {
        self.emit_i64(value.into())
    }

    /// Emits a signed 64-bit integer.
    pub fn emit_i64(&mut self, value: i64) -> Result<()> {
        let fragments = self.generator.int_value(value);
        self.apply(fragments)
    }

    /// Emits an unsigned 8-bit integer as a number. Use
    /// [`emit_byte`](Emitter::emit_byte) for the one-character-string form.
    pub fn emit_u8(&mut self, value: u8) -> Result<()> {
        self.emit_u64(value.into())
    }

    /// Emits an unsigned 16-bit integer.
    pub fn emit_u16(&mut self, value: u16) -> Result<()> {
        self.emit_u64(value.into())
    }

    /// Emits an unsigned 32-bit integer.
    pub fn emit_u32(&mut self, value: u32) -> Result<()> {
        self.emit_u64(value.into())
    }

    /// Emits an unsigned 64-bit integer.
    pub fn emit_u64(&mut self, value: u64) -> Result<()> {
        let fragments = self.generator.uint_value(value);
        self.apply(fragments)
    }

    /// Emits an arbitrary-precision integer; `None` emits null.
    pub fn emit_big_int(&mut self, value: Option<&BigInt>) -> Result<()> {
        let fragments = self.generator.big_int_value(value);
        self.apply(fragments)
    }

    /// Emits a 32-bit float.
    pub fn emit_f32(&mut self, value: f32) -> Result<()> {
        self.emit_f64(value.into())
    }

    /// Emits a 64-bit float. NaN and infinities become their quoted
    /// placeholder literals.
    pub fn emit_f64(&mut self, value: f64) -> Result<()> {
        let fragments = if value.is_nan() {
            self.generator.nan_value()
        } else if value.is_infinite() {
            self.generator.inf_value(value < 0.0)
        } else {
            self.generator.float_value(value)
        };
        self.apply(fragments)
    }

    /// Emits an arbitrary-precision decimal; `None` emits null.
    pub fn emit_big_float(&mut self, value: Option<&BigDecimal>) -> Result<()> {
        let fragments = self.generator.big_float_value(value);
        self.apply(fragments)
    }

    /// Emits a string value.
    pub fn emit_string(&mut self, value: &str) -> Result<()> {
        let fragments = self.generator.string_value(value);
        self.apply(fragments)
    }

    /// Emits a byte string.
    pub fn emit_bytes(&mut self, value: &[u8]) -> Result<()> {
        let fragments = self.generator.bytes_value(value);
        self.apply(fragments)
    }

    /// Emits a single byte as a one-character string.
    pub fn emit_byte(&mut self, value: u8) -> Result<()> {
        let fragments = self.generator.byte_value(value);
        self.apply(fragments)
    }

    /// Emits a single character as a one-character string.
    pub fn emit_char(&mut self, value: char) -> Result<()> {
        let fragments = self.generator.rune_value(value);
        self.apply(fragments)
    }

    /// Emits any supported scalar, dispatching on its kind.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for [`Scalar::Unsupported`]; the emitter state
    /// is untouched and a typed method may be used instead.
    pub fn emit<'a>(&mut self, value: impl Into<Scalar<'a>>) -> Result<()> {
        match value.into() {
            Scalar::Null => self.emit_null(),
            Scalar::Bool(v) => self.emit_bool(v),
            Scalar::Int(v) => self.emit_i64(v),
            Scalar::Uint(v) => self.emit_u64(v),
            Scalar::BigInt(v) => self.emit_big_int(Some(v)),
            Scalar::Float(v) => self.emit_f64(v),
            Scalar::BigFloat(v) => self.emit_big_float(Some(v)),
            Scalar::Str(v) => self.emit_string(v),
            Scalar::Bytes(v) => self.emit_bytes(v),
            Scalar::Byte(v) => self.emit_byte(v),
            Scalar::Rune(v) => self.emit_char(v),
            Scalar::Unsupported(kind) => Err(Error::unsupported(kind)),
        }
    }

    /// Forces a sink write of any pending bytes, then reports the sticky
    /// error if one is recorded. A no-op when the buffer is empty.
    pub fn flush(&mut self) -> Result<()> {
        if self.err.is_none() && !self.out.is_empty() {
            self.flush_buffer();
        }
        self.sticky()
    }

    /// Finishes the document: emits the generator's trailer, verifies the
    /// state machine reached its terminal state, flushes, and returns the
    /// first error encountered, if any. Subsequent calls keep returning that
    /// same error.
    pub fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            let fragments = self.generator.end();
            self.apply(fragments)?;
            if self.err.is_none() && !self.out.is_empty() {
                self.flush_buffer();
            }
        }
        self.sticky()
    }

    fn sticky(&self) -> Result<()> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Appends one call's fragments to the buffer, flushing at the block
    /// threshold. Protocol violations surface immediately and stick; sink
    /// failures stick silently.
    fn apply(&mut self, fragments: Result<Vec<Fragment>>) -> Result<()> {
        if self.err.is_some() {
            return Ok(());
        }

        let fragments = match fragments {
            Ok(fragments) => fragments,
            Err(err) => {
                self.err = Some(err.clone());
                return Err(err);
            }
        };

        for fragment in &fragments {
            fragment.append_to(&mut self.out);
        }

        if self.out.len() >= BLOCK_SIZE {
            self.flush_buffer();
        }
        Ok(())
    }

    fn flush_buffer(&mut self) {
        let len = self.out.len() as u64;
        match self.sink.write_all(&self.out) {
            Ok(()) => self.written += len,
            Err(err) => self.err = Some(Error::io(&err)),
        }
        self.out.clear();
    }
}
