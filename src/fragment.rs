//! Output fragments and the builder that batches them.
//!
//! A [`Fragment`] is an immutable unit of serialized output that knows how to
//! append its bytes to a growing buffer and nothing else. Generators return
//! ordered fragment lists instead of writing to the sink directly, which lets
//! the emitter batch sink writes.
//!
//! [`FragmentBuilder`] assembles those lists. Adjacent raw text/byte pushes
//! are merged into a single pending run rather than growing the list, so the
//! fragment count per structural call stays close to constant no matter how
//! many small separator and punctuation pushes a generator makes.
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{Fragment, FragmentBuilder};
//!
//! let mut b = FragmentBuilder::new();
//! b.push_byte(b',');
//! b.push_str(" ");
//! b.push(Fragment::Int(-42));
//!
//! let fragments = b.build();
//! assert_eq!(fragments.len(), 2); // ", " coalesced into one run
//!
//! let mut out = Vec::new();
//! for f in &fragments {
//!     f.append_to(&mut out);
//! }
//! assert_eq!(out, b", -42");
//! ```

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::format::IndentUnit;

/// One immutable unit of serialized output.
///
/// Fragments carry no behavior beyond appending their byte representation.
/// The quoted variants apply the JSON escaping rules described on
/// [`append_to`](Fragment::append_to).
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A literal string run, emitted verbatim.
    Text(String),
    /// A literal byte run, emitted verbatim.
    Bytes(Vec<u8>),
    /// A signed integer in plain decimal ASCII.
    Int(i64),
    /// An unsigned integer in plain decimal ASCII.
    Uint(u64),
    /// An arbitrary-precision integer in plain decimal ASCII.
    BigInt(BigInt),
    /// An IEEE float in shortest round-trip decimal.
    Float(f64),
    /// An arbitrary-precision decimal in plain notation.
    BigFloat(BigDecimal),
    /// A string value, double-quoted and escaped.
    QuotedString {
        /// The unescaped text.
        value: String,
        /// Whether `&`, `<`, `>` are also escaped as `\u00XX`.
        escape_html: bool,
    },
    /// A byte string, emitted as a double-quoted standard base64 encoding.
    ///
    /// Base64 output cannot contain `&`, `<`, or `>`, so the HTML-escaping
    /// flag does not apply here.
    QuotedBase64(Vec<u8>),
}

impl Fragment {
    /// Appends this fragment's serialized bytes to `out`.
    ///
    /// String escaping: backslash and double quote are backslash-escaped, the
    /// short escapes `\b \f \n \r \t` are used where defined, every other C0
    /// control code plus DEL (U+007F) and the C1 controls (U+0080–U+009F)
    /// become `\u00XX`, and `&`, `<`, `>` become `\u00XX` when HTML escaping
    /// is on. Surrogate code points cannot occur in a Rust `str`, so the
    /// output is always well-formed.
    pub fn append_to(&self, out: &mut Vec<u8>) {
        match self {
            Fragment::Text(s) => out.extend_from_slice(s.as_bytes()),
            Fragment::Bytes(b) => out.extend_from_slice(b),
            Fragment::Int(v) => {
                let mut buf = itoa::Buffer::new();
                out.extend_from_slice(buf.format(*v).as_bytes());
            }
            Fragment::Uint(v) => {
                let mut buf = itoa::Buffer::new();
                out.extend_from_slice(buf.format(*v).as_bytes());
            }
            Fragment::BigInt(v) => out.extend_from_slice(v.to_str_radix(10).as_bytes()),
            Fragment::Float(v) => {
                let mut buf = ryu::Buffer::new();
                out.extend_from_slice(buf.format(*v).as_bytes());
            }
            Fragment::BigFloat(v) => out.extend_from_slice(v.to_string().as_bytes()),
            Fragment::QuotedString { value, escape_html } => {
                append_quoted(out, value, *escape_html);
            }
            Fragment::QuotedBase64(value) => {
                out.push(b'"');
                out.extend_from_slice(BASE64_STANDARD.encode(value).as_bytes());
                out.push(b'"');
            }
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn append_unicode_escape(out: &mut Vec<u8>, code_point: u32) {
    out.extend_from_slice(b"\\u");
    out.push(HEX_DIGITS[(code_point >> 12 & 0xf) as usize]);
    out.push(HEX_DIGITS[(code_point >> 8 & 0xf) as usize]);
    out.push(HEX_DIGITS[(code_point >> 4 & 0xf) as usize]);
    out.push(HEX_DIGITS[(code_point & 0xf) as usize]);
}

fn append_quoted(out: &mut Vec<u8>, value: &str, escape_html: bool) {
    out.push(b'"');
    for ch in value.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{0008}' => out.extend_from_slice(b"\\b"),
            '\u{000C}' => out.extend_from_slice(b"\\f"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            '&' | '<' | '>' if escape_html => append_unicode_escape(out, ch as u32),
            ch if (ch as u32) < 0x20 || ('\u{7f}'..='\u{9f}').contains(&ch) => {
                append_unicode_escape(out, ch as u32);
            }
            ch => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}

/// Accumulates the fragments for one structural call.
///
/// Raw text, bytes, and single characters collect into one pending run;
/// pushing a typed fragment seals the run first. [`build`] returns the
/// finished ordered list.
///
/// [`build`]: FragmentBuilder::build
#[derive(Debug, Default)]
pub struct FragmentBuilder {
    list: Vec<Fragment>,
    pending: Vec<u8>,
}

impl FragmentBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn seal_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.pending);
        self.list.push(Fragment::Bytes(run));
    }

    /// Adds a fragment. Literal runs merge into the pending accumulator;
    /// typed fragments seal it and join the list as-is.
    pub fn push(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Text(s) => self.pending.extend_from_slice(s.as_bytes()),
            Fragment::Bytes(b) => self.pending.extend_from_slice(&b),
            other => {
                self.seal_pending();
                self.list.push(other);
            }
        }
    }

    /// Appends literal text to the pending run.
    pub fn push_str(&mut self, s: &str) {
        self.pending.extend_from_slice(s.as_bytes());
    }

    /// Appends one literal byte to the pending run.
    pub fn push_byte(&mut self, b: u8) {
        self.pending.push(b);
    }

    /// Appends one character, UTF-8 encoded, to the pending run.
    pub fn push_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.pending
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    /// Appends `count` levels of indentation.
    ///
    /// A `size` of zero selects the unit's default width (2 for spaces, 1
    /// for tabs).
    pub fn indent(&mut self, unit: IndentUnit, size: usize, count: usize) {
        if count == 0 {
            return;
        }
        let size = if size == 0 { unit.default_size() } else { size };
        for _ in 0..count * size {
            self.pending.push(unit.as_byte());
        }
    }

    /// Seals any pending run and returns the finished fragment list.
    #[must_use]
    pub fn build(mut self) -> Vec<Fragment> {
        self.seal_pending();
        self.list
    }
}
