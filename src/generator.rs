//! The generator protocol and its JSON implementation.
//!
//! A [`Generator`] translates structural calls (begin/end, container
//! start/end, key, one method per scalar kind) into ordered [`Fragment`]
//! lists. Each call asserts and advances the state machine, decides whether a
//! separator or indentation must precede the content, and returns exactly
//! this call's contribution. Generators never buffer previous calls' output.
//!
//! [`JsonGenerator`] is the reference implementation, parameterized by
//! [`JsonOptions`]. One generator instance is owned by exactly one
//! [`Emitter`](crate::Emitter) at a time; generators are not safe to share
//! across concurrent emission streams.

use bigdecimal::BigDecimal;
use log::trace;
use num_bigint::BigInt;

use crate::error::Result;
use crate::format::JsonOptions;
use crate::fragment::{Fragment, FragmentBuilder};
use crate::state::{State, StateMachine};

/// Format-specific translator from structural calls to output fragments.
///
/// Lifecycle: [`reset`](Generator::reset), then a stream of structural and
/// scalar calls, then [`end`](Generator::end). Every method either returns
/// the fragments for this call or a protocol violation if the call is
/// illegal in the current state; on error no fragments are produced.
pub trait Generator {
    /// Returns the generator to its initial state for a new document.
    fn reset(&mut self);

    /// Seeds the document. Emits nothing for JSON.
    fn begin(&mut self) -> Result<Vec<Fragment>>;

    /// Finishes the document, producing any trailer (e.g. a trailing
    /// newline) and moving to the terminal state.
    fn end(&mut self) -> Result<Vec<Fragment>>;

    /// Opens an object.
    fn start_object(&mut self) -> Result<Vec<Fragment>>;
    /// Closes the innermost object.
    fn end_object(&mut self) -> Result<Vec<Fragment>>;

    /// Opens an array.
    fn start_array(&mut self) -> Result<Vec<Fragment>>;
    /// Closes the innermost array.
    fn end_array(&mut self) -> Result<Vec<Fragment>>;

    /// Emits an object key.
    fn key(&mut self, key: &str) -> Result<Vec<Fragment>>;

    /// Emits a null value.
    fn null_value(&mut self) -> Result<Vec<Fragment>>;
    /// Emits a boolean value.
    fn bool_value(&mut self, value: bool) -> Result<Vec<Fragment>>;

    /// Emits a signed integer value.
    fn int_value(&mut self, value: i64) -> Result<Vec<Fragment>>;
    /// Emits an unsigned integer value.
    fn uint_value(&mut self, value: u64) -> Result<Vec<Fragment>>;
    /// Emits an arbitrary-precision integer; `None` emits null.
    fn big_int_value(&mut self, value: Option<&BigInt>) -> Result<Vec<Fragment>>;

    /// Emits the NaN placeholder.
    fn nan_value(&mut self) -> Result<Vec<Fragment>>;
    /// Emits the infinity placeholder, negative when `negative` is set.
    fn inf_value(&mut self, negative: bool) -> Result<Vec<Fragment>>;
    /// Emits a finite float value.
    fn float_value(&mut self, value: f64) -> Result<Vec<Fragment>>;
    /// Emits an arbitrary-precision decimal; `None` emits null.
    fn big_float_value(&mut self, value: Option<&BigDecimal>) -> Result<Vec<Fragment>>;

    /// Emits a string value.
    fn string_value(&mut self, value: &str) -> Result<Vec<Fragment>>;
    /// Emits a byte-string value.
    fn bytes_value(&mut self, value: &[u8]) -> Result<Vec<Fragment>>;
    /// Emits a single byte as a one-character string.
    fn byte_value(&mut self, value: u8) -> Result<Vec<Fragment>>;
    /// Emits a single character as a one-character string.
    fn rune_value(&mut self, value: char) -> Result<Vec<Fragment>>;
}

/// JSON implementation of the generator protocol.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{Generator, JsonGenerator, JsonOptions};
///
/// let mut g = JsonGenerator::new(JsonOptions::new());
/// g.begin().unwrap();
/// let fragments = g.string_value("abc").unwrap();
/// assert_eq!(fragments.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct JsonGenerator {
    options: JsonOptions,
    machine: StateMachine,
}

impl JsonGenerator {
    /// Creates a generator for the given options, positioned at the start of
    /// a document.
    #[must_use]
    pub fn new(options: JsonOptions) -> Self {
        JsonGenerator {
            options,
            machine: StateMachine::new(),
        }
    }

    /// The options this generator was built with.
    #[must_use]
    pub fn options(&self) -> JsonOptions {
        self.options
    }

    fn indent(&self, b: &mut FragmentBuilder) {
        self.options.layout.indent(
            b,
            self.options.indent_unit,
            self.options.indent_size,
            self.machine.depth(),
        );
    }

    fn indent_or_space(&self, b: &mut FragmentBuilder) {
        self.options.layout.indent_or_space(
            b,
            self.options.indent_unit,
            self.options.indent_size,
            self.machine.depth(),
        );
    }

    /// Shared value path: separator/indent placement, the fragment itself,
    /// then the state advance.
    fn value(&mut self, fragment: Fragment) -> Result<Vec<Fragment>> {
        trace!("value: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_value()?;

        let mut b = FragmentBuilder::new();
        if self.machine.state() == State::ArrayFirstValue {
            self.indent(&mut b);
        }
        if self.machine.state() == State::ArrayNextValue {
            b.push_byte(b',');
            self.indent_or_space(&mut b);
        }
        b.push(fragment);
        self.machine.next()?;
        Ok(b.build())
    }

    fn literal(&mut self, text: &'static str) -> Result<Vec<Fragment>> {
        self.value(Fragment::Text(text.to_string()))
    }
}

impl Generator for JsonGenerator {
    fn reset(&mut self) {
        self.machine.reset();
    }

    fn begin(&mut self) -> Result<Vec<Fragment>> {
        self.machine.expect_root()?;
        Ok(Vec::new())
    }

    fn end(&mut self) -> Result<Vec<Fragment>> {
        trace!("end: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_end()?;

        let mut b = FragmentBuilder::new();
        self.options.layout.line_feed(&mut b);
        Ok(b.build())
    }

    fn start_object(&mut self) -> Result<Vec<Fragment>> {
        trace!("start_object: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_value()?;

        let mut b = FragmentBuilder::new();
        if self.machine.state() == State::ArrayFirstValue {
            self.indent(&mut b);
        }
        if self.machine.state() == State::ArrayNextValue {
            b.push_byte(b',');
            self.indent_or_space(&mut b);
        }
        self.machine.push(State::ObjectFirstKey);
        b.push_byte(b'{');
        Ok(b.build())
    }

    fn end_object(&mut self) -> Result<Vec<Fragment>> {
        trace!("end_object: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_key()?;
        let need_indent = self.machine.state() == State::ObjectNextKey;
        self.machine.pop()?;

        let mut b = FragmentBuilder::new();
        if need_indent {
            self.indent(&mut b);
        }
        b.push_byte(b'}');
        self.machine.next()?;
        Ok(b.build())
    }

    fn start_array(&mut self) -> Result<Vec<Fragment>> {
        trace!("start_array: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_value()?;

        let mut b = FragmentBuilder::new();
        if self.machine.state() == State::ArrayFirstValue {
            self.indent(&mut b);
        }
        if self.machine.state() == State::ArrayNextValue {
            b.push_byte(b',');
            self.indent_or_space(&mut b);
        }
        self.machine.push(State::ArrayFirstValue);
        b.push_byte(b'[');
        Ok(b.build())
    }

    fn end_array(&mut self) -> Result<Vec<Fragment>> {
        trace!("end_array: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_array()?;
        let need_indent = self.machine.state() == State::ArrayNextValue;
        self.machine.pop()?;

        let mut b = FragmentBuilder::new();
        if need_indent {
            self.indent(&mut b);
        }
        b.push_byte(b']');
        self.machine.next()?;
        Ok(b.build())
    }

    fn key(&mut self, key: &str) -> Result<Vec<Fragment>> {
        trace!("key: state={} depth={}", self.machine.state(), self.machine.depth());
        self.machine.expect_key()?;

        let mut b = FragmentBuilder::new();
        if self.machine.state() == State::ObjectFirstKey {
            self.indent(&mut b);
        }
        if self.machine.state() == State::ObjectNextKey {
            b.push_byte(b',');
            self.indent_or_space(&mut b);
        }
        b.push(Fragment::QuotedString {
            value: key.to_string(),
            escape_html: self.options.escape_html,
        });
        b.push_byte(b':');
        self.options.layout.space(&mut b);
        self.machine.next()?;
        Ok(b.build())
    }

    fn null_value(&mut self) -> Result<Vec<Fragment>> {
        self.literal("null")
    }

    fn bool_value(&mut self, value: bool) -> Result<Vec<Fragment>> {
        if value {
            self.literal("true")
        } else {
            self.literal("false")
        }
    }

    fn int_value(&mut self, value: i64) -> Result<Vec<Fragment>> {
        self.value(Fragment::Int(value))
    }

    fn uint_value(&mut self, value: u64) -> Result<Vec<Fragment>> {
        self.value(Fragment::Uint(value))
    }

    fn big_int_value(&mut self, value: Option<&BigInt>) -> Result<Vec<Fragment>> {
        match value {
            Some(v) => self.value(Fragment::BigInt(v.clone())),
            None => self.null_value(),
        }
    }

    fn nan_value(&mut self) -> Result<Vec<Fragment>> {
        self.literal("\"NaN\"")
    }

    fn inf_value(&mut self, negative: bool) -> Result<Vec<Fragment>> {
        if negative {
            self.literal("\"-Inf\"")
        } else {
            self.literal("\"+Inf\"")
        }
    }

    fn float_value(&mut self, value: f64) -> Result<Vec<Fragment>> {
        self.value(Fragment::Float(value))
    }

    fn big_float_value(&mut self, value: Option<&BigDecimal>) -> Result<Vec<Fragment>> {
        match value {
            Some(v) => self.value(Fragment::BigFloat(v.clone())),
            None => self.null_value(),
        }
    }

    fn string_value(&mut self, value: &str) -> Result<Vec<Fragment>> {
        self.value(Fragment::QuotedString {
            value: value.to_string(),
            escape_html: self.options.escape_html,
        })
    }

    fn bytes_value(&mut self, value: &[u8]) -> Result<Vec<Fragment>> {
        self.value(Fragment::QuotedBase64(value.to_vec()))
    }

    fn byte_value(&mut self, value: u8) -> Result<Vec<Fragment>> {
        self.rune_value(char::from(value))
    }

    fn rune_value(&mut self, value: char) -> Result<Vec<Fragment>> {
        let mut buf = [0u8; 4];
        let s = value.encode_utf8(&mut buf);
        self.string_value(s)
    }
}
