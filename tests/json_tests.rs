use std::io;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use jsonemit::{
    to_string, to_string_with_options, to_vec_with_options, tree, Emitter, Error, JsonGenerator,
    JsonOptions, IndentUnit, Layout, Scalar, Value, BLOCK_SIZE,
};

fn array_value() -> Value {
    tree!(['a', 'b', 'c'])
}

fn object_value() -> Value {
    tree!({"a": 1, "b": 2, "c": 3})
}

fn fancy_value() -> Value {
    tree!({
        "@type": "Foo",
        "emptyList": [],
        "emptyObject": {},
        "array": ['a', 'b', 'c'],
        "object": {"a": 1, "b": 2, "c": 3}
    })
}

fn compact() -> JsonOptions {
    JsonOptions::new()
}

fn one_line() -> JsonOptions {
    JsonOptions::new().with_layout(Layout::OneLine)
}

fn multi_line() -> JsonOptions {
    JsonOptions::new().with_layout(Layout::MultiLine)
}

#[test]
fn layout_table() {
    struct Case {
        name: &'static str,
        input: Value,
        options: JsonOptions,
        expect: &'static str,
    }

    let cases = [
        Case {
            name: "compact/null",
            input: Value::Null,
            options: compact(),
            expect: "null",
        },
        Case {
            name: "compact/false",
            input: Value::Bool(false),
            options: compact(),
            expect: "false",
        },
        Case {
            name: "compact/true",
            input: Value::Bool(true),
            options: compact(),
            expect: "true",
        },
        Case {
            name: "compact/int",
            input: Value::Int(-42),
            options: compact(),
            expect: "-42",
        },
        Case {
            name: "compact/uint",
            input: Value::Uint(42),
            options: compact(),
            expect: "42",
        },
        Case {
            name: "compact/float",
            input: Value::Float(4.2),
            options: compact(),
            expect: "4.2",
        },
        Case {
            name: "compact/string",
            input: Value::from("abc"),
            options: compact(),
            expect: "\"abc\"",
        },
        Case {
            name: "compact/bytes",
            input: Value::Bytes(b"abc".to_vec()),
            options: compact(),
            expect: "\"YWJj\"",
        },
        Case {
            name: "compact/array",
            input: array_value(),
            options: compact(),
            expect: r#"["a","b","c"]"#,
        },
        Case {
            name: "compact/object",
            input: object_value(),
            options: compact(),
            expect: r#"{"a":1,"b":2,"c":3}"#,
        },
        Case {
            name: "compact/fancy",
            input: fancy_value(),
            options: compact(),
            expect: r#"{"@type":"Foo","emptyList":[],"emptyObject":{},"array":["a","b","c"],"object":{"a":1,"b":2,"c":3}}"#,
        },
        Case {
            name: "oneLine/null",
            input: Value::Null,
            options: one_line(),
            expect: "null\n",
        },
        Case {
            name: "oneLine/int",
            input: Value::Int(-42),
            options: one_line(),
            expect: "-42\n",
        },
        Case {
            name: "oneLine/array",
            input: array_value(),
            options: one_line(),
            expect: "[\"a\", \"b\", \"c\"]\n",
        },
        Case {
            name: "oneLine/object",
            input: object_value(),
            options: one_line(),
            expect: "{\"a\": 1, \"b\": 2, \"c\": 3}\n",
        },
        Case {
            name: "oneLine/fancy",
            input: fancy_value(),
            options: one_line(),
            expect: "{\"@type\": \"Foo\", \"emptyList\": [], \"emptyObject\": {}, \"array\": [\"a\", \"b\", \"c\"], \"object\": {\"a\": 1, \"b\": 2, \"c\": 3}}\n",
        },
        Case {
            name: "multiLine/null",
            input: Value::Null,
            options: multi_line(),
            expect: "null\n",
        },
        Case {
            name: "multiLine/string",
            input: Value::from("abc"),
            options: multi_line(),
            expect: "\"abc\"\n",
        },
        Case {
            name: "multiLine/emptyArray",
            input: tree!([]),
            options: multi_line(),
            expect: "[]\n",
        },
        Case {
            name: "multiLine/emptyObject",
            input: tree!({}),
            options: multi_line(),
            expect: "{}\n",
        },
        Case {
            name: "multiLine/array",
            input: array_value(),
            options: multi_line(),
            expect: "[\n  \"a\",\n  \"b\",\n  \"c\"\n]\n",
        },
        Case {
            name: "multiLine/object",
            input: object_value(),
            options: multi_line(),
            expect: "{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": 3\n}\n",
        },
        Case {
            name: "multiLine/fancy",
            input: fancy_value(),
            options: multi_line(),
            expect: concat!(
                "{\n",
                "  \"@type\": \"Foo\",\n",
                "  \"emptyList\": [],\n",
                "  \"emptyObject\": {},\n",
                "  \"array\": [\n",
                "    \"a\",\n",
                "    \"b\",\n",
                "    \"c\"\n",
                "  ],\n",
                "  \"object\": {\n",
                "    \"a\": 1,\n",
                "    \"b\": 2,\n",
                "    \"c\": 3\n",
                "  }\n",
                "}\n",
            ),
        },
    ];

    for case in cases {
        let got = to_string_with_options(&case.input, case.options).unwrap();
        assert_eq!(got, case.expect, "case {}", case.name);
    }
}

#[test]
fn non_finite_floats_in_every_layout() {
    for options in [compact(), one_line(), multi_line()] {
        let trailer = if options.layout == Layout::Compact { "" } else { "\n" };
        assert_eq!(
            to_string_with_options(&Value::Float(f64::NAN), options).unwrap(),
            format!("\"NaN\"{trailer}")
        );
        assert_eq!(
            to_string_with_options(&Value::Float(f64::INFINITY), options).unwrap(),
            format!("\"+Inf\"{trailer}")
        );
        assert_eq!(
            to_string_with_options(&Value::Float(f64::NEG_INFINITY), options).unwrap(),
            format!("\"-Inf\"{trailer}")
        );
    }
}

#[test]
fn big_numbers() {
    let huge: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
    assert_eq!(
        to_string(&Value::BigInt(huge)).unwrap(),
        "340282366920938463463374607431768211456"
    );

    let precise: BigDecimal = "2.718281828459045235360287471352662497757".parse().unwrap();
    assert_eq!(
        to_string(&Value::BigFloat(precise)).unwrap(),
        "2.718281828459045235360287471352662497757"
    );
}

#[test]
fn tab_indentation() {
    let options = multi_line().with_indent_unit(IndentUnit::Tab);
    assert_eq!(
        to_string_with_options(&array_value(), options).unwrap(),
        "[\n\t\"a\",\n\t\"b\",\n\t\"c\"\n]\n"
    );
}

#[test]
fn four_space_indentation() {
    let options = multi_line().with_indent_size(4);
    assert_eq!(
        to_string_with_options(&object_value(), options).unwrap(),
        "{\n    \"a\": 1,\n    \"b\": 2,\n    \"c\": 3\n}\n"
    );
}

#[test]
fn html_escaping_applies_to_keys_and_values() {
    let options = compact().with_escape_html(true);
    let data = tree!({"<k>": "a&b"});
    assert_eq!(
        to_string_with_options(&data, options).unwrap(),
        "{\"\\u003ck\\u003e\":\"a\\u0026b\"}"
    );

    // Without the option, the characters pass through untouched.
    assert_eq!(to_string(&data).unwrap(), r#"{"<k>":"a&b"}"#);
}

#[test]
fn control_characters_are_escaped() {
    let data = Value::from("line1\nline2\x01end");
    assert_eq!(
        to_string(&data).unwrap(),
        r#""line1\nline2\u0001end""#
    );
}

#[test]
fn del_and_c1_controls_are_escaped() {
    let data = Value::from("a\u{7f}b\u{85}c");
    assert_eq!(to_string(&data).unwrap(), r#""a\u007fb\u0085c""#);
}

#[test]
fn streaming_api_matches_tree_output() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    e.start_object().unwrap();
    e.emit_key("a").unwrap();
    e.emit_i32(1).unwrap();
    e.emit_key("b").unwrap();
    e.emit_i32(2).unwrap();
    e.emit_key("c").unwrap();
    e.emit_i32(3).unwrap();
    e.end_object().unwrap();
    e.close().unwrap();
    drop(e);

    assert_eq!(out, to_string(&object_value()).unwrap().into_bytes());
}

#[test]
fn emit_byte_and_char() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    e.start_array().unwrap();
    e.emit_byte(b'a').unwrap();
    e.emit_char('b').unwrap();
    e.emit_char('é').unwrap();
    e.end_array().unwrap();
    e.close().unwrap();
    drop(e);

    assert_eq!(out, "[\"a\",\"b\",\"é\"]".as_bytes());
}

#[test]
fn scalar_dispatch() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    let big: BigInt = BigInt::from(7);
    e.start_array().unwrap();
    e.emit(()).unwrap();
    e.emit(true).unwrap();
    e.emit(-1i8).unwrap();
    e.emit(2u16).unwrap();
    e.emit(&big).unwrap();
    e.emit(1.5f64).unwrap();
    e.emit("s").unwrap();
    e.emit(b"s".as_slice()).unwrap();
    e.emit('x').unwrap();
    e.end_array().unwrap();
    e.close().unwrap();
    drop(e);

    assert_eq!(out, br#"[null,true,-1,2,7,1.5,"s","cw==","x"]"#);
}

#[test]
fn unsupported_scalar_reports_kind_and_does_not_stick() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    let err = e.emit(Scalar::Unsupported("regex")).unwrap_err();
    assert_eq!(err, Error::Unsupported("regex".to_string()));

    // The document is still at root and can continue.
    e.emit_null().unwrap();
    e.close().unwrap();
    drop(e);
    assert_eq!(out, b"null");
}

#[test]
fn null_big_numbers_emit_null() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    e.start_array().unwrap();
    e.emit_big_int(None).unwrap();
    e.emit_big_float(None).unwrap();
    e.end_array().unwrap();
    e.close().unwrap();
    drop(e);
    assert_eq!(out, b"[null,null]");
}

#[test]
fn protocol_violations_fail_fast_and_stick() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));

    let err = e.emit_key("k").unwrap_err();
    assert!(err.is_protocol());

    // Sticky: even legal calls are suppressed now, and close reports the
    // original violation.
    assert_eq!(e.close().unwrap_err(), err);
    drop(e);
    assert!(out.is_empty());
}

#[test]
fn unmatched_container_ends_are_rejected() {
    let mut e = Emitter::new(Vec::new(), JsonGenerator::new(compact()));
    assert!(e.end_object().unwrap_err().is_protocol());

    let mut e = Emitter::new(Vec::new(), JsonGenerator::new(compact()));
    e.start_object().unwrap();
    assert!(e.end_array().unwrap_err().is_protocol());

    let mut e = Emitter::new(Vec::new(), JsonGenerator::new(compact()));
    e.start_array().unwrap();
    e.end_array().unwrap();
    assert!(e.end_array().unwrap_err().is_protocol());
}

#[test]
fn close_with_open_container_is_a_protocol_error() {
    let mut e = Emitter::new(Vec::new(), JsonGenerator::new(compact()));
    e.start_object().unwrap();
    assert!(e.close().unwrap_err().is_protocol());
}

#[test]
fn two_values_at_root_are_rejected() {
    let mut e = Emitter::new(Vec::new(), JsonGenerator::new(compact()));
    e.emit_null().unwrap();
    assert!(e.emit_null().unwrap_err().is_protocol());
}

/// Counts individual sink writes and total bytes.
#[derive(Default)]
struct RecordingWriter {
    writes: Vec<usize>,
}

impl io::Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn small_documents_reach_the_sink_only_on_close() {
    let mut w = RecordingWriter::default();
    let mut e = Emitter::new(&mut w, JsonGenerator::new(compact()));
    e.start_array().unwrap();
    for i in 0..100 {
        e.emit_i32(i).unwrap();
    }
    e.end_array().unwrap();

    // Nothing flushed yet: the buffer is below the block threshold.
    drop(e);
    assert!(w.writes.is_empty());

    let mut e = Emitter::new(&mut w, JsonGenerator::new(compact()));
    e.emit_bool(true).unwrap();
    e.close().unwrap();
    assert_eq!(e.bytes_written(), 4);
    drop(e);
    assert_eq!(w.writes, vec![4]);
}

#[test]
fn large_documents_flush_at_the_block_threshold() {
    let mut w = RecordingWriter::default();
    let big = "x".repeat(BLOCK_SIZE + 1000);
    let mut e = Emitter::new(&mut w, JsonGenerator::new(compact()));
    e.emit_string(&big).unwrap();
    drop(e);

    // The oversized buffer was flushed as soon as the call completed.
    assert_eq!(w.writes.len(), 1);
    assert_eq!(w.writes[0], big.len() + 2);
}

#[test]
fn explicit_flush_drains_the_buffer() {
    let mut w = RecordingWriter::default();
    let mut e = Emitter::new(&mut w, JsonGenerator::new(compact()));
    e.start_array().unwrap();
    e.emit_i32(1).unwrap();
    e.flush().unwrap();
    assert_eq!(e.bytes_written(), 2);
    e.end_array().unwrap();
    e.close().unwrap();
    assert_eq!(e.bytes_written(), 3);
    drop(e);
    assert_eq!(w.writes, vec![2, 1]);

    // Flushing an empty buffer performs no sink call.
    let mut w = RecordingWriter::default();
    let mut e = Emitter::new(&mut w, JsonGenerator::new(compact()));
    e.flush().unwrap();
    drop(e);
    assert!(w.writes.is_empty());
}

/// Always fails, to exercise the sticky error path.
struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "synthetic failure"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_are_sticky_and_surface_at_close() {
    let mut e = Emitter::new(FailingWriter, JsonGenerator::new(compact()));
    let big = "x".repeat(BLOCK_SIZE * 2);

    // The write failure happens during the threshold flush, but the call
    // itself reports nothing.
    e.emit_string(&big).unwrap();
    assert_eq!(e.bytes_written(), 0);

    let err = e.close().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_protocol());

    // Close keeps returning the remembered error.
    assert_eq!(e.close().unwrap_err(), err);
    assert_eq!(e.flush().unwrap_err(), err);
}

#[test]
fn reset_allows_a_second_document() {
    let mut out = Vec::new();
    let mut e = Emitter::new(&mut out, JsonGenerator::new(compact()));
    e.emit_i32(1).unwrap();
    e.close().unwrap();

    e.reset();
    e.emit_i32(2).unwrap();
    e.close().unwrap();
    assert_eq!(e.bytes_written(), 1);
    drop(e);

    assert_eq!(out, b"12");
}

#[test]
fn reset_clears_a_sticky_error() {
    let mut e = Emitter::new(FailingWriter, JsonGenerator::new(compact()));
    let big = "x".repeat(BLOCK_SIZE * 2);
    e.emit_string(&big).unwrap();
    assert!(e.close().is_err());

    e.reset();
    e.emit_i32(1).unwrap();
    // The sink still fails, but only at close; the document itself was
    // accepted again from a clean state.
    assert!(e.close().is_err());
}

#[test]
fn formatting_is_idempotent() {
    let data = fancy_value();
    for options in [compact(), one_line(), multi_line()] {
        let first = to_vec_with_options(&data, options).unwrap();
        let second = to_vec_with_options(&data, options).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn compact_round_trips_through_serde_json() {
    let data = fancy_value();
    let text = to_string(&data).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let expected = serde_json::to_value(&data).unwrap();
    assert_eq!(parsed, expected);
}
