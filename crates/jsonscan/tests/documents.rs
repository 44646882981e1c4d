#![expect(missing_docs)]

use core::fmt::Write;

use jsonscan::{ChunkedWindow, Decoder, ErrorKind, Window};

/// Decodes `i64` values until the end of input or a fatal error, rendering
/// one line per call.
fn render_i64s<W: Window>(decoder: &mut Decoder<W>) -> String {
    let mut out = String::new();
    loop {
        match decoder.next_i64() {
            Ok(value) => writeln!(out, "{value:?} @{}", decoder.position()).unwrap(),
            Err(err) if err.is_recoverable() => {
                writeln!(out, "skipped: {err} @{}", decoder.position()).unwrap();
            }
            Err(err) => {
                write!(out, "stop: {err}").unwrap();
                return out;
            }
        }
    }
}

#[test]
fn mixed_sequence_recovers_after_each_bad_value() {
    let doc = br#"1, 2.5e1, "str", 9223372036854775808, null, {"a": [1]}, -7"#;
    let mut decoder = Decoder::new(doc.as_slice());
    insta::assert_snapshot!(render_i64s(&mut decoder), @r#"
    Some(1) @1
    Some(25) @8
    skipped: cannot decode "\"" into int64 at position 10 @15
    skipped: value overflows int64 at position 17 @36
    None @42
    skipped: cannot decode "{" into int64 at position 44 @54
    Some(-7) @58
    stop: unexpected end of input at position 58
    "#);
}

#[test]
fn large_document_in_every_chunk_size() {
    let mut doc = String::new();
    let mut expected = 0i64;
    for i in 0..500i64 {
        let v = (i * 7919) % 100_003 - 50_000;
        expected += v;
        writeln!(doc, "{v},").unwrap();
    }

    for chunk in [1, 2, 3, 7, 64, 4096] {
        let mut decoder = Decoder::new(ChunkedWindow::new(doc.as_bytes(), chunk));
        let mut sum = 0i64;
        let err = loop {
            match decoder.next_i64() {
                Ok(Some(v)) => sum += v,
                Ok(None) => unreachable!(),
                Err(err) => break err,
            }
        };
        assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
        assert_eq!(err.pos(), doc.len());
        assert_eq!(sum, expected, "chunk {chunk}");
    }
}
