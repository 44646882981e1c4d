use std::{format, string::ToString, vec::Vec};

use quickcheck::QuickCheck;

use crate::{ChunkedWindow, DecodeError, Decoder};

fn tests() -> u64 {
    if cfg!(miri) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Decodes every value of `input` as `i64` until a fatal error or the end of
/// input, recording each outcome and the cursor after it.
fn decode_all(input: &[u8], chunk: usize) -> Vec<(Result<Option<i64>, DecodeError>, usize)> {
    let mut decoder = Decoder::new(ChunkedWindow::new(input, chunk));
    let mut out = Vec::new();
    loop {
        let result = decoder.next_i64();
        let stop = matches!(&result, Err(err) if !err.is_recoverable());
        out.push((result, decoder.position()));
        if stop {
            return out;
        }
    }
}

/// Property: integers rendered by the standard formatter decode to
/// themselves, and agree with `serde_json`.
#[test]
fn integer_roundtrip_quickcheck() {
    fn prop(a: i64, b: i32, c: u64) -> bool {
        let src = format!("[{a}, {b},{c}]");
        let mut decoder = Decoder::new(&src.as_bytes()[1..]);
        let reference: (i64, i32, u64) = serde_json::from_str(&src).unwrap();
        decoder.next_i64() == Ok(Some(a))
            && decoder.next_i32() == Ok(Some(b))
            && decoder.next_u64() == Ok(Some(c))
            && reference == (a, b, c)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(i64, i32, u64) -> bool);
}

/// Property: short decimals are decoded exactly like the standard library's
/// correctly rounded parser.
#[test]
fn short_decimal_quickcheck() {
    fn prop(int: u32, frac: u16, negative: bool) -> bool {
        let src = format!("{}{int}.{frac:05}", if negative { "-" } else { "" });
        let expected: f64 = src.parse().unwrap();
        Decoder::new(src.as_bytes()).next_f64() == Ok(Some(expected))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(u32, u16, bool) -> bool);
}

/// Property: how the input is split across refills never changes what is
/// decoded, where the cursor ends up, or which error is reported.
#[test]
fn chunking_invariance_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, chunk: u8) -> bool {
        let chunk = usize::from(chunk.max(1));
        decode_all(&bytes, chunk) == decode_all(&bytes, bytes.len().max(1))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

/// Property: the same bytes decoded twice by fresh decoders give the same
/// results.
#[test]
fn idempotence_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<i64>, junk: Vec<u8>) -> bool {
        let mut src = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
            .into_bytes();
        src.push(b',');
        src.extend_from_slice(&junk);
        let first = decode_all(&src, 3);
        let second = decode_all(&src, 3);
        first == second
            && first
                .iter()
                .zip(&values)
                .all(|((result, _), value)| *result == Ok(Some(*value)))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<i64>, Vec<u8>) -> bool);
}
