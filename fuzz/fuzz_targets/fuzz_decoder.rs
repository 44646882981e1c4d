#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use jsonscan::{ChunkedWindow, DecodeError, DecodeOptions, Decoder, Window};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static SEPARATORS: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b",", b", "];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x1F);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size && prefix < max_size {
            let limit = max_size - prefix;
            prefix += append_separator(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            prefix += append_value(&mut data[prefix..], limit);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_separator(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let sep = SEPARATORS[rng.random_range(0..SEPARATORS.len())];
        if sep.len() > limit {
            return 0;
        }
        buf[..sep.len()].copy_from_slice(sep);
        sep.len()
    })
}

/// Values a number decoder is likely to meet, biased toward numbers.
#[derive(Debug, Arbitrary)]
enum Seed {
    Int(i64),
    Uint(u64),
    Small(i32),
    Float(f64),
    Exponent(u16, i8),
    Null,
    Text(String),
    Junk(u8),
}

impl Seed {
    fn render(&self) -> Vec<u8> {
        match self {
            Seed::Int(v) => v.to_string().into_bytes(),
            Seed::Uint(v) => v.to_string().into_bytes(),
            Seed::Small(v) => v.to_string().into_bytes(),
            Seed::Float(v) => serde_json::Number::from_f64(*v)
                .map(|n| n.to_string().into_bytes())
                .unwrap_or_else(|| b"0.0".to_vec()),
            Seed::Exponent(m, e) => format!("{m}e{e}").into_bytes(),
            Seed::Null => b"null".to_vec(),
            Seed::Text(s) => serde_json::to_vec(s).unwrap_or_default(),
            Seed::Junk(b) => vec![*b],
        }
    }
}

fn append_value(buf: &mut [u8], limit: usize) -> usize {
    let bytes: Vec<u8> = with_rng(|rng| (0..64).map(|_| rng.random::<u8>()).collect());
    let Ok(seed) = Seed::arbitrary(&mut Unstructured::new(&bytes)) else {
        return 0;
    };
    let rendered = seed.render();
    let len = rendered.len().min(limit);
    buf[..len].copy_from_slice(&rendered[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// One decode call: the value (integers widened, floats by bit pattern) or
/// the error, plus the cursor afterwards.
type Outcome = (Result<Option<u64>, DecodeError>, usize);

fn decode_all<W: Window>(mut decoder: Decoder<W>, flags: u8) -> Vec<Outcome> {
    let mut out = Vec::new();
    for call in 0usize.. {
        let before = decoder.position();
        let result = match (usize::from(flags) + call) % 6 {
            0 => decoder.next_i32().map(|v| v.map(|v| v as u64)),
            1 => decoder.next_i64().map(|v| v.map(|v| v as u64)),
            2 => decoder.next_int().map(|v| v.map(|v| v as u64)),
            3 => decoder.next_u32().map(|v| v.map(u64::from)),
            4 => decoder.next_u64(),
            _ => decoder.next_f64().map(|v| v.map(f64::to_bits)),
        };
        let after = decoder.position();
        let stop = match &result {
            Ok(_) => false,
            Err(err) => !err.is_recoverable(),
        };
        if !stop {
            assert!(after > before, "decoder made no progress at {before}");
        }
        out.push((result, after));
        if stop {
            break;
        }
    }
    out
}

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let chunk = (u32::from_le_bytes([data[1], data[2], data[3], data[4]]) % 17) as usize + 1;
    let data = &data[HEADER..];

    let options = DecodeOptions {
        lossy_integer_coercion: flags & 0x10 == 0,
        allow_leading_plus: flags & 0x08 != 0,
        panic_on_error: false,
    };

    let whole = decode_all(Decoder::with_options(data, options), flags);
    let chunked = decode_all(
        Decoder::with_options(ChunkedWindow::new(data, chunk), options),
        flags,
    );
    assert_eq!(whole, chunked, "chunk size {chunk} changed the outcome");

    // Anything serde_json reads as a single i64 must decode to the same value.
    if let Ok(expected) = serde_json::from_slice::<i64>(data) {
        let got = Decoder::with_options(data, options).next_i64();
        assert_eq!(got, Ok(Some(expected)));
    }
}

fuzz_target!(|data: &[u8]| decoder(data));
