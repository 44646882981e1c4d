#![expect(missing_docs)]

use jsonscan::{DecodeOptions, Decoder, Number};

fn render<T: Number + core::fmt::Debug>(input: &[u8], options: DecodeOptions) -> String {
    let err = Decoder::with_options(input, options)
        .next_number::<T>()
        .unwrap_err();
    format!("{err} ({:?})", err.severity())
}

fn render_default<T: Number + core::fmt::Debug>(input: &[u8]) -> String {
    render::<T>(input, DecodeOptions::default())
}

#[test]
fn snapshot_error_messages() {
    insta::assert_snapshot!(render_default::<i32>(b"12a"), @r#"invalid character "a" in number at position 2 (Fatal)"#);
    insta::assert_snapshot!(render_default::<f64>(b"1\xFF"), @r#"invalid character "\xFF" in number at position 1 (Fatal)"#);
    insta::assert_snapshot!(render_default::<u32>(b"4294967296"), @"value overflows uint32 at position 0 (Recoverable)");
    insta::assert_snapshot!(render_default::<isize>(b" 99999999999999999999"), @"value overflows int at position 1 (Recoverable)");
    insta::assert_snapshot!(render_default::<f64>(b"1e40"), @"value overflows float64 at position 0 (Recoverable)");
    insta::assert_snapshot!(render_default::<i64>(br#""x""#), @r#"cannot decode "\"" into int64 at position 0 (Recoverable)"#);
    insta::assert_snapshot!(render_default::<u64>(b"nul"), @"unexpected end of input at position 3 (Fatal)");
    insta::assert_snapshot!(render_default::<i32>(b"nulx"), @r#"invalid character "x" in null literal at position 3 (Fatal)"#);
    insta::assert_snapshot!(render_default::<i32>(b"}"), @r#"invalid character "}" where a value was expected at position 0 (Fatal)"#);
}

#[test]
fn snapshot_strict_mode_message() {
    let options = DecodeOptions {
        lossy_integer_coercion: false,
        ..Default::default()
    };
    insta::assert_snapshot!(render::<i64>(b"1.5", options), @"number with fraction or exponent rejected for int64 at position 0 (Recoverable)");
}
