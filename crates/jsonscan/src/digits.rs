//! Byte classification and power-of-ten lookups shared by every scanner.

#![expect(clippy::inline_always)]

/// Marker stored in [`DIGITS`] for bytes that are not ASCII digits.
pub(crate) const INVALID: u8 = 0xFF;

/// Maps a byte to its decimal value, or [`INVALID`].
pub(crate) static DIGITS: [u8; 256] = build_digits();

const fn build_digits() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] = b - b'0';
        b += 1;
    }
    table
}

/// `10^n` for `n` in `0..=19`; `10^19` is the largest power that fits a `u64`.
pub(crate) static POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

#[inline(always)]
pub(crate) fn digit_value(b: u8) -> Option<u8> {
    match DIGITS[b as usize] {
        INVALID => None,
        d => Some(d),
    }
}

#[inline(always)]
pub(crate) fn is_digit(b: u8) -> bool {
    DIGITS[b as usize] != INVALID
}

/// `10^n`, or `None` past the table.
#[inline]
pub(crate) fn pow10(n: usize) -> Option<u64> {
    POW10.get(n).copied()
}

/// Bytes that end a number: JSON whitespace and the structural terminators
/// that may follow a value.
#[inline(always)]
pub(crate) fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b'}' | b']')
}
