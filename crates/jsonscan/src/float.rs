//! Float token scanner and the `f64` composition helpers shared with the
//! integer scanner's lossy path.

use crate::{
    accumulate::accumulate_u64,
    digits::{DIGITS, POW10},
    error::{DecodeError, Width},
    token::{After, Span},
    window::{Cursor, Window},
};

/// Fraction digits beyond this many are consumed but do not contribute.
pub(crate) const MAX_FRACTION_DIGITS: usize = 19;

/// `(int * 10^n + frac) / 10^n * 10^exp` for a fraction of `n` digits.
///
/// While the mantissa `int * 10^n + frac` fits a `u64` the fraction and
/// exponent scales are folded into a single multiplication or division, so
/// the result is rounded once. Otherwise the fraction is added to the integer
/// part in floating point.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub(crate) fn compose(int: u64, frac: u64, frac_len: usize, exp: i64) -> f64 {
    let frac_scale = POW10[frac_len];
    let Some(mantissa) = int.checked_mul(frac_scale).and_then(|m| m.checked_add(frac)) else {
        return scale(int as f64 + frac as f64 / frac_scale as f64, exp);
    };
    let net = exp - frac_len as i64;
    if net.unsigned_abs() < POW10.len() as u64 {
        scale(mantissa as f64, net)
    } else {
        scale(scale(mantissa as f64, -(frac_len as i64)), exp)
    }
}

/// Multiplies by `10^exp`, or divides for a negative exponent.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub(crate) fn scale(value: f64, exp: i64) -> f64 {
    let power = POW10[exp.unsigned_abs() as usize] as f64;
    if exp < 0 { value / power } else { value * power }
}

/// Accumulates digits into an `f64` without a range limit.
fn accumulate_f64(digits: &[u8]) -> f64 {
    digits
        .iter()
        .fold(0.0, |acc, &b| acc * 10.0 + f64::from(DIGITS[b as usize]))
}

impl<W: Window> Cursor<W> {
    /// Value and contributing length of a fraction run.
    pub(crate) fn fraction_value(&self, frac: Span) -> (u64, usize) {
        let len = core::cmp::min(frac.len(), MAX_FRACTION_DIGITS);
        let digits = self.span(frac.start, frac.start + len - 1);
        // At most 19 digits always fit.
        (accumulate_u64(digits).unwrap_or_default(), len)
    }

    #[allow(clippy::cast_precision_loss)]
    fn integer_part_f64(&self, int: Span) -> f64 {
        let digits = self.span(int.start, int.end);
        match accumulate_u64(digits) {
            Some(v) => v as f64,
            None => accumulate_f64(digits),
        }
    }

    /// Scans a number into an `f64`. The cursor must be on the first digit
    /// (after any sign).
    pub(crate) fn scan_float(
        &mut self,
        negative: bool,
        token_start: usize,
    ) -> Result<f64, DecodeError> {
        let (int, after) = self.scan_integer_digits()?;
        let value = match after {
            After::End => self.integer_part_f64(int),
            After::Fraction => {
                let (frac, exponent) = self.scan_fraction_digits()?;
                let exp = if exponent {
                    self.scan_exponent(Width::F64, token_start)?
                } else {
                    0
                };
                let (frac_value, frac_len) = self.fraction_value(frac);
                let digits = self.span(int.start, int.end);
                match accumulate_u64(digits) {
                    Some(int_value) => compose(int_value, frac_value, frac_len, exp),
                    #[allow(clippy::cast_precision_loss)]
                    None => scale(
                        accumulate_f64(digits) + frac_value as f64 / POW10[frac_len] as f64,
                        exp,
                    ),
                }
            }
            After::Exponent => {
                let exp = self.scan_exponent(Width::F64, token_start)?;
                scale(self.integer_part_f64(int), exp)
            }
        };
        tracing::trace!(start = token_start, end = self.pos, value, "scanned float");
        Ok(if negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{error::ErrorKind, window::ChunkedWindow};

    fn float(input: &[u8]) -> (Result<f64, DecodeError>, usize) {
        let mut c = Cursor::new(input);
        let r = c.scan_float(false, 0);
        (r, c.pos)
    }

    #[allow(clippy::approx_constant)]
    #[rstest]
    #[case(b"0", 0.0, 1)]
    #[case(b"42,", 42.0, 2)]
    #[case(b"3.14", 3.14, 4)]
    #[case(b"2e3", 2000.0, 3)]
    #[case(b"2E-2", 0.02, 4)]
    #[case(b"1.5e2]", 150.0, 5)]
    #[case(b"1.25E+1 ", 12.5, 7)]
    #[case(b"0.000001}", 0.000_001, 8)]
    #[case(b"123.456", 123.456, 7)]
    fn scans(#[case] input: &[u8], #[case] expected: f64, #[case] end: usize) {
        let (r, pos) = float(input);
        assert_eq!(r, Ok(expected));
        assert_eq!(pos, end);
    }

    #[test]
    fn long_fraction_is_truncated_not_rejected() {
        let (r, _) = float(b"0.1234567890123456789999");
        let v = r.unwrap();
        assert!((v - 0.123_456_789_012_345_68).abs() < 1e-15, "{v}");
    }

    #[test]
    fn huge_integer_part_falls_back_to_f64() {
        let (r, pos) = float(b"123456789012345678901234567890");
        let v = r.unwrap();
        assert!((v - 1.234_567_890_123_456_8e29).abs() / v < 1e-12, "{v}");
        assert_eq!(pos, 30);
    }

    #[test]
    fn exponent_past_table_overflows_after_consuming_token() {
        let (r, pos) = float(b"1.5e40,");
        assert_eq!(r.unwrap_err().kind(), ErrorKind::Overflow(Width::F64));
        assert_eq!(pos, 6);
    }

    #[test]
    fn dangling_exponent_is_unexpected_end() {
        let (r, _) = float(b"5e");
        assert_eq!(r, Err(DecodeError::unexpected_end(2)));
    }

    #[test]
    fn negative_sign_applies_last() {
        let mut c = Cursor::new(b"0.5".as_slice());
        assert_eq!(c.scan_float(true, 0), Ok(-0.5));
    }

    #[test]
    fn chunk_boundaries_do_not_matter() {
        for chunk in 1..8 {
            let mut c = Cursor::new(ChunkedWindow::new(b"6.02e-3 ", chunk));
            assert_eq!(c.scan_float(false, 0), Ok(0.00602), "chunk {chunk}");
            assert_eq!(c.pos, 7);
        }
    }
}
