//! Integer token scanner.
//!
//! Plain digit runs go straight through the accumulator. Numbers with a
//! fraction or exponent follow the lossy coercion rules of
//! [`DecodeOptions::lossy_integer_coercion`]:
//! - `int.frac` without exponent: the fraction is dropped (`1.9` → `1`).
//! - `int.frac e exp`: evaluated as `f64` and truncated toward zero
//!   (`1.5e2` → `150`).
//! - `int e exp`: multiplied by `10^exp` with overflow checks, or
//!   integer-divided by `10^-exp`, truncating toward zero (`15e-1` → `1`).

use crate::{
    accumulate::{Integer, accumulate_integer, accumulate_magnitude, accumulate_u64},
    digits::pow10,
    error::{DecodeError, ErrorKind},
    float::compose,
    options::DecodeOptions,
    token::{After, Span},
    window::{Cursor, Window},
};

impl<W: Window> Cursor<W> {
    /// Scans a number into `T`. The cursor must be on the first digit (after
    /// any sign). Every error other than a malformed byte or a premature end
    /// of input is reported after the whole token has been consumed.
    pub(crate) fn scan_integer<T: Integer>(
        &mut self,
        negative: bool,
        token_start: usize,
        options: &DecodeOptions,
    ) -> Result<T, DecodeError> {
        let (int, after) = self.scan_integer_digits()?;
        let value = match after {
            After::End => self.finish_integer::<T>(int, negative, token_start)?,
            After::Fraction => {
                let (frac, exponent) = self.scan_fraction_digits()?;
                let exp = if exponent {
                    Some(self.scan_exponent(T::WIDTH, token_start)?)
                } else {
                    None
                };
                reject_lossy::<T>(options, token_start)?;
                match exp {
                    None => self.finish_integer::<T>(int, negative, token_start)?,
                    Some(exp) => self.integer_through_float::<T>(int, frac, exp, negative, token_start)?,
                }
            }
            After::Exponent => {
                let exp = self.scan_exponent(T::WIDTH, token_start)?;
                reject_lossy::<T>(options, token_start)?;
                self.integer_with_exponent::<T>(int, exp, negative, token_start)?
            }
        };
        tracing::trace!(start = token_start, end = self.pos, width = %T::WIDTH, "scanned integer");
        Ok(value)
    }

    fn finish_integer<T: Integer>(
        &self,
        int: Span,
        negative: bool,
        token_start: usize,
    ) -> Result<T, DecodeError> {
        accumulate_integer::<T>(self.span(int.start, int.end), negative)
            .ok_or_else(|| DecodeError::overflow(T::WIDTH, token_start))
    }

    /// `int e exp`: scaled in the integer domain.
    fn integer_with_exponent<T: Integer>(
        &self,
        int: Span,
        exp: i64,
        negative: bool,
        token_start: usize,
    ) -> Result<T, DecodeError> {
        let overflow = || DecodeError::overflow(T::WIDTH, token_start);
        let magnitude =
            accumulate_magnitude::<T>(self.span(int.start, int.end), negative).ok_or_else(overflow)?;
        #[allow(clippy::cast_possible_truncation)]
        let power = pow10(exp.unsigned_abs() as usize).ok_or_else(overflow)?;
        let scaled = if exp < 0 {
            Some(magnitude / power)
        } else {
            magnitude.checked_mul(power)
        };
        scaled
            .and_then(|m| T::from_magnitude(m, negative))
            .ok_or_else(overflow)
    }

    /// `int.frac e exp`: evaluated as `f64`, then truncated toward zero.
    fn integer_through_float<T: Integer>(
        &self,
        int: Span,
        frac: Span,
        exp: i64,
        negative: bool,
        token_start: usize,
    ) -> Result<T, DecodeError> {
        let overflow = || DecodeError::overflow(T::WIDTH, token_start);
        let int_value = accumulate_u64(self.span(int.start, int.end)).ok_or_else(overflow)?;
        let (frac_value, frac_len) = self.fraction_value(frac);
        let value = compose(int_value, frac_value, frac_len, exp);
        T::from_f64_truncated(if negative { -value } else { value }).ok_or_else(overflow)
    }
}

fn reject_lossy<T: Integer>(options: &DecodeOptions, token_start: usize) -> Result<(), DecodeError> {
    if options.lossy_integer_coercion {
        Ok(())
    } else {
        Err(DecodeError::new(ErrorKind::LossyCoercion(T::WIDTH), token_start))
    }
}
