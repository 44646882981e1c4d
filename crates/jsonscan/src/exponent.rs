//! Exponent resolver.
//!
//! Reads the part of a number after `e`/`E`: at most one sign, then one or
//! more digits. Leading zeros are allowed. Magnitudes above
//! [`MAX_EXPONENT`] are a recoverable overflow, reported once the digits have
//! been consumed so the decoder can continue after the token.

use crate::{
    digits::{digit_value, is_separator},
    error::{DecodeError, Width},
    window::{Cursor, Window},
};

/// Largest exponent magnitude accepted. Scaling goes through the power table,
/// and `10^18` is the largest power that leaves headroom for the mantissa.
pub(crate) const MAX_EXPONENT: u64 = 18;

impl<W: Window> Cursor<W> {
    /// Scans the exponent following an `e`/`E`, with the cursor on the first
    /// byte after the marker. On success the cursor is left on the terminating
    /// separator (or at the end of input).
    ///
    /// Exponents beyond [`MAX_EXPONENT`] are reported as a recoverable
    /// overflow of `width` at `token_start`, after all exponent digits have
    /// been consumed.
    pub(crate) fn scan_exponent(
        &mut self,
        width: Width,
        token_start: usize,
    ) -> Result<i64, DecodeError> {
        self.scan_signed_exponent(width, token_start, true)
    }

    fn scan_signed_exponent(
        &mut self,
        width: Width,
        token_start: usize,
        allow_sign: bool,
    ) -> Result<i64, DecodeError> {
        match self.peek() {
            Some(sign @ (b'+' | b'-')) if allow_sign => {
                self.pos += 1;
                let exp = self.scan_signed_exponent(width, token_start, false)?;
                Ok(if sign == b'-' { -exp } else { exp })
            }
            _ => self.scan_exponent_digits(width, token_start),
        }
    }

    fn scan_exponent_digits(&mut self, width: Width, token_start: usize) -> Result<i64, DecodeError> {
        let mut seen_digit = false;
        let mut magnitude = 0u64;
        let mut overflow = false;
        loop {
            let Some(b) = self.peek() else { break };
            if let Some(d) = digit_value(b) {
                seen_digit = true;
                // Leading zeros keep the magnitude at zero.
                if !overflow {
                    magnitude = magnitude * 10 + u64::from(d);
                    overflow = magnitude > MAX_EXPONENT;
                }
                self.pos += 1;
            } else if is_separator(b) {
                break;
            } else {
                return Err(DecodeError::malformed(b, self.pos));
            }
        }

        if !seen_digit {
            return Err(match self.peek() {
                Some(b) => DecodeError::malformed(b, self.pos),
                None => DecodeError::unexpected_end(self.pos),
            });
        }
        if overflow {
            tracing::debug!(%width, pos = token_start, "exponent out of range");
            return Err(DecodeError::overflow(width, token_start));
        }
        // Bounded by MAX_EXPONENT above.
        #[allow(clippy::cast_possible_wrap)]
        Ok(magnitude as i64)
    }
}
