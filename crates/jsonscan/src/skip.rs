//! Skipping values without decoding them.
//!
//! [`Cursor::skip_number`] walks past a numeric token and reports where it
//! stopped even when the token turned out to be malformed.
//! [`Cursor::skip_value`] is used to step over a value of the wrong type so
//! decoding can resume with the next sibling. Neither validates more than it
//! needs to find the end of the value.

use crate::{
    digits::{is_digit, is_separator},
    error::{Byte, DecodeError, ErrorKind},
    literal::Literal,
    window::{Cursor, Window},
};

/// Where a skipped number ended, and why it stopped if that was not a
/// separator or the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipOutcome {
    /// Offset of the first byte after the number.
    pub end: usize,
    /// Set when a byte that cannot appear in a number stopped the skip (the
    /// byte is at `end`), or when the input ended before a digit run that
    /// the number still needed.
    pub error: Option<DecodeError>,
}

impl SkipOutcome {
    /// Converts to a `Result`, dropping the end offset.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the skip, if any.
    pub fn into_result(self) -> Result<usize, DecodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.end),
        }
    }
}

impl<W: Window> Cursor<W> {
    /// Skips a number, with the cursor on its first byte (a digit or `-`).
    /// The cursor is left at [`SkipOutcome::end`].
    pub(crate) fn skip_number(&mut self) -> SkipOutcome {
        let mut j = self.pos;
        if self.byte_at(j) == Some(b'-') {
            j += 1;
        }
        let mut seen_dot = false;
        let mut seen_exp = false;
        let mut sign_allowed = false;
        // Whether the current digit run (integer, fraction or exponent) has
        // any digits yet.
        let mut digits = false;
        let error = loop {
            let Some(b) = self.byte_at(j) else {
                break (!digits).then(|| DecodeError::unexpected_end(j));
            };
            match b {
                b if is_digit(b) => {
                    digits = true;
                    sign_allowed = false;
                }
                b'.' if digits && !seen_dot && !seen_exp => {
                    seen_dot = true;
                    digits = false;
                }
                b'e' | b'E' if digits && !seen_exp => {
                    seen_exp = true;
                    digits = false;
                    sign_allowed = true;
                    j += 1;
                    continue;
                }
                b'+' | b'-' if sign_allowed => sign_allowed = false,
                b if digits && is_separator(b) => break None,
                b => break Some(DecodeError::malformed(b, j)),
            }
            j += 1;
        };
        self.pos = j;
        SkipOutcome { end: j, error }
    }

    /// Skips one value of any kind, with the cursor on its first byte. On
    /// success the cursor is just past the value.
    pub(crate) fn skip_value(&mut self) -> Result<(), DecodeError> {
        let Some(first) = self.peek() else {
            return Err(DecodeError::unexpected_end(self.pos));
        };
        match first {
            b'"' => self.skip_string(),
            b'{' | b'[' => self.skip_container(),
            b'-' | b'0'..=b'9' => self.skip_number().into_result().map(drop),
            b => match Literal::from_first(b) {
                Some(literal) => self.expect_literal(literal),
                None => Err(DecodeError::new(ErrorKind::InvalidValue(Byte(b)), self.pos)),
            },
        }
    }

    /// Skips a string with the cursor on its opening quote. Escapes are only
    /// recognised well enough to find the closing quote.
    fn skip_string(&mut self) -> Result<(), DecodeError> {
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(DecodeError::unexpected_end(self.pos)),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\\') => self.pos += 2,
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skips an object or array by bracket depth. Bracket kinds are not
    /// matched against each other.
    fn skip_container(&mut self) -> Result<(), DecodeError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(DecodeError::unexpected_end(self.pos)),
                Some(b'"') => {
                    self.skip_string()?;
                    continue;
                }
                Some(b'{' | b'[') => depth += 1,
                Some(b'}' | b']') => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
    }
}
