//! Boundary detection for numeric tokens.
//!
//! These routines only locate digit runs and classify the byte that ends
//! them; converting the runs into values is left to the integer and float
//! scanners. Positions are indices into the window, so a run can be read back
//! with [`Cursor::span`] once its end is known.

use crate::{
    digits::{is_digit, is_separator},
    error::DecodeError,
    window::{Cursor, Window},
};

/// Inclusive index range of a digit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Span {
    pub(crate) fn len(self) -> usize {
        self.end - self.start + 1
    }
}

/// What follows the integer digits of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum After {
    /// A separator or the end of input; the cursor is on it.
    End,
    /// A `.`; the cursor is on it.
    Fraction,
    /// An `e`/`E`; the cursor is on the byte after it.
    Exponent,
}

impl<W: Window> Cursor<W> {
    /// Scans the integer digits of a number. The cursor must be on a digit.
    pub(crate) fn scan_integer_digits(&mut self) -> Result<(Span, After), DecodeError> {
        let start = self.pos;
        debug_assert!(self.byte_at(start).is_some_and(is_digit));
        let mut end = start;
        let mut j = start + 1;
        loop {
            let Some(b) = self.byte_at(j) else {
                self.pos = j;
                return Ok((Span { start, end }, After::End));
            };
            match b {
                b'.' => {
                    self.pos = j;
                    return Ok((Span { start, end }, After::Fraction));
                }
                b'e' | b'E' => {
                    self.pos = j + 1;
                    return Ok((Span { start, end }, After::Exponent));
                }
                b if is_digit(b) => {
                    end = j;
                    j += 1;
                }
                b if is_separator(b) => {
                    self.pos = j;
                    return Ok((Span { start, end }, After::End));
                }
                b => {
                    self.pos = j;
                    return Err(DecodeError::malformed(b, j));
                }
            }
        }
    }

    /// Scans the fraction digits after the `.` under the cursor. Returns the
    /// digit run and whether an exponent marker follows (the cursor is then
    /// past the marker); otherwise the cursor is on the terminating separator
    /// or at the end of input.
    pub(crate) fn scan_fraction_digits(&mut self) -> Result<(Span, bool), DecodeError> {
        let start = self.pos + 1;
        match self.byte_at(start) {
            None => {
                self.pos = start;
                return Err(DecodeError::unexpected_end(start));
            }
            Some(b) if !is_digit(b) => {
                self.pos = start;
                return Err(DecodeError::malformed(b, start));
            }
            Some(_) => {}
        }
        let mut end = start;
        let mut j = start + 1;
        loop {
            let Some(b) = self.byte_at(j) else {
                self.pos = j;
                return Ok((Span { start, end }, false));
            };
            match b {
                b'e' | b'E' => {
                    self.pos = j + 1;
                    return Ok((Span { start, end }, true));
                }
                b if is_digit(b) => {
                    end = j;
                    j += 1;
                }
                b if is_separator(b) => {
                    self.pos = j;
                    return Ok((Span { start, end }, false));
                }
                b => {
                    self.pos = j;
                    return Err(DecodeError::malformed(b, j));
                }
            }
        }
    }
}
