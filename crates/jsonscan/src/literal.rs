//! `null`, `true` and `false`.
//!
//! Literals are matched a byte at a time so a refill can land anywhere inside
//! one.

use crate::{
    error::{Byte, DecodeError, ErrorKind},
    window::{Cursor, Window},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    /// The literal starting with `first`, if any.
    pub(crate) fn from_first(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Literal::Null),
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            _ => None,
        }
    }

    fn text(self) -> &'static [u8] {
        match self {
            Literal::Null => b"null",
            Literal::True => b"true",
            Literal::False => b"false",
        }
    }

    fn mismatch(self, byte: u8, pos: usize) -> DecodeError {
        let kind = match self {
            Literal::Null => ErrorKind::InvalidNullLiteral(Byte(byte)),
            Literal::True | Literal::False => ErrorKind::InvalidValue(Byte(byte)),
        };
        DecodeError::new(kind, pos)
    }
}

/// What happened after feeding one more byte into the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Byte matched, more to come.
    NeedMore,
    /// Byte matched and completed the literal.
    Done,
    /// Byte did not match.
    Reject,
}

/// Matches the bytes of a literal after its first one.
#[derive(Debug, Clone, Copy)]
struct LiteralMatcher {
    remaining: &'static [u8],
}

impl LiteralMatcher {
    fn new(literal: Literal) -> Self {
        Self {
            remaining: &literal.text()[1..],
        }
    }

    fn step(&mut self, b: u8) -> Step {
        match self.remaining.split_first() {
            Some((&expected, rest)) if expected == b => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

impl<W: Window> Cursor<W> {
    /// Consumes `literal`, with the cursor on its first byte. On success the
    /// cursor is just past the literal; on a mismatch it is on the offending
    /// byte.
    pub(crate) fn expect_literal(&mut self, literal: Literal) -> Result<(), DecodeError> {
        let mut matcher = LiteralMatcher::new(literal);
        loop {
            self.pos += 1;
            let Some(b) = self.peek() else {
                return Err(DecodeError::unexpected_end(self.pos));
            };
            match matcher.step(b) {
                Step::NeedMore => {}
                Step::Done => {
                    self.pos += 1;
                    return Ok(());
                }
                Step::Reject => return Err(literal.mismatch(b, self.pos)),
            }
        }
    }
}
