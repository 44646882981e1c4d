use core::fmt;

use bstr::BStr;
use thiserror::Error;

/// Numeric width a value was being decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Int,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f64`
    F64,
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Width::I32 => "int32",
            Width::I64 => "int64",
            Width::Int => "int",
            Width::U32 => "uint32",
            Width::U64 => "uint64",
            Width::F64 => "float64",
        })
    }
}

/// A single input byte, displayed as an escaped byte string (`"a"`, `"\xFF"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Byte(pub u8);

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", BStr::new(core::slice::from_ref(&self.0)))
    }
}

/// Whether a decoder can keep going after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The offending token was consumed and the destination left untouched;
    /// decoding may continue with the next sibling value.
    Recoverable,
    /// The input is malformed at the reported position; the current decode
    /// should be abandoned.
    Fatal,
}

/// What went wrong while scanning a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A byte that cannot appear at this point of a number.
    #[error("invalid character {0} in number")]
    MalformedNumber(Byte),
    /// The value does not fit the target width.
    #[error("value overflows {0}")]
    Overflow(Width),
    /// The value at the cursor is not a number.
    #[error("cannot decode {found} into {target}")]
    TypeMismatch {
        /// First byte of the value found instead.
        found: Byte,
        /// Requested width.
        target: Width,
    },
    /// A fraction or exponent was found for an integer target while lossy
    /// coercion is disabled.
    #[error("number with fraction or exponent rejected for {0}")]
    LossyCoercion(Width),
    /// The input ended before a complete value was read.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A value starting with `n` that is not `null`.
    #[error("invalid character {0} in null literal")]
    InvalidNullLiteral(Byte),
    /// A byte that cannot start (or continue) a value being skipped.
    #[error("invalid character {0} where a value was expected")]
    InvalidValue(Byte),
}

impl ErrorKind {
    /// Classifies the error as recoverable or fatal.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            ErrorKind::Overflow(_) | ErrorKind::TypeMismatch { .. } | ErrorKind::LossyCoercion(_) => {
                Severity::Recoverable
            }
            ErrorKind::MalformedNumber(_)
            | ErrorKind::UnexpectedEnd
            | ErrorKind::InvalidNullLiteral(_)
            | ErrorKind::InvalidValue(_) => Severity::Fatal,
        }
    }
}

/// Error returned by every decode operation.
///
/// `pos` is the byte offset of the offending byte for fatal errors, and the
/// offset of the first byte of the rejected token for recoverable ones.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at position {pos}")]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    pub(crate) pos: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    pub(crate) fn malformed(byte: u8, pos: usize) -> Self {
        Self::new(ErrorKind::MalformedNumber(Byte(byte)), pos)
    }

    pub(crate) fn overflow(width: Width, pos: usize) -> Self {
        Self::new(ErrorKind::Overflow(width), pos)
    }

    pub(crate) fn unexpected_end(pos: usize) -> Self {
        Self::new(ErrorKind::UnexpectedEnd, pos)
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset the error refers to.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Shorthand for `self.kind().severity()`.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// `true` when decoding may continue with the next value.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}
