//! The caller-facing [`Decoder`].
//!
//! A decoder owns a [`Window`] and a read position. Every entry point skips
//! whitespace and commas, scans one value, and leaves the cursor on the byte
//! after it. Recoverable errors consume the offending token; fatal errors
//! leave the cursor on the byte that caused them.

use crate::{
    accumulate::Integer,
    digits::is_digit,
    error::{Byte, DecodeError, ErrorKind, Width},
    literal::Literal,
    options::DecodeOptions,
    skip::SkipOutcome,
    window::{Cursor, Window},
};

mod sealed {
    pub trait Sealed {}
}

/// Types a [`Decoder`] can decode: the [`Integer`] types and `f64`.
pub trait Number: Copy + sealed::Sealed {
    /// Width reported in type mismatch and overflow errors.
    const WIDTH: Width;

    /// Scans the token under the decoder's cursor, which is on its first
    /// digit. `token_start` includes any sign.
    #[doc(hidden)]
    fn scan<W: Window>(
        decoder: &mut Decoder<W>,
        negative: bool,
        token_start: usize,
    ) -> Result<Self, DecodeError>;
}

impl<T: Integer> sealed::Sealed for T {}

impl<T: Integer> Number for T {
    const WIDTH: Width = <T as Integer>::WIDTH;

    #[inline]
    fn scan<W: Window>(
        decoder: &mut Decoder<W>,
        negative: bool,
        token_start: usize,
    ) -> Result<Self, DecodeError> {
        decoder
            .cursor
            .scan_integer::<T>(negative, token_start, &decoder.options)
    }
}

impl sealed::Sealed for f64 {}

impl Number for f64 {
    const WIDTH: Width = Width::F64;

    #[inline]
    fn scan<W: Window>(
        decoder: &mut Decoder<W>,
        negative: bool,
        token_start: usize,
    ) -> Result<Self, DecodeError> {
        decoder.cursor.scan_float(negative, token_start)
    }
}

/// Streaming decoder for JSON numbers.
///
/// Each call skips whitespace and `,`, then decodes the value at the cursor.
/// Errors are returned per call; after a [recoverable](DecodeError::is_recoverable)
/// error the offending value has been consumed and the next call continues
/// with the value after it.
///
/// ```rust
/// use jsonscan::Decoder;
///
/// let mut decoder = Decoder::new(b"12, -7, null, 2.5".as_slice());
/// let mut a = 0i32;
/// decoder.decode_i32(&mut a).unwrap();
/// assert_eq!(a, 12);
/// assert_eq!(decoder.next_i64().unwrap(), Some(-7));
/// assert_eq!(decoder.next_u32().unwrap(), None);
/// assert_eq!(decoder.next_f64().unwrap(), Some(2.5));
/// ```
#[derive(Debug)]
pub struct Decoder<W> {
    cursor: Cursor<W>,
    options: DecodeOptions,
}

macro_rules! typed_entry_points {
    ($($ty:ty => $decode:ident, $next:ident;)*) => {$(
        #[doc = concat!("Decodes the next value into `out` as `", stringify!($ty), "`.")]
        ///
        /// `null` leaves `out` unchanged.
        ///
        /// # Errors
        ///
        /// See [`Decoder::decode`].
        #[inline]
        pub fn $decode(&mut self, out: &mut $ty) -> Result<(), DecodeError> {
            self.decode(out)
        }

        #[doc = concat!("Decodes the next value as `", stringify!($ty), "`, or `None` for `null`.")]
        ///
        /// # Errors
        ///
        /// See [`Decoder::decode`].
        #[inline]
        pub fn $next(&mut self) -> Result<Option<$ty>, DecodeError> {
            self.next_number()
        }
    )*};
}

impl<W: Window> Decoder<W> {
    /// Creates a decoder over `window` with default options.
    #[must_use]
    pub fn new(window: W) -> Self {
        Self::with_options(window, DecodeOptions::default())
    }

    /// Creates a decoder over `window`.
    #[must_use]
    pub fn with_options(window: W, options: DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(window),
            options,
        }
    }

    /// The options this decoder was created with.
    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.pos
    }

    /// The byte under the cursor, refilling if needed. `None` at the end of
    /// input.
    pub fn peek_byte(&mut self) -> Option<u8> {
        self.cursor.peek()
    }

    /// Consumes the decoder and hands back its window.
    pub fn into_window(self) -> W {
        self.cursor.into_window()
    }

    typed_entry_points! {
        i32 => decode_i32, next_i32;
        i64 => decode_i64, next_i64;
        isize => decode_int, next_int;
        u32 => decode_u32, next_u32;
        u64 => decode_u64, next_u64;
        f64 => decode_f64, next_f64;
    }

    /// Decodes the next value into `out`. `null` leaves `out` unchanged, and
    /// so does every error.
    ///
    /// # Errors
    ///
    /// Recoverable errors leave the cursor after the offending value:
    /// - [`ErrorKind::Overflow`] when the number does not fit `T`.
    /// - [`ErrorKind::TypeMismatch`] when the value is not a number.
    /// - [`ErrorKind::LossyCoercion`] for a fraction or exponent on an integer
    ///   target with [`DecodeOptions::lossy_integer_coercion`] disabled.
    ///
    /// Fatal errors leave the cursor on the offending byte:
    /// - [`ErrorKind::MalformedNumber`] for a byte that cannot continue the number.
    /// - [`ErrorKind::UnexpectedEnd`] when the input ends before a value.
    /// - [`ErrorKind::InvalidNullLiteral`] for a broken `null`.
    /// - [`ErrorKind::InvalidValue`] when a mismatched value cannot be skipped.
    pub fn decode<T: Number>(&mut self, out: &mut T) -> Result<(), DecodeError> {
        if let Some(value) = self.next_number::<T>()? {
            *out = value;
        }
        Ok(())
    }

    /// Decodes the next value, or `None` for `null`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn next_number<T: Number>(&mut self) -> Result<Option<T>, DecodeError> {
        self.scan_next::<T>().map_err(|err| self.fail(err))
    }

    /// Skips whitespace and `,`, then skips the number at the cursor without
    /// decoding it.
    pub fn skip_number(&mut self) -> SkipOutcome {
        match self.skip_insignificant() {
            None => SkipOutcome {
                end: self.cursor.pos,
                error: Some(DecodeError::unexpected_end(self.cursor.pos)),
            },
            Some(b'-' | b'0'..=b'9') => self.cursor.skip_number(),
            Some(b) => SkipOutcome {
                end: self.cursor.pos,
                error: Some(DecodeError::malformed(b, self.cursor.pos)),
            },
        }
    }

    /// Skips whitespace and `,`, then skips one value of any kind.
    ///
    /// # Errors
    ///
    /// Fails when the value is malformed or the input ends inside it.
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        self.skip_insignificant();
        self.cursor.skip_value().map_err(|err| self.fail(err))
    }

    /// Advances past whitespace and `,`, returning the byte under the cursor.
    fn skip_insignificant(&mut self) -> Option<u8> {
        loop {
            match self.cursor.peek()? {
                b' ' | b'\n' | b'\t' | b'\r' | b',' => self.cursor.pos += 1,
                b => return Some(b),
            }
        }
    }

    fn scan_next<T: Number>(&mut self) -> Result<Option<T>, DecodeError> {
        let Some(first) = self.skip_insignificant() else {
            return Err(DecodeError::unexpected_end(self.cursor.pos));
        };
        let token_start = self.cursor.pos;
        match first {
            b'0'..=b'9' => T::scan(self, false, token_start).map(Some),
            b'-' => self.scan_signed::<T>(true).map(Some),
            b'+' if self.options.allow_leading_plus => self.scan_signed::<T>(false).map(Some),
            b'n' => {
                self.cursor.expect_literal(Literal::Null)?;
                Ok(None)
            }
            found => Err(self.mismatch(found, T::WIDTH)),
        }
    }

    fn scan_signed<T: Number>(&mut self, negative: bool) -> Result<T, DecodeError> {
        let token_start = self.cursor.pos;
        self.cursor.pos += 1;
        match self.cursor.peek() {
            Some(b) if is_digit(b) => T::scan(self, negative, token_start),
            Some(b) => Err(DecodeError::malformed(b, self.cursor.pos)),
            None => Err(DecodeError::unexpected_end(self.cursor.pos)),
        }
    }

    /// Skips the value at the cursor and reports it as a type mismatch. A
    /// failure to skip takes precedence.
    fn mismatch(&mut self, found: u8, target: Width) -> DecodeError {
        let start = self.cursor.pos;
        if let Err(err) = self.cursor.skip_value() {
            return err;
        }
        tracing::debug!(pos = start, end = self.cursor.pos, %target, "skipped mismatched value");
        DecodeError::new(
            ErrorKind::TypeMismatch {
                found: Byte(found),
                target,
            },
            start,
        )
    }

    #[inline]
    fn fail(&self, err: DecodeError) -> DecodeError {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        err
    }
}
