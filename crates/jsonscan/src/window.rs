//! Byte windows: the input abstraction the scanners read from.
//!
//! A [`Window`] exposes the bytes that are valid so far and a way to ask for
//! more. Windows only ever grow: a byte at index `i` keeps its index and value
//! once it has become valid, so scanners remember token boundaries as plain
//! offsets and read digits back without copying them.
//!
//! Invariants
//! - `bytes()` after a successful `refill()` is at least as long as before,
//!   and its prefix is unchanged.
//! - After `refill()` returns `false` no more bytes will ever appear.
//!
//! The scanners never assume a refill produced enough bytes; every read goes
//! through [`Cursor::byte_at`], which retries until the requested index is
//! valid or the window is exhausted.

#[cfg(feature = "std")]
use std::{io, vec::Vec};

/// A growable view of input bytes.
pub trait Window {
    /// The bytes that are currently valid.
    fn bytes(&self) -> &[u8];

    /// Attempts to extend [`bytes`](Window::bytes). Returns `false` once the
    /// input is exhausted.
    fn refill(&mut self) -> bool;
}

impl Window for &[u8] {
    #[inline]
    fn bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn refill(&mut self) -> bool {
        false
    }
}

impl<W: Window + ?Sized> Window for &mut W {
    #[inline]
    fn bytes(&self) -> &[u8] {
        (**self).bytes()
    }

    #[inline]
    fn refill(&mut self) -> bool {
        (**self).refill()
    }
}

/// A window over caller-owned memory that reveals it `chunk` bytes at a time.
///
/// Useful to drive the decoder the way a socket or file would, with token
/// boundaries falling anywhere.
///
/// ```rust
/// use jsonscan::{ChunkedWindow, Decoder};
///
/// let mut decoder = Decoder::new(ChunkedWindow::new(b"123456, 7]", 2));
/// assert_eq!(decoder.next_i32(), Ok(Some(123_456)));
/// assert_eq!(decoder.next_i32(), Ok(Some(7)));
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedWindow<'a> {
    data: &'a [u8],
    valid: usize,
    chunk: usize,
}

impl<'a> ChunkedWindow<'a> {
    /// Creates a window with no bytes valid yet.
    ///
    /// # Panics
    ///
    /// Panics if `chunk` is zero.
    #[must_use]
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        assert!(chunk > 0, "chunk size must be non-zero");
        Self {
            data,
            valid: 0,
            chunk,
        }
    }
}

impl Window for ChunkedWindow<'_> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.data[..self.valid]
    }

    fn refill(&mut self) -> bool {
        if self.valid == self.data.len() {
            return false;
        }
        self.valid = core::cmp::min(self.valid + self.chunk, self.data.len());
        tracing::trace!(valid = self.valid, "chunked window refilled");
        true
    }
}

/// Default number of bytes requested from the reader per refill.
#[cfg(feature = "std")]
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// A window filled from a [`std::io::Read`] source.
///
/// Bytes are appended to an owned buffer and never discarded while the
/// window lives. An I/O error ends the input; it can be retrieved with
/// [`ReaderWindow::take_error`].
///
/// # Memory
///
/// Offsets into a [`Window`] stay valid for its whole life, so the buffer
/// holds every byte read so far and grows with the stream. Long-lived
/// streams should be split into documents upstream, with one window per
/// document.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReaderWindow<R> {
    reader: R,
    buf: Vec<u8>,
    read_size: usize,
    exhausted: bool,
    error: Option<io::Error>,
}

#[cfg(feature = "std")]
impl<R: io::Read> ReaderWindow<R> {
    /// Creates a window reading [`DEFAULT_READ_SIZE`] bytes per refill.
    pub fn new(reader: R) -> Self {
        Self::with_read_size(reader, DEFAULT_READ_SIZE)
    }

    /// Creates a window reading at most `read_size` bytes per refill.
    ///
    /// # Panics
    ///
    /// Panics if `read_size` is zero.
    pub fn with_read_size(reader: R, read_size: usize) -> Self {
        assert!(read_size > 0, "read size must be non-zero");
        Self {
            reader,
            buf: Vec::new(),
            read_size,
            exhausted: false,
            error: None,
        }
    }

    /// Returns the I/O error that ended the input, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(feature = "std")]
impl<R: io::Read> Window for ReaderWindow<R> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.buf
    }

    fn refill(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let old_len = self.buf.len();
        self.buf.resize(old_len + self.read_size, 0);
        loop {
            match self.reader.read(&mut self.buf[old_len..]) {
                Ok(0) => {
                    self.buf.truncate(old_len);
                    self.exhausted = true;
                    tracing::trace!(valid = old_len, "reader exhausted");
                    return false;
                }
                Ok(n) => {
                    self.buf.truncate(old_len + n);
                    tracing::trace!(read = n, valid = self.buf.len(), "reader window refilled");
                    return true;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.buf.truncate(old_len);
                    self.exhausted = true;
                    tracing::warn!(error = %e, "reader failed, treating input as exhausted");
                    self.error = Some(e);
                    return false;
                }
            }
        }
    }
}

/// Forward-only read position over a [`Window`].
#[derive(Debug)]
pub(crate) struct Cursor<W> {
    window: W,
    pub(crate) pos: usize,
}

impl<W: Window> Cursor<W> {
    pub(crate) fn new(window: W) -> Self {
        Self { window, pos: 0 }
    }

    pub(crate) fn into_window(self) -> W {
        self.window
    }

    /// Returns the byte at `index`, refilling as often as needed. `None`
    /// means the input ends before `index`.
    #[inline]
    pub(crate) fn byte_at(&mut self, index: usize) -> Option<u8> {
        loop {
            if let Some(&b) = self.window.bytes().get(index) {
                return Some(b);
            }
            if !self.window.refill() {
                return None;
            }
        }
    }

    #[inline]
    pub(crate) fn peek(&mut self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// The already-validated bytes `start..=end`.
    #[inline]
    pub(crate) fn span(&self, start: usize, end: usize) -> &[u8] {
        &self.window.bytes()[start..=end]
    }
}
