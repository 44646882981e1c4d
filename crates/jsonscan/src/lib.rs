//! Streaming, allocation-free decoding of JSON numbers into `i32`, `i64`,
//! `isize`, `u32`, `u64` and `f64`.
//!
//! A [`Decoder`] reads from a [`Window`], a growable view of the input that
//! can be refilled while a token is being scanned. Numeric tokens are located
//! by their boundaries and accumulated straight from the window's bytes; they
//! are never copied into an intermediate string.
//!
//! ```rust
//! use jsonscan::{ChunkedWindow, Decoder, ErrorKind, Width};
//!
//! let mut decoder = Decoder::new(ChunkedWindow::new(b"4294967296, 7", 3));
//! let err = decoder.next_u32().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Overflow(Width::U32));
//! assert!(err.is_recoverable());
//! assert_eq!(decoder.next_u32(), Ok(Some(7)));
//! ```

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

mod accumulate;
mod decoder;
mod digits;
mod error;
mod exponent;
mod float;
mod integer;
mod literal;
mod options;
mod skip;
mod token;
mod window;

#[cfg(test)]
mod tests;

pub use accumulate::Integer;
pub use decoder::{Decoder, Number};
pub use error::{Byte, DecodeError, ErrorKind, Severity, Width};
pub use options::DecodeOptions;
pub use skip::SkipOutcome;
#[cfg(feature = "std")]
pub use window::{DEFAULT_READ_SIZE, ReaderWindow};
pub use window::{ChunkedWindow, Window};
