mod property_chunking;

use crate::{ChunkedWindow, DecodeError, DecodeOptions, Decoder, Number};

fn panicking_options() -> DecodeOptions {
    DecodeOptions {
        panic_on_error: true,
        ..Default::default()
    }
}

/// Decodes one value from `input` revealed `chunk` bytes at a time, returning
/// the value and the final cursor position.
fn decode_chunked<T: Number>(
    input: &[u8],
    chunk: usize,
) -> (Result<Option<T>, DecodeError>, usize) {
    let mut decoder = Decoder::new(ChunkedWindow::new(input, chunk));
    let result = decoder.next_number::<T>();
    (result, decoder.position())
}
