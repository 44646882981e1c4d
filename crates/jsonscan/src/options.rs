/// Configuration options for a [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use jsonscan::{DecodeOptions, Decoder};
///
/// let options = DecodeOptions {
///     lossy_integer_coercion: false,
///     ..Default::default()
/// };
/// let mut decoder = Decoder::with_options(b"1.5".as_slice(), options);
/// let err = decoder.next_i64().unwrap_err();
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    /// Whether numbers with a fraction or an exponent may be decoded into an
    /// integer destination.
    ///
    /// When `true`, `1.9` decodes as `1` (the fraction is dropped), `1.5e2`
    /// is evaluated through an `f64` intermediate and truncated to `150`, and
    /// `15e-1` is integer-divided to `1`. These conversions lose precision for
    /// large magnitudes.
    ///
    /// When `false`, such numbers are consumed and rejected with the
    /// recoverable [`ErrorKind::LossyCoercion`](crate::ErrorKind::LossyCoercion).
    ///
    /// # Default
    ///
    /// `true`
    pub lossy_integer_coercion: bool,

    /// Whether a leading `+` sign is accepted before a number.
    ///
    /// JSON does not allow it, so by default `+1` is rejected as an invalid
    /// value.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_plus: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on decode failures.
    pub panic_on_error: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            lossy_integer_coercion: true,
            allow_leading_plus: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DecodeOptions::default();
        assert!(options.lossy_integer_coercion);
        assert!(!options.allow_leading_plus);
        assert!(!options.panic_on_error);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn roundtrips_through_json() {
        let options = DecodeOptions {
            lossy_integer_coercion: false,
            allow_leading_plus: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: DecodeOptions = serde_json::from_str(&json).unwrap();
        assert!(!back.lossy_integer_coercion);
        assert!(back.allow_leading_plus);
    }
}
