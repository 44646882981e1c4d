//! Base-10 accumulation over a digit span.
//!
//! The accumulators work on magnitudes (`u64`) and leave sign handling to the
//! caller. Overflow detection is keyed on the digit count first: spans shorter
//! than the target's digit limit cannot overflow and take the unchecked path,
//! spans of exactly the limit are checked digit by digit, and longer spans are
//! rejected outright.

use crate::{digits::DIGITS, error::Width};

mod sealed {
    pub trait Sealed {}
}

/// Integer types a number can be decoded into.
///
/// Implemented for `i32`, `i64`, `isize`, `u32` and `u64`.
pub trait Integer: Copy + sealed::Sealed {
    /// Width reported in overflow errors.
    const WIDTH: Width;
    /// Number of decimal digits of the largest positive value.
    const MAX_DIGITS: usize;
    /// Largest magnitude of a non-negative value.
    const MAX_MAGNITUDE: u64;
    /// Largest magnitude of a negative value (`0` for unsigned types).
    const MIN_MAGNITUDE: u64;
    /// `Self::MIN` as `f64`, exact for every implementor.
    #[doc(hidden)]
    const F64_MIN: f64;
    /// `Self::MAX + 1` as `f64`; values at or above it are out of range.
    #[doc(hidden)]
    const F64_ABOVE: f64;

    /// Applies a sign to a magnitude, or `None` if the result does not fit.
    #[doc(hidden)]
    fn from_magnitude(magnitude: u64, negative: bool) -> Option<Self>;

    /// Truncates toward zero, or `None` if the result does not fit.
    #[doc(hidden)]
    fn from_f64_truncated(value: f64) -> Option<Self>;

    /// Magnitude limit for the given sign.
    #[inline]
    #[doc(hidden)]
    fn limit(negative: bool) -> u64 {
        if negative {
            Self::MIN_MAGNITUDE
        } else {
            Self::MAX_MAGNITUDE
        }
    }
}

const fn digit_count(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Whether truncating `value` toward zero lands in `min..above`. The lower
/// bound is compared as a difference: `MIN - 1.0` is not representable for
/// 64-bit targets.
#[inline]
fn in_truncation_range(value: f64, min: f64, above: f64) -> bool {
    value - min > -1.0 && value < above
}

macro_rules! impl_signed {
    ($($t:ty => $width:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Integer for $t {
            const WIDTH: Width = $width;
            const MAX_DIGITS: usize = digit_count(<$t>::MAX as u64);
            const MAX_MAGNITUDE: u64 = <$t>::MAX as u64;
            const MIN_MAGNITUDE: u64 = <$t>::MAX as u64 + 1;
            #[allow(clippy::cast_precision_loss)]
            const F64_MIN: f64 = <$t>::MIN as f64;
            #[allow(clippy::cast_precision_loss)]
            const F64_ABOVE: f64 = (<$t>::MAX as u64 + 1) as f64;

            #[inline]
            fn from_magnitude(magnitude: u64, negative: bool) -> Option<Self> {
                let wide = i128::from(magnitude);
                <$t>::try_from(if negative { -wide } else { wide }).ok()
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64_truncated(value: f64) -> Option<Self> {
                in_truncation_range(value, Self::F64_MIN, Self::F64_ABOVE).then(|| value as $t)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty => $width:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Integer for $t {
            const WIDTH: Width = $width;
            const MAX_DIGITS: usize = digit_count(<$t>::MAX as u64);
            const MAX_MAGNITUDE: u64 = <$t>::MAX as u64;
            const MIN_MAGNITUDE: u64 = 0;
            const F64_MIN: f64 = 0.0;
            #[allow(clippy::cast_precision_loss)]
            const F64_ABOVE: f64 = (<$t>::MAX as f64) + 1.0;

            #[inline]
            fn from_magnitude(magnitude: u64, negative: bool) -> Option<Self> {
                if negative && magnitude != 0 {
                    return None;
                }
                <$t>::try_from(magnitude).ok()
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn from_f64_truncated(value: f64) -> Option<Self> {
                in_truncation_range(value, Self::F64_MIN, Self::F64_ABOVE).then(|| value as $t)
            }
        }
    )*};
}

impl_signed!(i32 => Width::I32, i64 => Width::I64, isize => Width::Int);
impl_unsigned!(u32 => Width::U32, u64 => Width::U64);

/// Accumulates `digits` (ASCII digits only, non-empty) into a magnitude no
/// larger than `limit`, where `max_digits` is the digit count of `limit`.
///
/// Returns `None` on overflow.
#[inline]
pub(crate) fn accumulate(digits: &[u8], max_digits: usize, limit: u64) -> Option<u64> {
    debug_assert!(!digits.is_empty());
    debug_assert!(digits.iter().all(u8::is_ascii_digit));

    let len = digits.len();
    if len < max_digits {
        let mut val = 0u64;
        for &b in digits {
            val = val * 10 + u64::from(DIGITS[b as usize]);
        }
        Some(val)
    } else if len == max_digits {
        let max_to_multiply = limit / 10;
        let mut val = u64::from(DIGITS[digits[0] as usize]);
        for &b in &digits[1..] {
            let digit = u64::from(DIGITS[b as usize]);
            if val > max_to_multiply {
                return None;
            }
            val *= 10;
            if limit - val < digit {
                return None;
            }
            val += digit;
        }
        // The leading digit is not guarded by the loop.
        (val <= limit).then_some(val)
    } else {
        None
    }
}

/// Accumulates a magnitude within `T`'s range for the given sign.
#[inline]
pub(crate) fn accumulate_magnitude<T: Integer>(digits: &[u8], negative: bool) -> Option<u64> {
    accumulate(digits, T::MAX_DIGITS, T::limit(negative))
}

/// Accumulates `digits` and applies the sign, or `None` on overflow.
#[inline]
pub(crate) fn accumulate_integer<T: Integer>(digits: &[u8], negative: bool) -> Option<T> {
    T::from_magnitude(accumulate_magnitude::<T>(digits, negative)?, negative)
}

/// Accumulates into an unsigned 64-bit magnitude (fraction and float parts).
#[inline]
pub(crate) fn accumulate_u64(digits: &[u8]) -> Option<u64> {
    accumulate(digits, <u64 as Integer>::MAX_DIGITS, u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::{format, string::ToString};

    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;

    #[test]
    fn digit_limits() {
        assert_eq!(<i32 as Integer>::MAX_DIGITS, 10);
        assert_eq!(<u32 as Integer>::MAX_DIGITS, 10);
        assert_eq!(<i64 as Integer>::MAX_DIGITS, 19);
        assert_eq!(<u64 as Integer>::MAX_DIGITS, 20);
    }

    #[rstest]
    #[case(b"0", Some(0))]
    #[case(b"7", Some(7))]
    #[case(b"000123", Some(123))]
    #[case(b"2147483647", Some(i32::MAX))]
    #[case(b"2147483648", None)]
    #[case(b"9999999999", None)]
    #[case(b"12345678901", None)]
    fn i32_positive(#[case] digits: &[u8], #[case] expected: Option<i32>) {
        assert_eq!(accumulate_integer::<i32>(digits, false), expected);
    }

    #[rstest]
    #[case(b"2147483648", Some(i32::MIN))]
    #[case(b"2147483649", None)]
    #[case(b"1", Some(-1))]
    fn i32_negative(#[case] digits: &[u8], #[case] expected: Option<i32>) {
        assert_eq!(accumulate_integer::<i32>(digits, true), expected);
    }

    #[rstest]
    #[case(b"9223372036854775807", false, Some(i64::MAX))]
    #[case(b"9223372036854775808", false, None)]
    #[case(b"9223372036854775808", true, Some(i64::MIN))]
    #[case(b"9223372036854775809", true, None)]
    #[case(b"10000000000000000000", false, None)]
    fn i64_bounds(#[case] digits: &[u8], #[case] negative: bool, #[case] expected: Option<i64>) {
        assert_eq!(accumulate_integer::<i64>(digits, negative), expected);
    }

    #[rstest]
    #[case(b"4294967295", Some(u32::MAX))]
    #[case(b"4294967296", None)]
    #[case(b"18446744073709551615", None)]
    fn u32_bounds(#[case] digits: &[u8], #[case] expected: Option<u32>) {
        assert_eq!(accumulate_integer::<u32>(digits, false), expected);
    }

    #[rstest]
    #[case(b"18446744073709551615", Some(u64::MAX))]
    #[case(b"18446744073709551616", None)]
    #[case(b"99999999999999999999", None)]
    #[case(b"184467440737095516150", None)]
    fn u64_bounds(#[case] digits: &[u8], #[case] expected: Option<u64>) {
        assert_eq!(accumulate_integer::<u64>(digits, false), expected);
    }

    #[test]
    fn unsigned_rejects_negative_magnitudes() {
        assert_eq!(accumulate_integer::<u32>(b"5", true), None);
        assert_eq!(accumulate_integer::<u64>(b"0", true), Some(0));
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn float_truncation_ranges() {
        assert_eq!(i32::from_f64_truncated(2_147_483_647.9), Some(i32::MAX));
        assert_eq!(i32::from_f64_truncated(2_147_483_648.0), None);
        assert_eq!(i32::from_f64_truncated(-2_147_483_648.5), Some(i32::MIN));
        assert_eq!(i32::from_f64_truncated(-2_147_483_649.0), None);
        assert_eq!(u32::from_f64_truncated(-0.5), Some(0));
        assert_eq!(u32::from_f64_truncated(-1.0), None);
        assert_eq!(i64::from_f64_truncated(9_223_372_036_854_775_808.0), None);
        assert_eq!(u64::from_f64_truncated(f64::NAN), None);
        assert_eq!(i64::from_f64_truncated(-150.9), Some(-150));
        assert_eq!(i64::from_f64_truncated(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(i64::from_f64_truncated(-9_223_372_036_854_777_856.0), None);
        assert_eq!(isize::from_f64_truncated(isize::MIN as f64), Some(isize::MIN));
        assert_eq!(i64::from_f64_truncated(f64::NEG_INFINITY), None);
    }

    #[quickcheck]
    fn matches_formatted_u64(v: u64) -> bool {
        accumulate_u64(v.to_string().as_bytes()) == Some(v)
    }

    #[quickcheck]
    fn i32_accepts_exactly_its_range(v: i64) -> bool {
        let digits = format!("{}", v.unsigned_abs());
        accumulate_integer::<i32>(digits.as_bytes(), v < 0) == i32::try_from(v).ok()
    }
}
