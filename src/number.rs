//! Conversions between [`BigInt`], `f64` and code points.
//!
//! A "number" is an `f64` holding an integer. Only integers in
//! `[MIN_SAFE_INTEGER, MAX_SAFE_INTEGER]` survive the trip through `f64` unchanged, so
//! range-checked decodes reject anything outside of it.

use crate::errors::KimError;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

/// Largest integer `n` such that every integer in `[-n, n]` is exactly representable as an
/// `f64`, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Smallest safe integer, `-(2^53 - 1)`.
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// Returns `true` when `f` is finite and has no fractional part.
pub fn is_integral(f: f64) -> bool { f.is_finite() && f.fract() == 0.0 }

/// Converts an integral `f64` to a [`BigInt`] without loss.
///
/// Values beyond the safe range are accepted as long as they are integral; every finite
/// `f64` of that magnitude is an integer and converts exactly.
///
/// # Errors
///
/// Returns [`KimError::InvalidArgument`] for `NaN`, infinities and values with a fractional
/// part.
///
/// # Example
///
/// ```
/// use kim::number::integral_to_bigint;
/// use num_bigint::BigInt;
///
/// assert_eq!(integral_to_bigint(-3.0).unwrap(), BigInt::from(-3));
/// assert!(integral_to_bigint(0.5).is_err());
/// ```
pub fn integral_to_bigint(f: f64) -> Result<BigInt, KimError> {
    if !is_integral(f) {
        return Err(KimError::invalid_argument(
            "number value must be an integer",
            f.to_string(),
        ));
    }
    BigInt::from_f64(f)
        .ok_or_else(|| KimError::invalid_argument("number value must be an integer", f.to_string()))
}

/// Narrows a [`BigInt`] to an `i64` inside the safe integer range.
///
/// # Errors
///
/// Returns [`KimError::OutOfRange`] carrying the value and both bounds.
pub fn to_safe_int(i: &BigInt) -> Result<i64, KimError> {
    match i.to_i64() {
        Some(n) if MIN_SAFE_INTEGER <= n && n <= MAX_SAFE_INTEGER => Ok(n),
        _ => Err(KimError::OutOfRange {
            value: i.clone(),
            min: MIN_SAFE_INTEGER,
            max: MAX_SAFE_INTEGER,
        }),
    }
}

/// Like [`to_safe_int`], but produces the `f64` the value is exactly equal to.
pub fn to_safe_number(i: &BigInt) -> Result<f64, KimError> { to_safe_int(i).map(|n| n as f64) }

/// Interprets a safe integer as a code point.
///
/// # Errors
///
/// Negative values, surrogates (`0xD800..=0xDFFF`) and values above `0x10FFFF` give
/// [`KimError::InvalidCodePoint`].
pub fn to_code_point(n: i64) -> Result<char, KimError> {
    n.to_u32()
        .and_then(std::char::from_u32)
        .ok_or(KimError::InvalidCodePoint { value: n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn safe_bounds_match_f64_precision() {
        assert_eq!(MAX_SAFE_INTEGER, 9_007_199_254_740_991);
        assert_eq!(MAX_SAFE_INTEGER as f64 + 1.0, 9_007_199_254_740_992f64);
        // one past the bound is where f64 starts skipping integers
        assert_eq!(
            (MAX_SAFE_INTEGER as f64 + 2.0) as i64,
            MAX_SAFE_INTEGER + 1
        );
    }

    #[test]
    fn integral_numbers() {
        assert_eq!(integral_to_bigint(0.0).unwrap(), BigInt::from(0));
        assert_eq!(integral_to_bigint(-0.0).unwrap(), BigInt::from(0));
        assert_eq!(integral_to_bigint(128.0).unwrap(), BigInt::from(128));
        assert_eq!(
            integral_to_bigint(1e20).unwrap(),
            BigInt::from(100_000_000_000_000_000_000u128)
        );

        for bad in &[0.5, -1.25, std::f64::NAN, std::f64::INFINITY, std::f64::NEG_INFINITY] {
            let err = integral_to_bigint(*bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn safe_range() {
        assert_eq!(to_safe_int(&BigInt::from(MAX_SAFE_INTEGER)).unwrap(), MAX_SAFE_INTEGER);
        assert_eq!(to_safe_int(&BigInt::from(MIN_SAFE_INTEGER)).unwrap(), MIN_SAFE_INTEGER);

        let err = to_safe_int(&BigInt::from(MAX_SAFE_INTEGER + 1)).unwrap_err();
        assert_eq!(
            err,
            KimError::OutOfRange {
                value: BigInt::from(MAX_SAFE_INTEGER + 1),
                min: MIN_SAFE_INTEGER,
                max: MAX_SAFE_INTEGER,
            }
        );
        assert!(to_safe_int(&(BigInt::from(u64::max_value()) * BigInt::from(4))).is_err());
        assert_eq!(to_safe_number(&BigInt::from(-7)).unwrap(), -7.0);
    }

    #[test]
    fn code_points() {
        assert_eq!(to_code_point(0x41).unwrap(), 'A');
        assert_eq!(to_code_point(0x1F600).unwrap(), '\u{1F600}');
        assert_eq!(to_code_point(0x10FFFF).unwrap(), '\u{10FFFF}');

        for bad in &[-1, 0xD800, 0xDFFF, 0x110000] {
            assert_eq!(
                to_code_point(*bad).unwrap_err(),
                KimError::InvalidCodePoint { value: *bad }
            );
        }
    }
}
