//! # Kim binary encoder and decoder
//!
//! Encode and decode functions for Kim.
//!
//! # Example
//!
//! ```
//! use kim::prelude::*;
//!
//! // a few values of different types
//! let big = BigInt::from(u64::max_value()) * BigInt::from(1000);
//! let text = "naïve 🙂";
//!
//! // encode them directly
//! let enc_big = encode_bigint(&big);
//! let enc_text = encode_string(text);
//!
//! // or through the dynamically typed entry point
//! assert_eq!(encode(&Kim::from(big.clone())).unwrap(), enc_big);
//! assert_eq!(encode(&Kim::from(text)).unwrap(), enc_text);
//!
//! // Note: decoding returns a `Result`
//! assert_eq!(decode_bigint(&enc_big).unwrap(), big);
//! assert_eq!(decode_string(&enc_text).unwrap(), text);
//!
//! // the big value does not fit in an f64 without rounding
//! assert!(decode_number(&enc_big).is_err());
//! ```

use crate::Kim::{self, *};
use bytes::IntoBuf;
use num_bigint::BigInt;
use num_traits::Zero;
use tracing::{debug, trace};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub mod constants;
pub use crate::errors::{ErrorKind, KimError};
use constants::*;

/// Logs a failed decode before handing the result back.
fn logged<T>(res: Result<T, KimError>) -> Result<T, KimError> {
    if let Err(e) = &res {
        debug!(error = %e, kind = ?e.kind(), "Kim decode failed");
    }
    res
}

/// Encodes `t`, sizing the output exactly before anything is written.
///
/// # Errors
///
/// Fails, without allocating the output, if `t` has no encoding.
pub fn encode_full<T: Ser + ?Sized>(t: &T) -> Result<Vec<u8>, KimError> {
    let len = t.encoded_len()?;
    let mut out = Vec::with_capacity(len);
    t.ser(&mut out)?;
    debug_assert_eq!(out.len(), len);
    Ok(out.finalize())
}

/// Encodes a [`Kim`] value, dispatching on its variant.
///
/// * [`Kim::Int`] is encoded as a signed integer.
/// * [`Kim::Num`] must be integral, and is then encoded as the integer it equals.
/// * [`Kim::Str`] is encoded code point by code point.
/// * [`Kim::Seq`] is the concatenation of its elements, which must be `Int` or `Num`.
///
/// # Errors
///
/// [`KimError::InvalidArgument`] for a non-integral number or a non-numeric sequence
/// element. The whole encode is abandoned.
///
/// # Example
///
/// ```
/// use kim::prelude::*;
///
/// assert_eq!(encode(&Kim::from(128)).unwrap(), vec![0x81, 0x00]);
/// assert_eq!(encode(&Kim::from(vec![1, 2])).unwrap(), vec![0x01, 0x02]);
/// assert!(encode(&Kim::from(1.5)).is_err());
/// ```
pub fn encode(k: &Kim) -> Result<Vec<u8>, KimError> {
    trace!(kind = k.type_name(), "encoding Kim value");
    encode_full(k)
}

/// Encodes a [`BigInt`]. Every integer has exactly one encoding.
///
/// # Example
///
/// ```
/// use kim::prelude::*;
///
/// assert_eq!(encode_bigint(&BigInt::from(0)), vec![0x00]);
/// assert_eq!(encode_bigint(&BigInt::from(-1)), vec![0x80, 0x01]);
/// ```
pub fn encode_bigint(i: &BigInt) -> Vec<u8> {
    let mut out = Vec::with_capacity(bigint_len(i));
    out.put_bigint(i);
    out
}

/// Encodes an integral `f64` as the integer it equals.
///
/// # Errors
///
/// [`KimError::InvalidArgument`] if `f` is `NaN`, infinite, or has a fractional part.
pub fn encode_number(f: f64) -> Result<Vec<u8>, KimError> { encode_full(&f) }

/// Encodes a string as the concatenation of its code points' encodings.
pub fn encode_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    out.put_str(s);
    out
}

/// Encodes a sequence of integers or numbers as the concatenation of their encodings.
///
/// # Errors
///
/// [`KimError::InvalidArgument`] if any element is not an integer or integral number.
pub fn encode_iterable<I, T>(items: I) -> Result<Vec<u8>, KimError>
where
    I: IntoIterator<Item = T>,
    T: Into<Kim>,
{
    encode_full(&Kim::Seq(items.into_iter().map(Into::into).collect()))
}

/// Decodes the first value in `bs` as a [`BigInt`].
///
/// An empty buffer decodes to zero. Bytes after the first value are ignored.
///
/// # Arguments
///
/// * `bs` - A buffer containing Kim encoded data.
pub fn decode_bigint<B: IntoBuf>(bs: B) -> Result<BigInt, KimError> {
    let mut data = KimBytes::new(bs);
    if data.is_empty() {
        return Ok(BigInt::zero());
    }
    logged(data.read_bigint())
}

/// Decodes every value in `bs`. An empty buffer gives an empty vector.
pub fn decode_bigint_array<B: IntoBuf>(bs: B) -> Result<Vec<BigInt>, KimError> {
    logged(KimBytes::new(bs).read_bigint_seq())
}

/// Like [`decode_bigint`], but the value must be in the safe integer range.
///
/// # Errors
///
/// [`KimError::OutOfRange`] if the value is outside
/// [`MIN_SAFE_INTEGER`](crate::number::MIN_SAFE_INTEGER)..=[`MAX_SAFE_INTEGER`](crate::number::MAX_SAFE_INTEGER),
/// as well as any error from [`decode_bigint`].
pub fn decode_number<B: IntoBuf>(bs: B) -> Result<f64, KimError> {
    let i = decode_bigint(bs)?;
    logged(crate::number::to_safe_number(&i))
}

/// Like [`decode_bigint_array`], but every value must be in the safe integer range.
pub fn decode_number_array<B: IntoBuf>(bs: B) -> Result<Vec<f64>, KimError> {
    logged(KimBytes::new(bs).read_number_seq())
}

/// Decodes a string from the code points encoded in `bs`.
///
/// # Errors
///
/// Any error from [`decode_number_array`], or [`KimError::InvalidCodePoint`] if a value is
/// negative, a surrogate, or above `0x10FFFF`.
pub fn decode_string<B: IntoBuf>(bs: B) -> Result<String, KimError> {
    logged(KimBytes::new(bs).read_string())
}

/// Encoded length of a [`BigInt`].
pub fn encoded_len(i: &BigInt) -> usize { bigint_len(i) }

/// Encoded length of a single code point.
pub fn encoded_code_point_len(c: char) -> usize { code_point_len(c) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};
    use bytes::Bytes;

    #[test]
    fn known_vectors() {
        assert_eq!(encode(&Kim::from(0)).unwrap(), vec![0x00]);
        assert_eq!(encode(&Kim::from(127)).unwrap(), vec![0x7f]);
        assert_eq!(encode(&Kim::from(128)).unwrap(), vec![0x81, 0x00]);
        assert_eq!(encode(&Kim::from(-1)).unwrap(), vec![0x80, 0x01]);
        assert_eq!(encode(&Kim::from("A")).unwrap(), vec![0x41]);
        assert_eq!(encode(&Kim::from(vec![1, 2])).unwrap(), vec![0x01, 0x02]);
    }

    #[test]
    fn group_boundaries() {
        let cases: &[(i64, &[u8])] = &[
            (1, &[0x01]),
            (-127, &[0x80, 0x7f]),
            (-128, &[0x80, 0x81, 0x00]),
            (300, &[0x82, 0x2c]),
            (16_383, &[0xff, 0x7f]),
            (16_384, &[0x81, 0x80, 0x00]),
            (-16_384, &[0x80, 0x81, 0x80, 0x00]),
        ];
        for (n, bytes) in cases {
            assert_eq!(encode_bigint(&BigInt::from(*n)), bytes.to_vec(), "encoding {}", n);
            assert_eq!(decode_bigint(*bytes).unwrap(), BigInt::from(*n), "decoding {}", n);
        }
    }

    #[test]
    fn sign_only_adds_sentinel() {
        for n in &[1i64, 127, 128, 99_999, MAX_SAFE_INTEGER, i64::max_value()] {
            let pos = encode_bigint(&BigInt::from(*n));
            let neg = encode_bigint(&BigInt::from(-*n));
            assert_eq!(neg[0], SENTINEL);
            assert_eq!(neg[1..], pos[..]);
            assert_ne!(pos[0], SENTINEL);
        }
    }

    #[test]
    fn numbers() {
        assert_eq!(encode_number(128.0).unwrap(), vec![0x81, 0x00]);
        assert_eq!(encode_number(-0.0).unwrap(), vec![0x00]);
        assert_eq!(
            encode_number(1e300).unwrap(),
            encode_bigint(&crate::number::integral_to_bigint(1e300).unwrap())
        );

        let err = encode_number(0.1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(encode(&Kim::from(std::f64::NAN)).is_err());
    }

    #[test]
    fn iterables() {
        assert_eq!(encode_iterable(Vec::<i64>::new()).unwrap(), Vec::<u8>::new());
        assert_eq!(
            encode_iterable(vec![Kim::from(-1), Kim::from(128.0), Kim::from(0)]).unwrap(),
            vec![0x80, 0x01, 0x81, 0x00, 0x00]
        );

        let err = encode_iterable(vec![Kim::from(1), Kim::from(2.5)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = encode_iterable(vec![Kim::from(1), Kim::from("x")]).unwrap_err();
        assert_eq!(
            err,
            KimError::InvalidArgument {
                expected: "iterable value must be a bigint or number",
                received: "string".to_string(),
            }
        );

        let nested = Kim::from(vec![Kim::from(vec![1])]);
        assert_eq!(encode(&nested).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    const EMPTY: &[u8] = &[];

    #[test]
    fn empty_buffers() {
        assert_eq!(decode_bigint(EMPTY).unwrap(), BigInt::from(0));
        assert_eq!(decode_number(EMPTY).unwrap(), 0.0);
        assert!(decode_bigint_array(EMPTY).unwrap().is_empty());
        assert!(decode_number_array(EMPTY).unwrap().is_empty());
        assert_eq!(decode_string(EMPTY).unwrap(), "");
        assert!(encode_string("").is_empty());
    }

    #[test]
    fn trailing_bytes_ignored_by_single_decode() {
        let buf: &[u8] = &[0x01, 0x81];
        assert_eq!(decode_bigint(buf).unwrap(), BigInt::from(1));
        assert_eq!(
            decode_bigint_array(buf).unwrap_err().kind(),
            ErrorKind::TruncatedEncoding
        );
    }

    #[test]
    fn malformed() {
        let bad: &[&[u8]] = &[&[0x80], &[0x80, 0x00], &[0x80, 0x80], &[0x80, 0x80, 0x01]];
        for buf in bad {
            assert_eq!(decode_bigint(*buf).unwrap_err().kind(), ErrorKind::MalformedEncoding);
            assert_eq!(
                decode_bigint_array(*buf).unwrap_err().kind(),
                ErrorKind::MalformedEncoding
            );
        }
        let buf: &[u8] = &[0x01, 0x80];
        assert_eq!(
            decode_bigint_array(buf).unwrap_err(),
            KimError::MalformedEncoding { offset: 1 }
        );
    }

    #[test]
    fn range_enforcement() {
        let over = BigInt::from(MAX_SAFE_INTEGER) + BigInt::from(1);
        let enc = encode_bigint(&over);

        assert_eq!(decode_bigint(&enc).unwrap(), over);
        assert_eq!(decode_number(&enc).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(decode_number_array(&enc).unwrap_err().kind(), ErrorKind::OutOfRange);

        let under = encode_bigint(&BigInt::from(MIN_SAFE_INTEGER));
        assert_eq!(decode_number(&under).unwrap(), MIN_SAFE_INTEGER as f64);
    }

    #[test]
    fn strings() {
        let s = "A\u{e9}\u{4e2d}\u{1F600}";
        let enc = encode_string(s);
        assert_eq!(
            enc,
            vec![0x41, 0x81, 0x69, 0x81, 0x9c, 0x2d, 0x87, 0xec, 0x00]
        );
        assert_eq!(decode_string(&enc).unwrap(), s);
        assert_eq!(
            decode_number_array(&enc).unwrap(),
            vec![65.0, 233.0, 20_013.0, 128_512.0]
        );

        // lone surrogates have no `char`
        let surrogate = encode_bigint(&BigInt::from(0xd800));
        assert_eq!(
            decode_string(&surrogate).unwrap_err(),
            KimError::InvalidCodePoint { value: 0xd800 }
        );
    }

    #[test]
    fn accepts_any_buffer() {
        let enc = encode_bigint(&BigInt::from(-300));
        let expected = BigInt::from(-300);

        assert_eq!(decode_bigint(&enc).unwrap(), expected);
        assert_eq!(decode_bigint(&enc[..]).unwrap(), expected);
        assert_eq!(decode_bigint(Bytes::from(enc.clone())).unwrap(), expected);
        assert_eq!(decode_bigint(enc).unwrap(), expected);
    }

    #[test]
    fn lengths() {
        assert_eq!(encoded_len(&BigInt::from(0)), 1);
        assert_eq!(encoded_len(&BigInt::from(-128)), 3);
        assert_eq!(encoded_code_point_len('\u{4000}'), 3);
    }
}
