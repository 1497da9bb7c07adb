//! Kim decoding: the single value decoder and the buffer it reads from.

use super::*;
use crate::number::{to_code_point, to_safe_int, to_safe_number};
use bytes::{buf::FromBuf, Bytes, IntoBuf};
use num_bigint::{BigInt, BigUint};
use std::ops::Deref;

/// Decodes one value starting at `offset`.
///
/// Returns the value and the offset of the first byte after it. This is the only Kim
/// decoder; sequences and strings are decoded by calling it repeatedly.
///
/// # Errors
///
/// * [`KimError::MalformedEncoding`] if the byte at `offset` is the sentinel and it is
///   the last byte, or is followed by `0x00` or a second sentinel.
/// * [`KimError::TruncatedEncoding`] if the buffer ends before a byte with a clear
///   continuation flag, including when `offset` is at or past the end.
///
/// # Example
///
/// ```
/// use kim::encoding::decode_bigint_at;
/// use num_bigint::BigInt;
///
/// let buf = [0x81, 0x00, 0x80, 0x01];
///
/// let (first, next) = decode_bigint_at(&buf, 0).unwrap();
/// assert_eq!((first, next), (BigInt::from(128), 2));
///
/// let (second, end) = decode_bigint_at(&buf, next).unwrap();
/// assert_eq!((second, end), (BigInt::from(-1), 4));
/// ```
pub fn decode_bigint_at(buf: &[u8], offset: usize) -> Result<(BigInt, usize), KimError> {
    let negative = buf.get(offset) == Some(&SENTINEL);
    let start = if negative {
        match buf.get(offset + 1) {
            None | Some(&0) | Some(&SENTINEL) => {
                return Err(KimError::MalformedEncoding { offset });
            }
            Some(_) => offset + 1,
        }
    } else {
        offset
    };

    let (magnitude, end) = decode_magnitude(buf, start, offset)?;
    let value = BigInt::from(magnitude);
    if negative {
        Ok((-value, end))
    } else {
        Ok((value, end))
    }
}

/// Accumulates 7-bit groups from `start` up to and including the first flag-clear byte.
fn decode_magnitude(buf: &[u8], start: usize, offset: usize) -> Result<(BigUint, usize), KimError> {
    let rest = buf.get(start..).unwrap_or(&[]);
    let len = rest
        .iter()
        .position(|b| b & CONT_BIT == 0)
        .map(|last| last + 1)
        .ok_or(KimError::TruncatedEncoding { offset })?;
    let groups = &rest[..len];

    let magnitude = if len <= SMALL_GROUPS {
        BigUint::from(
            groups
                .iter()
                .fold(0u64, |acc, b| (acc << GROUP_BITS) | (b & DATA_MASK) as u64),
        )
    } else {
        let digits: Vec<u8> = groups.iter().map(|b| b & DATA_MASK).collect();
        // masked digits are always below the radix
        BigUint::from_radix_be(&digits, RADIX).ok_or(KimError::MalformedEncoding { offset })?
    };
    Ok((magnitude, start + len))
}

/// A buffer being decoded, with a read position.
///
/// Anything that implements [`IntoBuf`] is normalized to [`Bytes`] on the way in.
#[derive(Clone, Debug, Default)]
pub struct KimBytes {
    buf: Bytes,
    pos: usize,
}

impl KimBytes {
    /// Collects `bs` into a new buffer positioned at its start.
    pub fn new<B: IntoBuf>(bs: B) -> Self { KimBytes::from(Bytes::from_buf(bs)) }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize { self.pos }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool { self.pos >= self.buf.len() }
}

impl Deref for KimBytes {
    type Target = Bytes;
    fn deref(&self) -> &Bytes { &self.buf }
}

impl From<Bytes> for KimBytes {
    fn from(buf: Bytes) -> Self { KimBytes { buf, pos: 0 } }
}

impl From<Vec<u8>> for KimBytes {
    fn from(v: Vec<u8>) -> Self { KimBytes::from(Bytes::from(v)) }
}

impl<'a> From<&'a [u8]> for KimBytes {
    fn from(s: &'a [u8]) -> Self { KimBytes::from(Bytes::from(s)) }
}

/// Sources of Kim encoded values.
pub trait Deserializer {
    /// `true` when no bytes are left to decode.
    fn is_exhausted(&self) -> bool;

    /// Read the next value as a [`BigInt`].
    fn read_bigint(&mut self) -> Result<BigInt, KimError>;

    /// Read values until the source is exhausted. An exhausted source gives an empty
    /// vector.
    fn read_bigint_seq(&mut self) -> Result<Vec<BigInt>, KimError> {
        let mut out = Vec::new();
        while !self.is_exhausted() {
            out.push(self.read_bigint()?);
        }
        Ok(out)
    }

    /// Read the next value, which must be in the safe integer range.
    fn read_number(&mut self) -> Result<f64, KimError> { to_safe_number(&self.read_bigint()?) }

    /// Read the remaining values, all of which must be in the safe integer range.
    ///
    /// Every value is decoded before any is range-checked, so a malformed buffer is
    /// reported as such even if it also holds an out-of-range value.
    fn read_number_seq(&mut self) -> Result<Vec<f64>, KimError> {
        self.read_bigint_seq()?.iter().map(to_safe_number).collect()
    }

    /// Read the remaining values as the code points of a string.
    fn read_string(&mut self) -> Result<String, KimError> {
        let ints = self.read_bigint_seq()?;
        let points = ints.iter().map(to_safe_int).collect::<Result<Vec<i64>, _>>()?;
        points.into_iter().map(to_code_point).collect()
    }
}

impl Deserializer for KimBytes {
    #[inline]
    fn is_exhausted(&self) -> bool { KimBytes::is_exhausted(self) }

    #[inline]
    fn read_bigint(&mut self) -> Result<BigInt, KimError> {
        let (value, next) = decode_bigint_at(&self.buf, self.pos)?;
        self.pos = next;
        Ok(value)
    }
}
