//! Kim encoding: byte sinks and the values that can be written to them.

use super::*;
use crate::{number::integral_to_bigint, util::*};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

/// A sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

/// Kim encoders for any [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a non-negative magnitude, most significant group first.
    ///
    /// # Arguments
    ///
    /// * `u: u64` - The magnitude to be added.
    fn put_u64(&mut self, u: u64);
    /// Add an [`i64`], prefixed with the sentinel if negative.
    ///
    /// # Arguments
    ///
    /// * `i: i64` - The value to be added.
    fn put_i64(&mut self, i: i64);
    /// Add a [`BigInt`], prefixed with the sentinel if negative.
    ///
    /// # Arguments
    ///
    /// * `i: &BigInt` - The value to be added.
    fn put_bigint(&mut self, i: &BigInt);
    /// Add a single code point using one to three bytes.
    ///
    /// # Arguments
    ///
    /// * `c: char` - The code point to be added.
    fn put_code_point(&mut self, c: char);
    /// Add every code point of a string, in order.
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The string to be added.
    fn put_str(&mut self, s: &str);
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

/// Writes big-endian digits, setting the continuation flag on all but the last.
#[inline]
fn put_groups<S: Serializer + ?Sized, I: ExactSizeIterator<Item = u8>>(out: &mut S, groups: I) {
    let last = groups.len() - 1;
    for (i, group) in groups.enumerate() {
        if i < last {
            out.put_u8(group | CONT_BIT);
        } else {
            out.put_u8(group);
        }
    }
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_u64(&mut self, u: u64) {
        let groups = u64_to_groups(u);
        put_groups(self, groups.iter().rev().cloned());
    }

    #[inline]
    fn put_i64(&mut self, i: i64) {
        if i < 0 {
            self.put_u8(SENTINEL);
        }
        self.put_u64(i.unsigned_abs());
    }

    fn put_bigint(&mut self, i: &BigInt) {
        if let Some(small) = i.to_i64() {
            return self.put_i64(small);
        }
        let (sign, mut digits) = i.to_radix_be(RADIX);
        if sign == Sign::Minus {
            self.put_u8(SENTINEL);
        }
        if let Some((_, init)) = digits.split_last_mut() {
            for d in init {
                *d |= CONT_BIT;
            }
        }
        self.put_slice(&digits);
    }

    #[inline]
    fn put_code_point(&mut self, c: char) {
        let cp = c as u32;
        if cp <= ONE_BYTE_MAX {
            self.put_u8(cp as u8);
        } else if cp <= TWO_BYTE_MAX {
            self.put_u8(CONT_BIT | (cp >> 7) as u8);
            self.put_u8(cp as u8 & DATA_MASK);
        } else {
            self.put_u8(CONT_BIT | (cp >> 14) as u8);
            self.put_u8(CONT_BIT | ((cp >> 7) as u8 & DATA_MASK));
            self.put_u8(cp as u8 & DATA_MASK);
        }
    }

    fn put_str(&mut self, s: &str) {
        for c in s.chars() {
            self.put_code_point(c);
        }
    }
}

/// Encoded length of a [`BigInt`], without encoding it.
pub fn bigint_len(i: &BigInt) -> usize {
    group_count(i.bits()) + (i.sign() == Sign::Minus) as usize
}

/// Encoded length of an [`i64`], without encoding it.
pub fn i64_len(i: i64) -> usize {
    let magnitude = i.unsigned_abs();
    group_count(64 - magnitude.leading_zeros() as usize) + (i < 0) as usize
}

/// Encoded length of a code point: 1, 2 or 3.
pub fn code_point_len(c: char) -> usize {
    match c as u32 {
        0..=ONE_BYTE_MAX => 1,
        cp if cp <= TWO_BYTE_MAX => 2,
        _ => 3,
    }
}

/// A value that can be Kim encoded.
pub trait Ser {
    /// Write the encoding of `self` to `s`.
    ///
    /// # Errors
    ///
    /// Fails with [`KimError::InvalidArgument`] when `self` has no encoding. Nothing is
    /// written in that case.
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError>;

    /// The exact number of bytes [`Ser::ser`] writes. Fails exactly when [`Ser::ser`]
    /// would.
    fn encoded_len(&self) -> Result<usize, KimError>;
}

impl Ser for BigInt {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        s.put_bigint(self);
        Ok(())
    }

    fn encoded_len(&self) -> Result<usize, KimError> { Ok(bigint_len(self)) }
}

impl Ser for i64 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        s.put_i64(*self);
        Ok(())
    }

    fn encoded_len(&self) -> Result<usize, KimError> { Ok(i64_len(*self)) }
}

impl Ser for f64 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        let i = integral_to_bigint(*self)?;
        s.put_bigint(&i);
        Ok(())
    }

    fn encoded_len(&self) -> Result<usize, KimError> {
        integral_to_bigint(*self).map(|i| bigint_len(&i))
    }
}

impl Ser for char {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        s.put_code_point(*self);
        Ok(())
    }

    fn encoded_len(&self) -> Result<usize, KimError> { Ok(code_point_len(*self)) }
}

impl Ser for str {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        s.put_str(self);
        Ok(())
    }

    fn encoded_len(&self) -> Result<usize, KimError> { Ok(self.chars().map(code_point_len).sum()) }
}

/// Rejects sequence elements that are not numeric.
fn numeric_element(k: &Kim) -> Result<&Kim, KimError> {
    match k {
        Int(_) | Num(_) => Ok(k),
        other => Err(KimError::invalid_argument(
            "iterable value must be a bigint or number",
            other.type_name(),
        )),
    }
}

impl Ser for Kim {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), KimError> {
        match self {
            Int(i) => i.ser(s),
            Num(f) => f.ser(s),
            Str(st) => st.as_str().ser(s),
            Seq(items) => {
                // validate everything first so a bad element writes nothing
                for item in items {
                    numeric_element(item)?;
                }
                for item in items {
                    item.ser(s)?;
                }
                Ok(())
            }
        }
    }

    fn encoded_len(&self) -> Result<usize, KimError> {
        match self {
            Int(i) => i.encoded_len(),
            Num(f) => f.encoded_len(),
            Str(st) => st.as_str().encoded_len(),
            Seq(items) => items.iter().try_fold(0, |acc, item| -> Result<usize, KimError> {
                Ok(acc + numeric_element(item)?.encoded_len()?)
            }),
        }
    }
}
