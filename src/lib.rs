//! # Kim
//!
//! Kim encoding maps signed integers of any size, integral numbers, strings, and
//! sequences of integers to compact, self-delimiting byte sequences, and back.
//!
//! # Usage
//!
//! Values are built as [`Kim`] and encoded with [`encode`](encoding::encode), or passed
//! straight to one of the typed encoders.
//!
//! ```
//! use kim::prelude::*;
//!
//! let enc = encode(&Kim::from(vec![1, -1, 128])).unwrap();
//! assert_eq!(enc, vec![0x01, 0x80, 0x01, 0x81, 0x00]);
//!
//! // no length prefix is needed, the boundaries are part of the encoding
//! let dec = decode_bigint_array(&enc).unwrap();
//! assert_eq!(dec, vec![BigInt::from(1), BigInt::from(-1), BigInt::from(128)]);
//! ```
//!
//! Decoding never guesses the type; the caller picks the decoder.
//!
//! ```
//! use kim::prelude::*;
//!
//! let enc = encode_string("héllo");
//!
//! assert_eq!(decode_string(&enc).unwrap(), "héllo");
//! // the same bytes are also five code points
//! assert_eq!(decode_number_array(&enc).unwrap().len(), 5);
//! ```
//!
//! # An overview of Kim values
//!
//! ## Integers
//!
//! [`Kim::Int`] holds a [`BigInt`]. Every primitive integer type converts into it.
//!
//! ```
//! use kim::prelude::*;
//!
//! let small = Kim::from(23u8);
//!
//! let large = Kim::from(-99999999999999999999i128);
//!
//! let very_big = Kim::from(
//!     BigInt::from_str_radix("zzzzzzzzzzzzzzzzzzzzzzzzzzzz", 36).unwrap(),
//! );
//! ```
//!
//! ## Numbers
//!
//! [`Kim::Num`] holds an `f64`. It must be integral to be encoded. Decoding as a number
//! requires the value to lie in the safe integer range
//! `[-(2^53 - 1), 2^53 - 1]`, see [`number`].
//!
//! ## Strings
//!
//! [`Kim::Str`] is encoded as its code points, one to three bytes each.
//!
//! ## Sequences
//!
//! [`Kim::Seq`] holds integers and numbers. Strings and nested sequences are rejected.
//!
//! # Specification
//!
//! This section describes the Kim binary format.
//!
//! ## Integers
//!
//! Each byte carries seven data bits, the low bits, and a continuation flag, the high
//! bit. The flag is set on every byte of a value except the last one.
//!
//! | Value    | Layout                                                     |
//! | ---      | ---                                                        |
//! | zero     | `0x00`                                                     |
//! | positive | 7-bit groups, most significant first, no leading zero group |
//! | negative | `0x80` followed by the encoding of the absolute value      |
//!
//! The sentinel `0x80` can never start the encoding of a non-negative value, since that
//! would be a leading zero group, so every integer has exactly one encoding. A sentinel
//! followed by `0x00`, by another sentinel, or by nothing at all is malformed.
//!
//! ## Sequences
//!
//! A sequence is the concatenation of its elements' encodings. Decoding reads values
//! until the buffer is used up.
//!
//! ## Strings
//!
//! A string is the sequence of its code points, each encoded as the integer it is:
//!
//! | Code point            | Bytes | Flags     |
//! | ---                   | ---   | ---       |
//! | `0x00..=0x7f`         | 1     | `0`       |
//! | `0x80..=0x3fff`       | 2     | `1, 0`    |
//! | `0x4000..=0x10ffff`   | 3     | `1, 1, 0` |

#![warn(
    missing_docs,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod encoding;
pub mod errors;
pub mod number;
pub mod prelude;

use num_bigint::BigInt;

#[derive(PartialEq, Clone, Debug)]
/// [`Kim`] and its variants.
///
/// # Example
///
/// ```
/// use kim::prelude::*;
///
/// let k = Kim::from(-5);
///
/// let val = match k {
///     Kim::Int(i) => i,
///     _ => panic!(),
/// };
///
/// assert_eq!(val, BigInt::from(-5));
/// ```
pub enum Kim {
    /// Integer of any size.
    Int(BigInt),
    /// Number. Must be integral to be encoded.
    Num(f64),
    /// String.
    Str(String),
    /// Sequence of integers and numbers.
    Seq(Vec<Kim>),
}

use Kim::*;

impl Kim {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Int(_) => "bigint",
            Num(_) => "number",
            Str(_) => "string",
            Seq(_) => "iterable",
        }
    }
}

from_fn!(Kim, BigInt, Int);
from_fn!(Kim, f64, Num);
from_as!(Kim, f32, f64);
from_fn!(Kim, String, Str);
from_fn!(Kim, &str, |s: &str| Str(s.to_string()));
from_fn!(Kim, char, |c: char| Str(c.to_string()));

macro_rules! from_ints {
    ($($t:ty),*) => {
        $(from_fn!(Kim, $t, |i: $t| Int(BigInt::from(i)));)*
    };
}

from_ints!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Into<Kim>> From<Vec<T>> for Kim {
    fn from(v: Vec<T>) -> Kim { Seq(v.into_iter().map(Into::into).collect()) }
}
