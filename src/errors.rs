//! Errors raised by the Kim encoders and decoders.

use failure::Fail;
use num_bigint::BigInt;

/// Coarse classification of a [`KimError`], for callers that only care which rule was
/// broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value handed to an encoder cannot be Kim encoded.
    InvalidArgument,
    /// A range-checked decode produced a value outside the safe integer range.
    OutOfRange,
    /// The buffer ended before a byte with a clear continuation flag.
    TruncatedEncoding,
    /// A sentinel byte was not followed by the start of a positive magnitude.
    MalformedEncoding,
    /// A decoded value is not a Unicode scalar value.
    InvalidCodePoint,
}

#[derive(Clone, Debug, PartialEq, Fail)]
/// An error encountered while encoding or decoding.
pub enum KimError {
    /// Wrong input to an encoder: a non-integral number, a non-numeric sequence element.
    #[fail(display = "{}, received {}", expected, received)]
    InvalidArgument {
        /// What the encoder accepts.
        expected: &'static str,
        /// Description of the value that was passed in.
        received: String,
    },
    /// Decoded magnitude does not fit in the safe integer range.
    #[fail(
        display = "value {} is outside safe integer range [{}, {}]",
        value, min, max
    )]
    OutOfRange {
        /// The decoded value.
        value: BigInt,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// The value starting at `offset` runs past the end of the buffer.
    #[fail(display = "incomplete Kim sequence starting at byte {}", offset)]
    TruncatedEncoding {
        /// Offset of the first byte of the unfinished value.
        offset: usize,
    },
    /// The sentinel at `offset` is at the end of the buffer, or is followed by `0x00` or
    /// another sentinel.
    #[fail(display = "invalid negative Kim encoding at byte {}", offset)]
    MalformedEncoding {
        /// Offset of the sentinel byte.
        offset: usize,
    },
    /// A value decoded as part of a string is not a valid code point.
    #[fail(display = "value {} is not a valid code point", value)]
    InvalidCodePoint {
        /// The decoded value.
        value: i64,
    },
}

impl KimError {
    /// The [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KimError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            KimError::OutOfRange { .. } => ErrorKind::OutOfRange,
            KimError::TruncatedEncoding { .. } => ErrorKind::TruncatedEncoding,
            KimError::MalformedEncoding { .. } => ErrorKind::MalformedEncoding,
            KimError::InvalidCodePoint { .. } => ErrorKind::InvalidCodePoint,
        }
    }

    pub(crate) fn invalid_argument<S: Into<String>>(expected: &'static str, received: S) -> Self {
        KimError::InvalidArgument {
            expected,
            received: received.into(),
        }
    }
}
