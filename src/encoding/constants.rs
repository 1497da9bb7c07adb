//! Constants of the Kim wire format.

/// Continuation flag, 0x80. Set on every byte of a value except the last.
pub const CONT_BIT: u8 = 0b1000_0000;
/// Data bits of an encoded byte, 0x7f
pub const DATA_MASK: u8 = 0b0111_1111;
/// Data bits carried by one byte.
pub const GROUP_BITS: usize = 7;
/// Radix of the digits.
pub(crate) const RADIX: u32 = 1 << GROUP_BITS;

/// Prefix marking a negative value, 0x80: flag set, no data bits.
pub const SENTINEL: u8 = CONT_BIT;

/// Largest code point encoded in one byte.
pub const ONE_BYTE_MAX: u32 = 0x7f;
/// Largest code point encoded in two bytes.
pub const TWO_BYTE_MAX: u32 = 0x3fff;

/// Up to this many groups fit in a `u64` accumulator (63 bits).
pub(crate) const SMALL_GROUPS: usize = 9;
