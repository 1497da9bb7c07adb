use crate::encoding::constants::{DATA_MASK, GROUP_BITS};
use smallvec::SmallVec;

/// Splits a `u64` into the fewest possible 7-bit groups, least significant group first.
///
/// Zero is a single zero group. A `u64` never needs more than ten groups.
pub(crate) fn u64_to_groups(num: u64) -> SmallVec<[u8; 10]> {
    let mut groups = SmallVec::new();
    let mut rest = num;
    loop {
        groups.push((rest & DATA_MASK as u64) as u8);
        rest >>= GROUP_BITS;
        if rest == 0 {
            break;
        }
    }
    groups
}

/// Number of 7-bit groups needed for a magnitude of `bits` significant bits.
#[inline]
pub(crate) fn group_count(bits: usize) -> usize {
    if bits == 0 {
        1
    } else {
        (bits + GROUP_BITS - 1) / GROUP_BITS
    }
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}
