use kim::{
    number::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER},
    Kim,
};
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;

/// arbitrary BigInt too large for 64 bits, for use with proptest
pub fn arb_huge_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[0-1]{64,300}".prop_map(|n| -> BigInt { BigInt::from_str_radix(&n, 2).unwrap() })
}

/// arbitrary BigInt of any size, biased towards 7-bit group boundaries
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        any::<i64>().prop_map(BigInt::from),
        (any::<i64>(), any::<u64>()).prop_map(|(hi, lo)| (BigInt::from(hi) << 64) + BigInt::from(lo)),
        // 2^(7k) and its neighbours
        (1usize..20, -1i64..=1, any::<bool>()).prop_map(|(k, d, neg)| {
            let n = (BigInt::from(1) << (7 * k)) + BigInt::from(d);
            if neg {
                -n
            } else {
                n
            }
        }),
        arb_huge_bigint(),
    ]
}

/// arbitrary integer in the safe range, for use with proptest
pub fn arb_safe_int() -> impl Strategy<Value = i64> { MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER }

/// arbitrary numeric Kim value (an integer or an integral number)
pub fn arb_numeric() -> impl Strategy<Value = Kim> {
    prop_oneof![
        arb_bigint().prop_map(Kim::from),
        arb_safe_int().prop_map(|i| Kim::from(i as f64)),
    ]
}

/// arbitrary encodable Kim, for use with proptest
pub fn arb_kim() -> impl Strategy<Value = Kim> {
    prop_oneof![
        arb_numeric(),
        any::<String>().prop_map(Kim::from),
        prop::collection::vec(arb_numeric(), 0..20).prop_map(Kim::from),
    ]
}
