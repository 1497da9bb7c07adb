//! Everything needed to encode and decode Kim in one import.

pub use crate::{
    encoding::{
        decode_bigint, decode_bigint_array, decode_bigint_at, decode_number, decode_number_array,
        decode_string, encode, encode_bigint, encode_full, encode_iterable, encode_number,
        encode_string, encoded_code_point_len, encoded_len, Deserializer, KimBytes, Ser,
        Serializer, SerializerExt,
    },
    errors::{ErrorKind, KimError},
    number::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER},
    Kim,
};
pub use bytes::{Bytes, IntoBuf};
pub use num_bigint::BigInt;
pub use num_traits::Num;
