//! Encoding side of the RLP primitive layer (Component R).
//!
//! V3 only ever frames byte strings with RLP — it never emits a list head
//! (see [`crate::decode::RlpKind`]) — so this module exposes a single
//! operation, [`encode`], matching the `rlp(byte_string)` contract.

use bytes::BufMut;

use crate::constants::RLP_NULL;

/// Encodes `byte_string` per the RLP string contract:
///
/// - a single byte `< 0x80` is its own encoding,
/// - a single byte `>= 0x80` is preceded by `0x81`,
/// - 0..56 bytes are preceded by `0x80 + len`,
/// - 56+ bytes are preceded by `0xb7 + len_of_len` followed by the
///   minimal big-endian encoding of `len`.
pub fn encode(byte_string: &[u8], buf: &mut dyn BufMut) {
    let len = byte_string.len();
    if len == 1 && byte_string[0] < RLP_NULL {
        buf.put_u8(byte_string[0]);
        return;
    }
    if len < 56 {
        buf.put_u8(RLP_NULL + len as u8);
        buf.put_slice(byte_string);
        return;
    }
    let len_bytes = len.to_be_bytes();
    let start = len_bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(len_bytes.len() - 1);
    let len_of_len = len_bytes.len() - start;
    buf.put_u8(0xb7 + len_of_len as u8);
    buf.put_slice(&len_bytes[start..]);
    buf.put_slice(byte_string);
}

/// Encodes `byte_string` into a freshly allocated `Vec<u8>`.
pub fn encode_to_vec(byte_string: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(byte_string));
    encode(byte_string, &mut buf);
    buf
}

/// The length `encode` would produce, without actually encoding anything.
pub fn encoded_len(byte_string: &[u8]) -> usize {
    let len = byte_string.len();
    if len == 1 && byte_string[0] < RLP_NULL {
        return 1;
    }
    if len < 56 {
        return 1 + len;
    }
    let len_of_len = (usize::BITS as usize - len.leading_zeros() as usize).div_ceil(8);
    1 + len_of_len + len
}
