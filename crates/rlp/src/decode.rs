//! Decoding side of the RLP primitive layer (Component R).

use std::mem::size_of;

use crate::constants::MAX_RLP_PAYLOAD;
use crate::error::RLPError;

/// Classification of an RLP leading byte, per the five-way split in the
/// distilled spec's §4.1. V3's own framing never emits kinds 3/4 (lists);
/// they exist here only so the structural reader ([`crate::item::wrap`])
/// can recognize — and reject — list-headed data nested inside a buffer
/// it did not itself produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpKind {
    SingleByte,
    ShortString,
    LongString,
    ShortList,
    LongList,
}

pub fn rlp_type(lead: u8) -> RlpKind {
    match lead {
        0x00..=0x7f => RlpKind::SingleByte,
        0x80..=0xb7 => RlpKind::ShortString,
        0xb8..=0xbf => RlpKind::LongString,
        0xc0..=0xf7 => RlpKind::ShortList,
        0xf8..=0xff => RlpKind::LongList,
    }
}

/// Decodes one RLP-framed byte string from the front of `input`, returning
/// the decoded payload and the remaining bytes. This is `unrlp` from the
/// distilled spec: it never accepts a list head.
pub fn decode(input: &[u8]) -> Result<(&[u8], &[u8]), RLPError> {
    let Some(&lead) = input.first() else {
        tracing::trace!("truncated RLP input: no lead byte");
        return Err(RLPError::truncated());
    };
    match rlp_type(lead) {
        RlpKind::SingleByte => Ok((&input[..1], &input[1..])),
        RlpKind::ShortString => {
            let len = (lead - 0x80) as usize;
            let (payload, rest) = split_checked(input, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                tracing::trace!(byte = payload[0], "non-minimal single-byte RLP encoding");
                return Err(RLPError::non_minimal_single_byte());
            }
            Ok((payload, rest))
        }
        RlpKind::LongString => {
            let len_of_len = (lead - 0xb7) as usize;
            let (len_bytes, after_len) = split_checked(input, 1, len_of_len)?;
            let len = decode_length(len_bytes)?;
            if len < 56 {
                tracing::trace!(len, "long-form RLP length field encodes a length < 56");
                return Err(RLPError::long_length_too_small());
            }
            let (payload, rest) = split_checked(after_len, 0, len)?;
            Ok((payload, rest))
        }
        RlpKind::ShortList | RlpKind::LongList => {
            tracing::trace!(lead, "expected an RLP string, got a list head");
            Err(RLPError::unexpected_list())
        }
    }
}

/// Splits `input` into `(input[skip..skip+len], input[skip+len..])`,
/// bounds-checked and capped against [`MAX_RLP_PAYLOAD`].
fn split_checked(input: &[u8], skip: usize, len: usize) -> Result<(&[u8], &[u8]), RLPError> {
    if len > MAX_RLP_PAYLOAD {
        tracing::trace!(len, "RLP payload length exceeds MAX_RLP_PAYLOAD");
        return Err(RLPError::out_of_bounds());
    }
    let end = skip.checked_add(len).ok_or_else(RLPError::out_of_bounds)?;
    if input.len() < end {
        tracing::trace!(
            have = input.len(),
            need = end,
            "truncated RLP input: not enough bytes for the declared length"
        );
        return Err(RLPError::truncated());
    }
    Ok((&input[skip..end], &input[end..]))
}

/// Interprets `bytes` as a big-endian unsigned length. A leading zero byte
/// would mean a non-minimal length-of-length encoding; RLP has no such
/// concept for the length-of-length field itself, so we only bound the
/// result, not its minimality (minimality of the *payload* length is
/// checked by the `len < 56` test in [`decode`]).
fn decode_length(bytes: &[u8]) -> Result<usize, RLPError> {
    if bytes.len() > size_of::<usize>() {
        return Err(RLPError::out_of_bounds());
    }
    let mut buf = [0u8; size_of::<usize>()];
    buf[size_of::<usize>() - bytes.len()..].copy_from_slice(bytes);
    Ok(usize::from_be_bytes(buf))
}
