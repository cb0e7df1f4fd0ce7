//! Structural RLP reader: locates an item's boundaries and whether it's a
//! list head, without requiring the minimal-encoding validation that
//! [`crate::decode::decode`] performs. Grounded on
//! `ethrex_rlp::decode::{decode_rlp_item, get_item_with_prefix}`, extended
//! to also classify (and carry) list heads, which that decode path never
//! needs to surface to callers. `v3_codec` always reads fields
//! through the stricter [`crate::decode::decode`] instead, since every
//! field there needs full minimality validation; this stays part of
//! Component R's public surface for callers that only need bounds/shape,
//! not full validity.

use crate::decode::{RlpKind, rlp_type};
use crate::error::RLPError;

/// One parsed RLP item: where it starts, where its payload starts and
/// ends, and whether it was a list head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub index: usize,
    pub data_index: usize,
    pub data_length: usize,
    pub end_index: usize,
    pub is_list: bool,
}

impl Item {
    /// The item's payload, i.e. `buffer[data_index..end_index]`.
    pub fn data<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.data_index..self.end_index]
    }
}

/// Parses the RLP item starting at `buffer[index]`, bounds-checked against
/// `container_end` (an exclusive upper bound, typically `buffer.len()` or
/// the end of an enclosing item's payload).
pub fn wrap(buffer: &[u8], index: usize, container_end: usize) -> Result<Item, RLPError> {
    let Some(&lead) = buffer.get(index) else {
        tracing::trace!(index, "truncated RLP input: no lead byte at index");
        return Err(RLPError::truncated());
    };
    match rlp_type(lead) {
        RlpKind::SingleByte => {
            let end_index = require_in_bounds(index + 1, container_end)?;
            Ok(Item {
                index,
                data_index: index,
                data_length: 1,
                end_index,
                is_list: false,
            })
        }
        RlpKind::ShortString => {
            let data_index = index + 1;
            let data_length = (lead - 0x80) as usize;
            let end_index = require_in_bounds(data_index + data_length, container_end)?;
            Ok(Item {
                index,
                data_index,
                data_length,
                end_index,
                is_list: false,
            })
        }
        RlpKind::ShortList => {
            let data_index = index + 1;
            let data_length = (lead - 0xc0) as usize;
            let end_index = require_in_bounds(data_index + data_length, container_end)?;
            Ok(Item {
                index,
                data_index,
                data_length,
                end_index,
                is_list: true,
            })
        }
        RlpKind::LongString => long_item(buffer, index, lead, 0xb7, container_end, false),
        RlpKind::LongList => long_item(buffer, index, lead, 0xf7, container_end, true),
    }
}

fn long_item(
    buffer: &[u8],
    index: usize,
    lead: u8,
    offset: u8,
    container_end: usize,
    is_list: bool,
) -> Result<Item, RLPError> {
    let diff = (lead - offset) as usize;
    let length_index = index + 1;
    let data_index = require_in_bounds(length_index + diff, container_end)?;
    let Some(length_bytes) = buffer.get(length_index..data_index) else {
        tracing::trace!(length_index, data_index, "truncated RLP length-of-length field");
        return Err(RLPError::truncated());
    };
    let data_length = be_unsigned(length_bytes);
    if data_length < 56 {
        tracing::trace!(data_length, "long-form RLP length field encodes a length < 56");
        return Err(RLPError::long_length_too_small());
    }
    let end_index = require_in_bounds(data_index + data_length, container_end)?;
    Ok(Item {
        index,
        data_index,
        data_length,
        end_index,
        is_list,
    })
}

fn be_unsigned(bytes: &[u8]) -> usize {
    bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize)
}

fn require_in_bounds(val: usize, container_end: usize) -> Result<usize, RLPError> {
    if val > container_end {
        tracing::trace!(val, container_end, "RLP item extends past its container");
        Err(RLPError::out_of_bounds())
    } else {
        Ok(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_single_byte() {
        let buf = [0x42, 0xaa];
        let item = wrap(&buf, 0, buf.len()).unwrap();
        assert_eq!(item.data(&buf), &[0x42]);
        assert!(!item.is_list);
        assert_eq!(item.end_index, 1);
    }

    #[test]
    fn wraps_short_string() {
        let buf = [0x83, b'd', b'o', b'g'];
        let item = wrap(&buf, 0, buf.len()).unwrap();
        assert_eq!(item.data(&buf), b"dog");
        assert!(!item.is_list);
    }

    #[test]
    fn wraps_short_list() {
        let buf = [0xc2, 0x01, 0x02];
        let item = wrap(&buf, 0, buf.len()).unwrap();
        assert!(item.is_list);
        assert_eq!(item.data(&buf), &[0x01, 0x02]);
    }

    #[test]
    fn rejects_item_exceeding_container() {
        let buf = [0x83, b'd', b'o'];
        let err = wrap(&buf, 0, buf.len()).unwrap_err();
        assert_eq!(err, RLPError::out_of_bounds());
    }

    #[test]
    fn rejects_long_form_below_56() {
        let buf = [0xb8, 5, 1, 2, 3, 4, 5];
        let err = wrap(&buf, 0, buf.len()).unwrap_err();
        assert_eq!(err, RLPError::long_length_too_small());
    }
}
