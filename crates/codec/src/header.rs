//! The one-byte version/function-id header that frames every V3 message.
//!
//! Grounded on the final iteration of the source's header logic (see
//! `DESIGN.md`): `VERSION_ID_INTERNAL = 0x00`, `VERSION_ID_EXTERNAL = 0x40`.
//! Earlier superseded variants (a three-bit `V3_VERSION_ID` mask) are not
//! implemented.

use crate::bigint::BigInt;
use crate::error::CodecError;

pub const VERSION_ID_INTERNAL: u8 = 0x00;
pub const VERSION_ID_EXTERNAL: u8 = 0x40;
const MODE_MASK: u8 = 0xC0;
const ID_MASK: u8 = 0x3F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub mode: Mode,
    pub fn_number: u64,
}

pub fn encode_header(fn_number: u64, external: bool, buf: &mut Vec<u8>) {
    if external {
        if fn_number < ID_MASK as u64 {
            buf.push(VERSION_ID_EXTERNAL | fn_number as u8);
        } else {
            buf.push(VERSION_ID_EXTERNAL | ID_MASK);
            let overflow = BigInt::from_i128((fn_number - ID_MASK as u64) as i128);
            v3_rlp::encode::encode(&overflow.to_minimal_unsigned_bytes(), buf);
        }
    } else {
        buf.push(VERSION_ID_INTERNAL);
        buf.extend_from_slice(&(fn_number as u32).to_be_bytes());
    }
}

pub fn decode_header(data: &[u8]) -> Result<(Header, &[u8]), CodecError> {
    let (&lead, rest) = data
        .split_first()
        .ok_or_else(|| CodecError::truncated("header byte"))?;
    match lead & MODE_MASK {
        VERSION_ID_INTERNAL => {
            if rest.len() < 4 {
                return Err(CodecError::truncated("internal-mode function id"));
            }
            let (id_bytes, tail) = rest.split_at(4);
            let fn_number = u32::from_be_bytes(id_bytes.try_into().unwrap()) as u64;
            Ok((
                Header {
                    mode: Mode::Internal,
                    fn_number,
                },
                tail,
            ))
        }
        VERSION_ID_EXTERNAL => {
            let low = lead & ID_MASK;
            if low < ID_MASK {
                Ok((
                    Header {
                        mode: Mode::External,
                        fn_number: low as u64,
                    },
                    rest,
                ))
            } else {
                let overflow_lead = *rest
                    .first()
                    .ok_or_else(|| CodecError::truncated("function id overflow"))?;
                if overflow_lead > 0xB7 {
                    return Err(CodecError::Rlp(
                        v3_rlp::RLPError::unexpected_list()
                            .with_context("function id overflow"),
                    ));
                }
                let (overflow_bytes, tail) = v3_rlp::decode::decode(rest)?;
                let fn_number = ID_MASK as u64 + be_unsigned(overflow_bytes);
                Ok((
                    Header {
                        mode: Mode::External,
                        fn_number,
                    },
                    tail,
                ))
            }
        }
        _ => Err(CodecError::BadVersion),
    }
}

fn be_unsigned(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}
