//! # v3-rlp
//!
//! Recursive Length Prefix (RLP) primitives for the V3 ABI codec.
//!
//! This crate implements exactly the subset of RLP the V3 wire format
//! relies on: single-byte, short-string, and long-string framing of byte
//! strings, plus a structural reader ([`item::wrap`]) for callers that only
//! need an item's bounds and list/string kind. V3 never frames a list with
//! RLP, so list *encoding* is not exposed here — only the classification
//! needed to detect and reject a stray list head ([`decode::RlpKind`]).
//!
//! ## Quick start
//!
//! ```rust
//! use v3_rlp::{encode, decode};
//!
//! let mut buf = Vec::new();
//! encode::encode(b"dog", &mut buf);
//! assert_eq!(buf, vec![0x83, b'd', b'o', b'g']);
//!
//! let (payload, rest) = decode::decode(&buf).unwrap();
//! assert_eq!(payload, b"dog");
//! assert!(rest.is_empty());
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod item;

pub use error::RLPError;
