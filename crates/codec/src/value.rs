//! The value tree encoded/decoded against a [`v3_types::SchemaNode`] tree.
//!
//! Mirrors `ethrex_sdk`'s calldata `Value` enum in spirit (a value sum type
//! parallel to the schema tree) but with exactly one integer variant: V3
//! integers range up to 256 bits, past `i128`, so `Int` carries
//! [`crate::bigint::BigInt`] rather than a native Rust integer. There is no
//! `Decimal` variant — see `CodecError::Unimplemented` in
//! [`crate::structs`].

use crate::bigint::BigInt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(BigInt),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn int(value: i128) -> Self {
        Value::Int(BigInt::from_i128(value))
    }
}
