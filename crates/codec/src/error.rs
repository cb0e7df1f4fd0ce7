//! Errors raised while encoding or decoding a V3 message.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CodecError {
    /// A value's shape does not match its schema node (wrong `Value`
    /// variant, or a tuple/field count mismatch).
    #[error("value does not match its schema")]
    ArityError,
    #[error("array value length does not match its schema's array_len")]
    LengthMismatch,
    #[error("header's top two bits select a reserved version")]
    BadVersion,
    #[error("boolean byte was neither 0x00 nor 0x01")]
    BadBoolean,
    #[error("integer value is out of range for its bit width")]
    OutOfRange,
    #[error("byte string is not valid UTF-8")]
    InvalidUtf8,
    #[error("input ended before a value could be fully read{}", fmt_ctx(.0))]
    Truncated(Option<&'static str>),
    #[error("fixed/ufixed value encoding is not implemented")]
    Unimplemented,
    #[error(transparent)]
    Rlp(#[from] v3_rlp::RLPError),
    #[error(transparent)]
    Type(#[from] v3_types::TypeError),
}

fn fmt_ctx(ctx: &Option<&'static str>) -> String {
    match ctx {
        Some(c) => format!(" (while decoding {c})"),
        None => String::new(),
    }
}

impl CodecError {
    pub fn truncated(context: &'static str) -> Self {
        CodecError::Truncated(Some(context))
    }
}
