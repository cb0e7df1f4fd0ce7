use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RLPError {
    #[error("truncated RLP input{}", fmt_ctx(.0))]
    Truncated(Option<&'static str>),
    #[error("long-form RLP length field encodes a length < 56{}", fmt_ctx(.0))]
    LongLengthTooSmall(Option<&'static str>),
    #[error("non-minimal single-byte RLP encoding (0x81 prefix on a byte < 0x80){}", fmt_ctx(.0))]
    NonMinimalSingleByte(Option<&'static str>),
    #[error("expected an RLP string, got a list head{}", fmt_ctx(.0))]
    UnexpectedList(Option<&'static str>),
    #[error("RLP item extends past its container{}", fmt_ctx(.0))]
    OutOfBounds(Option<&'static str>),
}

fn fmt_ctx(ctx: &Option<&'static str>) -> String {
    ctx.map(|c| format!(" decoding {c}")).unwrap_or_default()
}

impl RLPError {
    pub fn truncated() -> Self {
        Self::Truncated(None)
    }

    pub fn long_length_too_small() -> Self {
        Self::LongLengthTooSmall(None)
    }

    pub fn non_minimal_single_byte() -> Self {
        Self::NonMinimalSingleByte(None)
    }

    pub fn unexpected_list() -> Self {
        Self::UnexpectedList(None)
    }

    pub fn out_of_bounds() -> Self {
        Self::OutOfBounds(None)
    }

    pub fn with_context(self, ctx: &'static str) -> Self {
        match self {
            Self::Truncated(_) => Self::Truncated(Some(ctx)),
            Self::LongLengthTooSmall(_) => Self::LongLengthTooSmall(Some(ctx)),
            Self::NonMinimalSingleByte(_) => Self::NonMinimalSingleByte(Some(ctx)),
            Self::UnexpectedList(_) => Self::UnexpectedList(Some(ctx)),
            Self::OutOfBounds(_) => Self::OutOfBounds(Some(ctx)),
        }
    }
}
