//! Errors raised while parsing a type signature into a [`crate::SchemaNode`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypeError {
    /// The signature does not match any production of the type grammar.
    #[error("unknown type: {0}")]
    UnknownType(String),
}

impl TypeError {
    pub fn unknown(signature: &str) -> Self {
        TypeError::UnknownType(signature.to_string())
    }
}
