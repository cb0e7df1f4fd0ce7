//! # v3-types
//!
//! Parses a V3 type signature (`uint256`, `(bool,string)[3]`, ...) into a
//! [`SchemaNode`] tree. The grammar is recursive: arrays and tuples may
//! nest to arbitrary depth, right-associating on repeated array brackets
//! (`T[2][]` is an array of `T[2]`, not the reverse).
//!
//! ```rust
//! use v3_types::create_type;
//!
//! let schema = create_type("(uint8,bool[])").unwrap();
//! assert_eq!(schema.canonical_name(), "(uint8,bool[])");
//! ```

mod error;
mod parser;
mod schema;

pub use error::TypeError;
pub use schema::SchemaNode;

/// Parses a type signature into its schema tree, or reports the first
/// malformed segment. Re-parsing a node's own [`SchemaNode::canonical_name`]
/// always yields an identical node.
pub fn create_type(signature: &str) -> Result<SchemaNode, TypeError> {
    parser::parse(signature)
}
