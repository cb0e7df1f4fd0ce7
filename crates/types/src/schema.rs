//! The parsed-type tree produced by [`crate::create_type`].
//!
//! Every variant carries its own `canonical_name`, rather than deriving one
//! structurally, because two variants can share a structure while needing
//! different names: `address` and `uint160` are both 160-bit unsigned
//! integers, and `function` and `bytes24` are both 24-byte arrays. The
//! canonical name is fixed at parse time and is exactly the substring of
//! the original signature that produced the node, so re-parsing it is a
//! no-op (`create_type(create_type(s)?.canonical_name()) == create_type(s)`).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Boolean,
    Integer {
        canonical_name: String,
        unsigned: bool,
        bit_len: u16,
    },
    Decimal {
        canonical_name: String,
        unsigned: bool,
        bit_len: u16,
        scale: u8,
    },
    /// `array_len == -1` means dynamic (`T[]`); otherwise the fixed arity
    /// of a `T[N]` array. `is_string` is set only by the `string` base
    /// type, never by generic bracket parsing, and tells the codec to
    /// treat the byte payload as opaque text rather than a binary blob.
    Array {
        canonical_name: String,
        array_len: i64,
        element: Box<SchemaNode>,
        is_string: bool,
    },
    Tuple {
        canonical_name: String,
        elements: Vec<SchemaNode>,
    },
    /// Sentinel element type used only as the element of the four
    /// byte-array base types (`bytes`, `string`, `bytesN`, `function`).
    /// Never produced by [`crate::create_type`] as a top-level result on
    /// its own.
    Byte,
}

impl SchemaNode {
    pub fn canonical_name(&self) -> &str {
        match self {
            SchemaNode::Boolean => "bool",
            SchemaNode::Integer { canonical_name, .. } => canonical_name,
            SchemaNode::Decimal { canonical_name, .. } => canonical_name,
            SchemaNode::Array { canonical_name, .. } => canonical_name,
            SchemaNode::Tuple { canonical_name, .. } => canonical_name,
            SchemaNode::Byte => "--byte--",
        }
    }

    /// True for the four byte-array base types (`bytes`, `string`,
    /// `bytesN`, `function`): arrays whose element is the `Byte` sentinel.
    pub fn is_byte_array(&self) -> bool {
        matches!(self, SchemaNode::Array { element, .. } if matches!(**element, SchemaNode::Byte))
    }

    pub fn is_dynamic_array(&self) -> bool {
        matches!(self, SchemaNode::Array { array_len: -1, .. })
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
