//! Recursive-descent parser for the V3 type grammar.
//!
//! There is no upstream implementation of this grammar to adapt: the
//! original draft (`TypeFactory`/`V3Type`) only handled a flat, non-nested
//! subset. This is written from scratch in the style the rest of this
//! workspace uses for fallible, non-panicking parsing — combinators that
//! return `Option`/`Result` and a single public entry point that turns an
//! absence into a typed error.
//!
//! Grammar, in priority order:
//!   1. `T[]` / `T[N]`       — array of `T` (checked by trailing `]`)
//!   2. `(T1,T2,...)`        — tuple, arbitrary nesting, empty allowed
//!   3. a base type          — from the fixed pool below

use std::sync::LazyLock;

use crate::error::TypeError;
use crate::schema::SchemaNode;

/// The base types with no parameters: fixed name, fixed shape. Parametrized
/// families (`bytesN`, `intM`/`uintM`, `(u)fixedMxN`) are validated
/// algorithmically in [`parse_parametrized`] instead of being enumerated
/// here, since the family is large (intM/uintM alone is 32 names) and the
/// validity rule is simpler to state as an equation than as a table.
static FIXED_BASE_TYPES: LazyLock<[(&str, fn() -> SchemaNode); 5]> = LazyLock::new(|| {
    [
        ("bool", || SchemaNode::Boolean),
        ("address", || SchemaNode::Integer {
            canonical_name: "address".to_string(),
            unsigned: true,
            bit_len: 160,
        }),
        ("function", || SchemaNode::Array {
            canonical_name: "function".to_string(),
            array_len: 24,
            element: Box::new(SchemaNode::Byte),
            is_string: false,
        }),
        ("bytes", || SchemaNode::Array {
            canonical_name: "bytes".to_string(),
            array_len: -1,
            element: Box::new(SchemaNode::Byte),
            is_string: false,
        }),
        ("string", || SchemaNode::Array {
            canonical_name: "string".to_string(),
            array_len: -1,
            element: Box::new(SchemaNode::Byte),
            is_string: true,
        }),
    ]
});

pub fn parse(signature: &str) -> Result<SchemaNode, TypeError> {
    if signature.ends_with(']') {
        return parse_array(signature);
    }
    if signature.starts_with('(') {
        return parse_tuple(signature);
    }
    parse_base(signature).ok_or_else(|| TypeError::unknown(signature))
}

fn parse_array(signature: &str) -> Result<SchemaNode, TypeError> {
    let open = signature
        .rfind('[')
        .ok_or_else(|| TypeError::unknown(signature))?;
    let inner = &signature[open + 1..signature.len() - 1];
    let array_len: i64 = if inner.is_empty() {
        -1
    } else {
        parse_array_length(inner).ok_or_else(|| TypeError::unknown(signature))?
    };
    let prefix = &signature[..open];
    if prefix.is_empty() {
        return Err(TypeError::unknown(signature));
    }
    let element = parse(prefix)?;
    let canonical_name = format!("{}{}", element.canonical_name(), &signature[open..]);
    Ok(SchemaNode::Array {
        canonical_name,
        array_len,
        element: Box::new(element),
        is_string: false,
    })
}

fn parse_tuple(signature: &str) -> Result<SchemaNode, TypeError> {
    if !signature.ends_with(')') {
        return Err(TypeError::unknown(signature));
    }
    let inner = &signature[1..signature.len() - 1];
    let mut elements = Vec::new();
    if !inner.is_empty() {
        let bytes = inner.as_bytes();
        let mut depth: i32 = 0;
        let mut start = 0usize;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(TypeError::unknown(signature));
                    }
                }
                b',' if depth == 0 => {
                    elements.push(parse(&inner[start..i])?);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(TypeError::unknown(signature));
        }
        elements.push(parse(&inner[start..])?);
    }
    let canonical_name = format!(
        "({})",
        elements
            .iter()
            .map(SchemaNode::canonical_name)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(SchemaNode::Tuple {
        canonical_name,
        elements,
    })
}

fn parse_base(signature: &str) -> Option<SchemaNode> {
    for (name, ctor) in FIXED_BASE_TYPES.iter() {
        if *name == signature {
            return Some(ctor());
        }
    }
    parse_parametrized(signature)
}

fn parse_parametrized(signature: &str) -> Option<SchemaNode> {
    if let Some(digits) = signature.strip_prefix("bytes") {
        let n = parse_nonzero_decimal(digits)?;
        if (1..=32).contains(&n) {
            return Some(SchemaNode::Array {
                canonical_name: signature.to_string(),
                array_len: n as i64,
                element: Box::new(SchemaNode::Byte),
                is_string: false,
            });
        }
        return None;
    }
    if let Some(digits) = signature.strip_prefix("uint") {
        return parse_int(digits, true, signature);
    }
    if let Some(digits) = signature.strip_prefix("int") {
        return parse_int(digits, false, signature);
    }
    parse_fixed(signature)
}

fn parse_int(digits: &str, unsigned: bool, full: &str) -> Option<SchemaNode> {
    let bit_len = parse_nonzero_decimal(digits)?;
    if bit_len < 8 || bit_len > 256 || bit_len % 8 != 0 {
        return None;
    }
    Some(SchemaNode::Integer {
        canonical_name: full.to_string(),
        unsigned,
        bit_len: bit_len as u16,
    })
}

fn parse_fixed(signature: &str) -> Option<SchemaNode> {
    let (unsigned, rest) = if let Some(rest) = signature.strip_prefix("ufixed") {
        (true, rest)
    } else if let Some(rest) = signature.strip_prefix("fixed") {
        (false, rest)
    } else {
        return None;
    };
    let (m_str, n_str) = rest.split_once('x')?;
    let bit_len = parse_nonzero_decimal(m_str)?;
    let scale = parse_nonzero_decimal(n_str)?;
    if bit_len == 0 || bit_len > 256 || bit_len % 8 != 0 {
        return None;
    }
    if scale < 1 || scale > 80 {
        return None;
    }
    Some(SchemaNode::Decimal {
        canonical_name: signature.to_string(),
        unsigned,
        bit_len: bit_len as u16,
        scale: scale as u8,
    })
}

/// Decimal literal with no leading zero and no empty match; `"0"` itself
/// is rejected since it never names a valid bit width, scale, or `bytesN`.
fn parse_nonzero_decimal(token: &str) -> Option<u32> {
    if token.is_empty() || token == "0" || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

/// Decimal literal for an array length: same as [`parse_nonzero_decimal`]
/// but `"0"` is accepted (a zero-length fixed array is a valid, if
/// degenerate, array type).
fn parse_array_length(token: &str) -> Option<i64> {
    if token == "0" {
        return Some(0);
    }
    parse_nonzero_decimal(token).map(|n| n as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bool() {
        assert_eq!(parse("bool").unwrap(), SchemaNode::Boolean);
    }

    #[test]
    fn parses_address_as_uint160_with_its_own_name() {
        let node = parse("address").unwrap();
        assert_eq!(node.canonical_name(), "address");
        assert_eq!(
            node,
            SchemaNode::Integer {
                canonical_name: "address".to_string(),
                unsigned: true,
                bit_len: 160,
            }
        );
    }

    #[test]
    fn function_and_bytes24_are_structurally_identical_but_differently_named() {
        let function = parse("function").unwrap();
        let bytes24 = parse("bytes24").unwrap();
        assert_eq!(function.canonical_name(), "function");
        assert_eq!(bytes24.canonical_name(), "bytes24");
        assert!(matches!(function, SchemaNode::Array { array_len: 24, .. }));
        assert!(matches!(bytes24, SchemaNode::Array { array_len: 24, .. }));
    }

    #[test]
    fn rejects_out_of_range_bytesn() {
        assert!(parse("bytes0").is_err());
        assert!(parse("bytes33").is_err());
    }

    #[test]
    fn rejects_leading_zero_in_intm() {
        assert!(parse("uint008").is_err());
        assert!(parse("int8").is_ok());
    }

    #[test]
    fn rejects_bit_len_not_multiple_of_eight() {
        assert!(parse("uint13").is_err());
    }

    #[test]
    fn parses_dynamic_array() {
        let node = parse("uint256[]").unwrap();
        match node {
            SchemaNode::Array {
                array_len,
                element,
                is_string,
                ..
            } => {
                assert_eq!(array_len, -1);
                assert!(!is_string);
                assert_eq!(element.canonical_name(), "uint256");
            }
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn parses_fixed_array_with_zero_length() {
        let node = parse("bool[0]").unwrap();
        assert!(matches!(node, SchemaNode::Array { array_len: 0, .. }));
    }

    #[test]
    fn parses_every_fixed_array_length_up_to_2000() {
        for n in 0u32..=2000 {
            let sig = format!("uint8[{n}]");
            let node = parse(&sig).unwrap();
            assert_eq!(node.canonical_name(), sig);
            assert!(matches!(node, SchemaNode::Array { array_len, .. } if array_len == n as i64));
        }
    }

    #[test]
    fn rejects_fixed_array_with_leading_zero_length() {
        assert!(parse("bool[01]").is_err());
    }

    #[test]
    fn parses_nested_arrays_right_associated() {
        let node = parse("uint8[2][]").unwrap();
        assert_eq!(node.canonical_name(), "uint8[2][]");
        match node {
            SchemaNode::Array {
                array_len, element, ..
            } => {
                assert_eq!(array_len, -1);
                assert!(matches!(*element, SchemaNode::Array { array_len: 2, .. }));
            }
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn parses_empty_tuple() {
        let node = parse("()").unwrap();
        assert_eq!(node.canonical_name(), "()");
        assert!(matches!(node, SchemaNode::Tuple { elements, .. } if elements.is_empty()));
    }

    #[test]
    fn parses_nested_tuple() {
        let node = parse("(uint8,(bool,string))").unwrap();
        assert_eq!(node.canonical_name(), "(uint8,(bool,string))");
    }

    #[test]
    fn parses_array_of_tuples() {
        let node = parse("(uint8,bool)[]").unwrap();
        assert_eq!(node.canonical_name(), "(uint8,bool)[]");
    }

    #[test]
    fn rejects_unbalanced_tuple() {
        assert!(parse("(uint8,bool").is_err());
        assert!(parse("uint8,bool)").is_err());
    }

    #[test]
    fn parses_fixed_point_types() {
        let node = parse("fixed128x18").unwrap();
        assert_eq!(
            node,
            SchemaNode::Decimal {
                canonical_name: "fixed128x18".to_string(),
                unsigned: false,
                bit_len: 128,
                scale: 18,
            }
        );
        assert!(parse("ufixed256x80").is_ok());
        assert!(parse("fixed256x81").is_err());
        assert!(parse("fixed008x3").is_err());
    }

    #[test]
    fn canonical_name_is_idempotent_under_reparsing() {
        for sig in [
            "uint256[]",
            "(uint8,(bool,string))",
            "bytes32",
            "address",
            "function",
            "fixed128x18[3]",
        ] {
            let first = parse(sig).unwrap();
            let second = parse(first.canonical_name()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn rejects_unknown_identifier() {
        assert!(parse("uint7").is_err());
        assert!(parse("foo").is_err());
        assert!(parse("").is_err());
    }
}
