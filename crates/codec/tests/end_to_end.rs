//! Whole-message round-trip scenarios against the public API only, mirroring
//! the split `ethrex-rlp` itself uses between inline unit tests in
//! `encode.rs`/`decode.rs` and its separate integration tests under
//! `crates/test/tests/rlp/`.

use hex_literal::hex;
use v3_codec::{decode_function, encode_function, Value};
use v3_types::create_type;

fn schema(sigs: &[&str]) -> Vec<v3_types::SchemaNode> {
    sigs.iter().map(|s| create_type(s).unwrap()).collect()
}

#[test]
fn external_bool_matches_fixture() {
    let s = schema(&["bool"]);
    let values = vec![Value::Bool(true)];
    let wire = encode_function(1, &s, &values, true).unwrap();
    assert_eq!(wire, hex!("4101"));
    assert_eq!(decode_function(&s, &wire).unwrap(), values);
}

#[test]
fn external_negative_int32_matches_fixture() {
    let s = schema(&["int32"]);
    let values = vec![Value::int(-2)];
    let wire = encode_function(16, &s, &values, true).unwrap();
    assert_eq!(wire, hex!("5081FE"));
}

#[test]
fn internal_mode_bool_matches_fixture() {
    let s = schema(&["bool"]);
    let values = vec![Value::Bool(true)];
    let wire = encode_function(1, &s, &values, false).unwrap();
    assert_eq!(wire, hex!("000000000101"));
    assert_eq!(decode_function(&s, &wire).unwrap(), values);
}

#[test]
fn round_trip_holds_across_a_representative_schema_corpus() {
    let cases: &[(&str, Value)] = &[
        ("bool", Value::Bool(false)),
        ("uint8", Value::int(255)),
        ("int256", Value::int(-1)),
        // A positive signed value whose minimal byte has its top bit set
        // (the decoder must not mistake it for a two's-complement negative).
        ("int16", Value::int(255)),
        ("bytes", Value::Bytes(vec![1, 2, 3])),
        ("string", Value::Str("hello v3".to_string())),
        ("bytes4", Value::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])),
        ("address", Value::int(0x1234)),
        (
            "uint16[]",
            Value::Array(vec![Value::int(1), Value::int(2), Value::int(3)]),
        ),
        (
            "bool[3]",
            Value::Array(vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]),
        ),
        (
            "(uint8,bool,string)",
            Value::Tuple(vec![
                Value::int(9),
                Value::Bool(true),
                Value::Str("tuple".to_string()),
            ]),
        ),
    ];

    for (sig, value) in cases {
        let s = schema(&[sig]);
        let values = vec![value.clone()];
        for external in [true, false] {
            let wire = encode_function(7, &s, &values, external).unwrap();
            assert_eq!(
                decode_function(&s, &wire).unwrap(),
                values,
                "round-trip failed for {sig} (external={external})"
            );
        }
    }
}

#[test]
fn canonical_type_strings_survive_create_type_twice() {
    for sig in [
        "uint256[]",
        "(uint8,(bool,string))",
        "bytes32",
        "(fixed128x3)[]",
        "function",
    ] {
        let once = create_type(sig).unwrap();
        let twice = create_type(once.canonical_name()).unwrap();
        assert_eq!(once, twice);
    }
}
