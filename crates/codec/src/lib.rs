//! # v3-codec
//!
//! The V3 value codec (Component V): frames a function call — a
//! version/function-id header plus a schema-typed argument list — into a
//! byte string, and back.
//!
//! ```rust
//! use v3_codec::{encode_function, decode_function, Value};
//! use v3_types::create_type;
//!
//! let schema = vec![create_type("bool").unwrap()];
//! let values = vec![Value::Bool(true)];
//! let wire = encode_function(1, &schema, &values, true).unwrap();
//! assert_eq!(wire, vec![0x41, 0x01]);
//! assert_eq!(decode_function(&schema, &wire).unwrap(), values);
//! ```

pub mod bigint;
pub mod error;
pub mod header;
pub mod structs;
pub mod value;

pub use bigint::BigInt;
pub use error::CodecError;
pub use value::Value;

use v3_types::SchemaNode;

/// Frames `values` (positionally matching `schema`) behind a version/
/// function-id header. `external` selects RLP-framed minimal-width
/// integers (`true`) or fixed-width packed integers (`false`).
pub fn encode_function(
    fn_number: u64,
    schema: &[SchemaNode],
    values: &[Value],
    external: bool,
) -> Result<Vec<u8>, CodecError> {
    tracing::debug!(fn_number, external, "encoding v3 function call");
    if schema.len() != values.len() {
        tracing::warn!(
            schema_len = schema.len(),
            values_len = values.len(),
            "schema/value arity mismatch"
        );
        return Err(CodecError::ArityError);
    }
    let mut buf = Vec::new();
    header::encode_header(fn_number, external, &mut buf);
    let mut encoder = structs::Encoder::new(&mut buf, external);
    for (node, value) in schema.iter().zip(values.iter()) {
        if let Err(err) = encoder.encode_value(node, value) {
            tracing::warn!(error = %err, "failed to encode v3 function call");
            return Err(err);
        }
    }
    Ok(buf)
}

/// Reads a header off `data`, then decodes one value per `schema` entry
/// from what follows. The header's mode selects internal/external integer
/// framing for the remainder of the message; its function id is validated
/// but, matching this codec's public contract, not returned to the caller.
pub fn decode_function(schema: &[SchemaNode], data: &[u8]) -> Result<Vec<Value>, CodecError> {
    let (header, rest) = header::decode_header(data)?;
    let external = header.mode == header::Mode::External;
    tracing::debug!(
        fn_number = header.fn_number,
        external,
        "decoding v3 function call"
    );
    let mut decoder = structs::Decoder::new(rest, external);
    let mut out = Vec::with_capacity(schema.len());
    for node in schema {
        match decoder.decode_value(node) {
            Ok(value) => out.push(value),
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode v3 function call");
                return Err(err);
            }
        }
    }
    Ok(out)
}
