//! Field-by-field builders used internally by [`crate::encode_function`] and
//! [`crate::decode_function`]. Generalizes the shape of
//! `ethrex_rlp::structs::{Encoder, Decoder}` (which walk a fixed list of
//! named Rust fields into/out of an RLP list) to a schema-typed tuple of
//! `Value`s, where the field type is a [`SchemaNode`] rather than a Rust
//! type implementing a trait.

use bytes::BufMut;
use v3_types::SchemaNode;

use crate::bigint::BigInt;
use crate::error::CodecError;
use crate::value::Value;

pub struct Encoder<'a> {
    buf: &'a mut dyn BufMut,
    external: bool,
}

impl<'a> Encoder<'a> {
    pub fn new(buf: &'a mut dyn BufMut, external: bool) -> Self {
        Encoder { buf, external }
    }

    pub fn encode_value(&mut self, schema: &SchemaNode, value: &Value) -> Result<(), CodecError> {
        match schema {
            SchemaNode::Boolean => self.encode_boolean(value),
            SchemaNode::Integer {
                unsigned, bit_len, ..
            } => self.encode_integer(*unsigned, *bit_len, value),
            SchemaNode::Decimal { .. } => Err(CodecError::Unimplemented),
            SchemaNode::Array {
                array_len,
                element,
                is_string,
                ..
            } => self.encode_array(*array_len, element, *is_string, value),
            SchemaNode::Tuple { elements, .. } => self.encode_tuple(elements, value),
            SchemaNode::Byte => unreachable!("Byte only ever appears as an array element type"),
        }
    }

    fn encode_boolean(&mut self, value: &Value) -> Result<(), CodecError> {
        let Value::Bool(b) = value else {
            return Err(CodecError::ArityError);
        };
        self.buf.put_u8(if *b { 0x01 } else { 0x00 });
        Ok(())
    }

    fn encode_integer(&mut self, unsigned: bool, bit_len: u16, value: &Value) -> Result<(), CodecError> {
        let Value::Int(n) = value else {
            return Err(CodecError::ArityError);
        };
        if !n.fits(unsigned, bit_len) {
            return Err(CodecError::OutOfRange);
        }
        if self.external {
            // Unsigned fields decode as a plain big-endian magnitude (no
            // two's-complement sign handling), so they never need the
            // escape byte; signed fields must be self-describing, since
            // decode recovers the sign from the byte string alone.
            let bytes = if unsigned {
                n.to_minimal_unsigned_bytes()
            } else {
                n.to_external_signed_bytes()
            };
            v3_rlp::encode::encode(&bytes, self.buf);
        } else {
            let minimal = n.to_minimal_signed_bytes();
            let width = (bit_len / 8) as usize;
            let pad_byte = if n.is_negative() { 0xFF } else { 0x00 };
            let mut bytes = vec![pad_byte; width - minimal.len()];
            bytes.extend_from_slice(&minimal);
            self.buf.put_slice(&bytes);
        }
        Ok(())
    }

    fn emit_length_prefix(&mut self, len: usize) {
        let minimal = BigInt::from_i128(len as i128).to_minimal_unsigned_bytes();
        v3_rlp::encode::encode(&minimal, self.buf);
    }

    fn encode_array(
        &mut self,
        array_len: i64,
        element: &SchemaNode,
        is_string: bool,
        value: &Value,
    ) -> Result<(), CodecError> {
        match element {
            SchemaNode::Byte => self.encode_byte_array(array_len, is_string, value),
            SchemaNode::Boolean => self.encode_bool_array(array_len, value),
            SchemaNode::Integer {
                unsigned, bit_len, ..
            } => self.encode_integer_array(array_len, *unsigned, *bit_len, value),
            _ => self.encode_object_array(array_len, element, value),
        }
    }

    fn encode_byte_array(
        &mut self,
        array_len: i64,
        is_string: bool,
        value: &Value,
    ) -> Result<(), CodecError> {
        let bytes: &[u8] = match (is_string, value) {
            (true, Value::Str(s)) => s.as_bytes(),
            (false, Value::Bytes(b)) => b,
            _ => return Err(CodecError::ArityError),
        };
        if array_len >= 0 && bytes.len() as i64 != array_len {
            return Err(CodecError::LengthMismatch);
        }
        if array_len == -1 {
            self.emit_length_prefix(bytes.len());
        }
        self.buf.put_slice(bytes);
        Ok(())
    }

    fn encode_bool_array(&mut self, array_len: i64, value: &Value) -> Result<(), CodecError> {
        let Value::Array(items) = value else {
            return Err(CodecError::ArityError);
        };
        let len = items.len();
        if array_len >= 0 && len as i64 != array_len {
            return Err(CodecError::LengthMismatch);
        }
        if array_len == -1 {
            self.emit_length_prefix(len);
        }
        if len == 0 {
            return Ok(());
        }
        let booleans = items
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Ok(*b),
                _ => Err(CodecError::ArityError),
            })
            .collect::<Result<Vec<bool>, CodecError>>()?;
        let byte_len = len.div_ceil(8);
        let mut packed = vec![0u8; byte_len];
        for k in 0..len {
            if booleans[len - 1 - k] {
                packed[byte_len - 1 - k / 8] |= 1 << (k % 8);
            }
        }
        self.buf.put_slice(&packed);
        Ok(())
    }

    fn encode_integer_array(
        &mut self,
        array_len: i64,
        unsigned: bool,
        bit_len: u16,
        value: &Value,
    ) -> Result<(), CodecError> {
        let Value::Array(items) = value else {
            return Err(CodecError::ArityError);
        };
        if array_len >= 0 && items.len() as i64 != array_len {
            return Err(CodecError::LengthMismatch);
        }
        if array_len == -1 {
            self.emit_length_prefix(items.len());
        }
        for item in items {
            self.encode_integer(unsigned, bit_len, item)?;
        }
        Ok(())
    }

    fn encode_object_array(
        &mut self,
        array_len: i64,
        element: &SchemaNode,
        value: &Value,
    ) -> Result<(), CodecError> {
        let Value::Array(items) = value else {
            return Err(CodecError::ArityError);
        };
        if array_len >= 0 && items.len() as i64 != array_len {
            return Err(CodecError::LengthMismatch);
        }
        if array_len == -1 {
            self.emit_length_prefix(items.len());
        }
        for item in items {
            self.encode_value(element, item)?;
        }
        Ok(())
    }

    fn encode_tuple(&mut self, elements: &[SchemaNode], value: &Value) -> Result<(), CodecError> {
        let Value::Tuple(items) = value else {
            return Err(CodecError::ArityError);
        };
        if items.len() != elements.len() {
            return Err(CodecError::ArityError);
        }
        for (schema, item) in elements.iter().zip(items.iter()) {
            self.encode_value(schema, item)?;
        }
        Ok(())
    }
}

pub struct Decoder<'a> {
    remaining: &'a [u8],
    external: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], external: bool) -> Self {
        Decoder {
            remaining: data,
            external,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining.len() < n {
            return Err(CodecError::truncated("value"));
        }
        let (head, tail) = self.remaining.split_at(n);
        self.remaining = tail;
        Ok(head)
    }

    fn take_rlp(&mut self) -> Result<&'a [u8], CodecError> {
        let (payload, rest) = v3_rlp::decode::decode(self.remaining)?;
        self.remaining = rest;
        Ok(payload)
    }

    fn take_length_prefix(&mut self) -> Result<usize, CodecError> {
        let bytes = self.take_rlp()?;
        Ok(be_unsigned(bytes))
    }

    pub fn decode_value(&mut self, schema: &SchemaNode) -> Result<Value, CodecError> {
        match schema {
            SchemaNode::Boolean => self.decode_boolean(),
            SchemaNode::Integer {
                unsigned, bit_len, ..
            } => self.decode_integer(*unsigned, *bit_len),
            SchemaNode::Decimal { .. } => Err(CodecError::Unimplemented),
            SchemaNode::Array {
                array_len,
                element,
                is_string,
                ..
            } => self.decode_array(*array_len, element, *is_string),
            SchemaNode::Tuple { elements, .. } => self.decode_tuple(elements),
            SchemaNode::Byte => unreachable!("Byte only ever appears as an array element type"),
        }
    }

    fn decode_boolean(&mut self) -> Result<Value, CodecError> {
        match self.take(1)?[0] {
            0x00 => Ok(Value::Bool(false)),
            0x01 => Ok(Value::Bool(true)),
            _ => Err(CodecError::BadBoolean),
        }
    }

    fn decode_integer(&mut self, unsigned: bool, bit_len: u16) -> Result<Value, CodecError> {
        let bytes = if self.external {
            self.take_rlp()?
        } else {
            self.take((bit_len / 8) as usize)?
        };
        Ok(Value::Int(BigInt::from_be_bytes(bytes, unsigned)))
    }

    fn decode_array(
        &mut self,
        array_len: i64,
        element: &SchemaNode,
        is_string: bool,
    ) -> Result<Value, CodecError> {
        match element {
            SchemaNode::Byte => self.decode_byte_array(array_len, is_string),
            SchemaNode::Boolean => self.decode_bool_array(array_len),
            SchemaNode::Integer {
                unsigned, bit_len, ..
            } => self.decode_integer_array(array_len, *unsigned, *bit_len),
            _ => self.decode_object_array(array_len, element),
        }
    }

    fn array_length(&mut self, array_len: i64) -> Result<usize, CodecError> {
        if array_len == -1 {
            self.take_length_prefix()
        } else {
            Ok(array_len as usize)
        }
    }

    fn decode_byte_array(&mut self, array_len: i64, is_string: bool) -> Result<Value, CodecError> {
        let len = self.array_length(array_len)?;
        let bytes = self.take(len)?.to_vec();
        if is_string {
            Ok(Value::Str(
                String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?,
            ))
        } else {
            Ok(Value::Bytes(bytes))
        }
    }

    fn decode_bool_array(&mut self, array_len: i64) -> Result<Value, CodecError> {
        let len = self.array_length(array_len)?;
        if len == 0 {
            return Ok(Value::Array(Vec::new()));
        }
        let byte_len = len.div_ceil(8);
        let bytes = self.take(byte_len)?;
        let mut result = vec![false; len];
        for k in 0..len {
            let bit = (bytes[byte_len - 1 - k / 8] >> (k % 8)) & 1;
            result[len - 1 - k] = bit == 1;
        }
        Ok(Value::Array(result.into_iter().map(Value::Bool).collect()))
    }

    fn decode_integer_array(
        &mut self,
        array_len: i64,
        unsigned: bool,
        bit_len: u16,
    ) -> Result<Value, CodecError> {
        let len = self.array_length(array_len)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.decode_integer(unsigned, bit_len)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_object_array(&mut self, array_len: i64, element: &SchemaNode) -> Result<Value, CodecError> {
        let len = self.array_length(array_len)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.decode_value(element)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_tuple(&mut self, elements: &[SchemaNode]) -> Result<Value, CodecError> {
        let mut items = Vec::with_capacity(elements.len());
        for schema in elements {
            items.push(self.decode_value(schema)?);
        }
        Ok(Value::Tuple(items))
    }
}

fn be_unsigned(bytes: &[u8]) -> usize {
    bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize)
}
