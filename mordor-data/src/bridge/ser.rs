//! `Serialize` types into `Value`

use serde::ser::{self, Impossible, Serialize, Serializer};

use super::BridgeError;
use crate::value::{Record, Value};

fn unsupported(what: &str) -> BridgeError {
    BridgeError(format!("{what} has no MDATA representation"))
}

/// Serializer producing a [`Value`] tree
pub struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = BridgeError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = Impossible<Value, BridgeError>;
    type SerializeTupleVariant = Impossible<Value, BridgeError>;
    type SerializeMap = Impossible<Value, BridgeError>;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = Impossible<Value, BridgeError>;

    fn serialize_bool(self, _v: bool) -> Result<Value, BridgeError> {
        Err(unsupported("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, BridgeError> {
        Ok(Value::Int16(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, BridgeError> {
        Ok(Value::Int16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, BridgeError> {
        Ok(Value::Int32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, BridgeError> {
        Ok(Value::Int64(v))
    }

    // Single bytes only appear inside reserved byte runs
    fn serialize_u8(self, v: u8) -> Result<Value, BridgeError> {
        Ok(Value::Bytes(vec![v]))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, BridgeError> {
        Ok(Value::Int32(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, BridgeError> {
        Ok(Value::Int64(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, BridgeError> {
        i64::try_from(v)
            .map(Value::Int64)
            .map_err(|_| BridgeError(format!("{v} does not fit in Int64")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, BridgeError> {
        Ok(Value::Float32(v))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value, BridgeError> {
        Err(unsupported("f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value, BridgeError> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, BridgeError> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, BridgeError> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, BridgeError> {
        Err(unsupported("a missing value"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, BridgeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, BridgeError> {
        Err(unsupported("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, BridgeError> {
        Err(unsupported(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Value, BridgeError> {
        Err(unsupported(name))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, BridgeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value, BridgeError> {
        Err(unsupported(name))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, BridgeError> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, BridgeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, BridgeError> {
        Err(unsupported(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, BridgeError> {
        Err(unsupported(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, BridgeError> {
        Err(unsupported("a map"))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<RecordBuilder, BridgeError> {
        Ok(RecordBuilder {
            record: Record::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, BridgeError> {
        Err(unsupported(name))
    }
}

/// Collects sequence elements; a run of single bytes becomes one `Bytes` value
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl SeqBuilder {
    fn finish(self) -> Value {
        let all_bytes = !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|item| matches!(item, Value::Bytes(b) if b.len() == 1));
        if all_bytes {
            Value::Bytes(
                self.items
                    .into_iter()
                    .flat_map(|item| match item {
                        Value::Bytes(b) => b,
                        _ => Vec::new(),
                    })
                    .collect(),
            )
        } else {
            Value::List(self.items)
        }
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = BridgeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), BridgeError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, BridgeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = BridgeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), BridgeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, BridgeError> {
        Ok(self.finish())
    }
}

/// Collects struct fields in declaration order
pub struct RecordBuilder {
    record: Record,
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = BridgeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), BridgeError> {
        self.record.push(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, BridgeError> {
        Ok(Value::Record(self.record))
    }
}
