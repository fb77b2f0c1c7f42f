//! Dynamic decoded values
//!
//! The codec decodes into (and encodes from) this tree; typed entities are
//! reached through the serde bridge.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    /// Reserved bytes
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Short name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Any integer variant, widened
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// An ordered set of named values, in layout order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field; names are expected to be unique
    pub fn push(&mut self, name: &'static str, value: Value) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }
}

impl IntoIterator for Record {
    type Item = (&'static str, Value);
    type IntoIter = std::vec::IntoIter<(&'static str, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(&'static str, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'static str, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Bit pattern of a float, for formats that cannot carry NaN or infinities
pub(crate) fn float_bits_text(v: f32) -> String {
    format!("0x{:08X}", v.to_bits())
}

/// Inverse of [`float_bits_text`]
pub(crate) fn float_from_bits_text(text: &str) -> Option<f32> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
    u32::from_str_radix(hex, 16).ok().map(f32::from_bits)
}

// JSON export keeps layout order
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float32(v) if v.is_finite() => serializer.serialize_f32(*v),
            Value::Float32(v) => serializer.serialize_str(&float_bits_text(*v)),
            Value::Bytes(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for b in bytes {
                    seq.serialize_element(b)?;
                }
                seq.end()
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Slot slack captured on decode, keyed by slot index
///
/// Legacy files are not always zero-filled after the last field of a slot.
/// Feeding the residue back to the encoder reproduces those bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Residue {
    slots: BTreeMap<usize, Vec<u8>>,
}

impl Residue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: usize, bytes: Vec<u8>) {
        self.slots.insert(slot, bytes);
    }

    pub fn get(&self, slot: usize) -> Option<&[u8]> {
        self.slots.get(&slot).map(Vec::as_slice)
    }

    /// Number of slots with non-zero slack
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.slots.iter().map(|(slot, bytes)| (*slot, bytes.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lookup() {
        let mut record = Record::new();
        record.push("count", Value::Int16(3));
        record.push("name", Value::Text("Dejenol".into()));

        assert_eq!(record.get("count").and_then(Value::as_int), Some(3));
        assert_eq!(record.get("name").and_then(Value::as_text), Some("Dejenol"));
        assert!(record.get("missing").is_none());
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["count", "name"]);
    }

    #[test]
    fn test_json_keeps_field_order() {
        let record: Record = [
            ("zeta", Value::Int32(-1)),
            ("alpha", Value::Bytes(vec![1, 2])),
            ("mid", Value::List(vec![Value::Float32(0.5)])),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":-1,"alpha":[1,2],"mid":[0.5]}"#);
    }

    #[test]
    fn test_residue() {
        let mut residue = Residue::new();
        assert!(residue.is_empty());
        residue.insert(4, vec![0xCD, 0xCD]);
        assert_eq!(residue.get(4), Some(&[0xCD, 0xCD][..]));
        assert_eq!(residue.get(5), None);
        assert_eq!(residue.len(), 1);
    }
}
