//! Serde bridge between the [`Value`] tree and typed entities
//!
//! `Value` is a serde `Deserializer`, and [`ValueSerializer`](ser::ValueSerializer)
//! turns any `Serialize` type back into a `Value`. Field names on the typed side
//! must match the layout names.

mod de;
mod ser;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::value::Value;

/// Conversion failure between a `Value` and a typed entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BridgeError(String);

impl serde::de::Error for BridgeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        BridgeError(msg.to_string())
    }
}

impl serde::ser::Error for BridgeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        BridgeError(msg.to_string())
    }
}

/// Build a typed value from a decoded tree
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, BridgeError> {
    T::deserialize(value)
}

/// Flatten a typed value into a tree the encoder understands
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, BridgeError> {
    value.serialize(ser::ValueSerializer)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::value::Record;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Slot {
        name: String,
        level: i16,
        price: i64,
        weight: f32,
        stats: Vec<i16>,
        reserved: Vec<u8>,
    }

    fn sample() -> Slot {
        Slot {
            name: "Long Sword".into(),
            level: 3,
            price: 1_500,
            weight: 4.5,
            stats: vec![1, -2, 3],
            reserved: vec![0xAB, 0xCD],
        }
    }

    #[test]
    fn test_to_value_shapes() {
        let value = to_value(&sample()).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.get("level"), Some(&Value::Int16(3)));
        assert_eq!(record.get("price"), Some(&Value::Int64(1_500)));
        assert_eq!(record.get("reserved"), Some(&Value::Bytes(vec![0xAB, 0xCD])));
        assert_eq!(
            record.get("stats"),
            Some(&Value::List(vec![
                Value::Int16(1),
                Value::Int16(-2),
                Value::Int16(3)
            ]))
        );
        assert_eq!(record.names().count(), 6);
    }

    #[test]
    fn test_from_value() {
        let record: Record = [
            ("name", Value::Text("Long Sword".into())),
            ("level", Value::Int16(3)),
            ("price", Value::Int64(1_500)),
            ("weight", Value::Float32(4.5)),
            ("stats", Value::List(vec![Value::Int16(1), Value::Int16(-2), Value::Int16(3)])),
            ("reserved", Value::Bytes(vec![0xAB, 0xCD])),
        ]
        .into_iter()
        .collect();
        let slot: Slot = from_value(Value::Record(record)).unwrap();
        assert_eq!(slot, sample());
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let record: Record = [("name", Value::Text("Dagger".into()))].into_iter().collect();
        let err = from_value::<Slot>(Value::Record(record)).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_wrong_width_is_an_error() {
        #[derive(Debug, Deserialize)]
        struct Narrow {
            #[allow(dead_code)]
            level: i16,
        }
        let record: Record = [("level", Value::Int32(70_000))].into_iter().collect();
        assert!(from_value::<Narrow>(Value::Record(record)).is_err());
    }
}
