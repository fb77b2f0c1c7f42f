//! JSON documents to value trees
//!
//! Conversion follows the layout, so every number lands in its declared width
//! and field names resolve to the layout's own. Floats JSON cannot carry (NaN,
//! infinities) travel as their bit pattern, e.g. `"0x7FC00000"`.

use serde_json::Value as Json;

use crate::error::{ErrorKind, FormatError};
use crate::layout::{FieldKind, Layout};
use crate::schema::FileKind;
use crate::value::{Record, Value, float_from_bits_text};

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

fn mismatch(kind: FileKind, field: &str, expected: &'static str, found: &str) -> FormatError {
    FormatError {
        kind,
        offset: 0,
        reason: ErrorKind::LayoutMismatch {
            field: field.to_string(),
            expected,
            found: found.to_string(),
        },
    }
}

/// Convert a JSON object into a record of `layout`
pub(crate) fn record_from_json(
    kind: FileKind,
    layout: &'static Layout,
    json: &Json,
) -> Result<Record, FormatError> {
    let object = json
        .as_object()
        .ok_or_else(|| mismatch(kind, layout.name, "an object", json_type(json)))?;
    if let Some(extra) = object.keys().find(|key| layout.field(key.as_str()).is_none()) {
        return Err(mismatch(kind, extra, "no such field", "a value"));
    }

    let mut record = Record::with_capacity(layout.fields.len());
    for field in layout.fields {
        let json = object
            .get(field.name)
            .ok_or_else(|| mismatch(kind, field.name, "a value", "nothing"))?;
        record.push(field.name, value_from_json(kind, field.name, field.kind, json)?);
    }
    Ok(record)
}

fn value_from_json(
    kind: FileKind,
    name: &'static str,
    field_kind: FieldKind,
    json: &Json,
) -> Result<Value, FormatError> {
    match field_kind {
        FieldKind::FixedText(_) | FieldKind::VbText(_) => json
            .as_str()
            .map(|text| Value::Text(text.to_string()))
            .ok_or_else(|| mismatch(kind, name, "text", json_type(json))),
        FieldKind::Int16 => {
            let v = integer(kind, name, json, "Int16")?;
            i16::try_from(v)
                .map(Value::Int16)
                .map_err(|_| out_of_range(kind, name, v, "Int16"))
        }
        FieldKind::Int32 => {
            let v = integer(kind, name, json, "Int32")?;
            i32::try_from(v)
                .map(Value::Int32)
                .map_err(|_| out_of_range(kind, name, v, "Int32"))
        }
        FieldKind::Int64 => integer(kind, name, json, "Int64").map(Value::Int64),
        FieldKind::Float32 => float(kind, name, json).map(Value::Float32),
        FieldKind::Int16Array(_) => elements(kind, name, json, |item| {
            value_from_json(kind, name, FieldKind::Int16, item)
        })
        .map(Value::List),
        FieldKind::Int32Array(_) => elements(kind, name, json, |item| {
            value_from_json(kind, name, FieldKind::Int32, item)
        })
        .map(Value::List),
        FieldKind::Float32Array(_) => elements(kind, name, json, |item| {
            float(kind, name, item).map(Value::Float32)
        })
        .map(Value::List),
        FieldKind::Reserved(_) => elements(kind, name, json, |item| {
            let v = integer(kind, name, item, "a byte")?;
            u8::try_from(v).map_err(|_| out_of_range(kind, name, v, "byte"))
        })
        .map(Value::Bytes),
        FieldKind::SubRecordArray(layout, _)
        | FieldKind::CountedSubRecordArray(layout, _)
        | FieldKind::TrailingSubRecordArray(layout) => elements(kind, name, json, |item| {
            record_from_json(kind, layout, item).map(Value::Record)
        })
        .map(Value::List),
    }
}

// Array lengths are left to the encoder, which knows the counts
fn elements<T>(
    kind: FileKind,
    name: &'static str,
    json: &Json,
    convert: impl FnMut(&Json) -> Result<T, FormatError>,
) -> Result<Vec<T>, FormatError> {
    json.as_array()
        .ok_or_else(|| mismatch(kind, name, "an array", json_type(json)))?
        .iter()
        .map(convert)
        .collect()
}

fn integer(
    kind: FileKind,
    name: &'static str,
    json: &Json,
    width: &'static str,
) -> Result<i64, FormatError> {
    json.as_i64()
        .ok_or_else(|| mismatch(kind, name, width, json_type(json)))
}

fn out_of_range(kind: FileKind, name: &'static str, value: i64, width: &'static str) -> FormatError {
    FormatError {
        kind,
        offset: 0,
        reason: ErrorKind::OutOfRange {
            field: name,
            value,
            width,
        },
    }
}

fn float(kind: FileKind, name: &'static str, json: &Json) -> Result<f32, FormatError> {
    match json {
        Json::Number(n) => n
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| mismatch(kind, name, "Float32", "a number")),
        Json::String(text) => float_from_bits_text(text)
            .ok_or_else(|| mismatch(kind, name, "a 0x-prefixed float bit pattern", "a string")),
        other => Err(mismatch(kind, name, "Float32", json_type(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn guild_log_json(day: Json) -> Json {
        serde_json::json!({
            "count": 1,
            "entries": [{
                "character_name": "Zorn",
                "guild": 2,
                "event": 7,
                "level": 11,
                "day": day,
            }],
        })
    }

    #[test]
    fn test_numbers_take_their_layout_width() {
        let layout = schema::schema(FileKind::GuildLogs).layout;
        let record = record_from_json(FileKind::GuildLogs, layout, &guild_log_json(1.5.into())).unwrap();
        assert_eq!(record.get("count"), Some(&Value::Int16(1)));
        let entry = record.get("entries").and_then(Value::as_list).unwrap()[0]
            .as_record()
            .unwrap();
        assert_eq!(entry.get("day"), Some(&Value::Float32(1.5)));
    }

    #[test]
    fn test_float_bit_patterns() {
        let layout = schema::schema(FileKind::GuildLogs).layout;
        let record =
            record_from_json(FileKind::GuildLogs, layout, &guild_log_json("0x7FC00001".into())).unwrap();
        let entry = record.get("entries").and_then(Value::as_list).unwrap()[0]
            .as_record()
            .unwrap();
        match entry.get("day") {
            Some(Value::Float32(day)) => assert_eq!(day.to_bits(), 0x7FC0_0001),
            other => panic!("unexpected day: {other:?}"),
        }

        let err = record_from_json(FileKind::GuildLogs, layout, &guild_log_json(Json::Null)).unwrap_err();
        assert!(matches!(err.reason, ErrorKind::LayoutMismatch { ref field, .. } if field == "day"));
    }

    #[test]
    fn test_rejects_unknown_fields_and_wide_numbers() {
        let layout = schema::schema(FileKind::GuildLogs).layout;
        let err = record_from_json(
            FileKind::GuildLogs,
            layout,
            &serde_json::json!({"count": 0, "entries": [], "extra": 1}),
        )
        .unwrap_err();
        assert!(matches!(err.reason, ErrorKind::LayoutMismatch { ref field, .. } if field == "extra"));

        let err = record_from_json(
            FileKind::GuildLogs,
            layout,
            &serde_json::json!({"count": 40_000, "entries": []}),
        )
        .unwrap_err();
        assert_eq!(
            err.reason,
            ErrorKind::OutOfRange {
                field: "count",
                value: 40_000,
                width: "Int16"
            }
        );
    }
}
