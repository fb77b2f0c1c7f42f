//! Layout-driven encoding
//!
//! Encoding happens in two passes: [`measure`] computes the exact output size,
//! then [`Encoder`] fills a pre-sized buffer.

use crate::cursor::{CursorError, WriteCursor, encode_latin1, trim_padding};
use crate::error::{ErrorKind, FormatError};
use crate::layout::{FieldDescriptor, FieldKind, Layout, Placement};
use crate::schema::{FileKind, RecordSchema};
use crate::value::{Record, Residue, Value};

fn mismatch(kind: FileKind, field: &str, expected: &'static str, found: &Value) -> FormatError {
    FormatError {
        kind,
        offset: 0,
        reason: ErrorKind::LayoutMismatch {
            field: field.to_string(),
            expected,
            found: found.type_name().to_string(),
        },
    }
}

fn lookup<'r>(kind: FileKind, record: &'r Record, name: &'static str) -> Result<&'r Value, FormatError> {
    record.get(name).ok_or_else(|| FormatError {
        kind,
        offset: 0,
        reason: ErrorKind::LayoutMismatch {
            field: name.to_string(),
            expected: "a value",
            found: "nothing".to_string(),
        },
    })
}

fn list<'v>(kind: FileKind, field: &str, value: &'v Value) -> Result<&'v [Value], FormatError> {
    value
        .as_list()
        .ok_or_else(|| mismatch(kind, field, "a list", value))
}

/// Reject fields the layout does not declare
fn check_names(kind: FileKind, layout: &Layout, record: &Record) -> Result<(), FormatError> {
    match record.names().find(|name| layout.field(name).is_none()) {
        Some(extra) => Err(FormatError {
            kind,
            offset: 0,
            reason: ErrorKind::LayoutMismatch {
                field: extra.to_string(),
                expected: "no such field",
                found: "a value".to_string(),
            },
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Measuring
// =============================================================================

/// Exact encoded size of a root record
pub(crate) fn measure(schema: &RecordSchema, root: &Record) -> Result<usize, FormatError> {
    let kind = schema.kind;
    let mut total = 0;
    for field in schema.layout.fields {
        let value = lookup(kind, root, field.name)?;
        total += match (field.placement, schema.slot_len()) {
            (Placement::OwnSlot, Some(slot)) => slot,
            (Placement::SlotPerElement, Some(slot)) => match field.kind {
                FieldKind::Int16
                | FieldKind::Int32
                | FieldKind::Int64
                | FieldKind::Float32
                | FieldKind::FixedText(_)
                | FieldKind::VbText(_)
                | FieldKind::Reserved(_) => slot,
                _ => list(kind, field.name, value)?.len() * slot,
            },
            _ => packed_len(kind, field, value)?,
        };
    }
    Ok(total)
}

fn packed_len(kind: FileKind, field: &FieldDescriptor, value: &Value) -> Result<usize, FormatError> {
    if let Some(width) = field.fixed_width() {
        return Ok(width);
    }
    match field.kind {
        FieldKind::VbText(_) => {
            let text = value
                .as_text()
                .ok_or_else(|| mismatch(kind, field.name, "text", value))?;
            Ok(2 + text.chars().count())
        }
        FieldKind::SubRecordArray(layout, _)
        | FieldKind::CountedSubRecordArray(layout, _)
        | FieldKind::TrailingSubRecordArray(layout) => list(kind, field.name, value)?
            .iter()
            .map(|item| {
                let record = item
                    .as_record()
                    .ok_or_else(|| mismatch(kind, field.name, "a record", item))?;
                record_len(kind, layout, record)
            })
            .sum(),
        _ => Ok(field.min_width()),
    }
}

fn record_len(kind: FileKind, layout: &Layout, record: &Record) -> Result<usize, FormatError> {
    if let Some(width) = layout.fixed_width() {
        return Ok(width);
    }
    layout
        .fields
        .iter()
        .map(|field| packed_len(kind, field, lookup(kind, record, field.name)?))
        .sum()
}

// =============================================================================
// Writing
// =============================================================================

/// Walks a schema over a pre-sized write cursor
pub(crate) struct Encoder<'r> {
    kind: FileKind,
    cursor: WriteCursor,
    slot_len: Option<usize>,
    slot_index: usize,
    residue: Option<&'r Residue>,
    padding: u8,
}

impl<'r> Encoder<'r> {
    pub(crate) fn new(
        schema: &RecordSchema,
        capacity: usize,
        residue: Option<&'r Residue>,
        padding: u8,
    ) -> Self {
        Self {
            kind: schema.kind,
            cursor: WriteCursor::with_capacity(capacity),
            slot_len: schema.slot_len(),
            slot_index: 0,
            residue,
            padding,
        }
    }

    pub(crate) fn run(mut self, layout: &'static Layout, root: &Record) -> Result<Vec<u8>, FormatError> {
        check_names(self.kind, layout, root)?;
        for field in layout.fields {
            let value = lookup(self.kind, root, field.name).map_err(|e| self.at_cursor(e))?;
            match field.placement {
                Placement::Packed => self.value(field, value, root)?,
                Placement::OwnSlot => {
                    self.begin_slot()?;
                    self.value(field, value, root)?;
                    self.end_slot();
                }
                Placement::SlotPerElement => self.slotted_elements(field, value, root)?,
            }
        }
        debug_assert_eq!(self.cursor.remaining(), 0, "measured size matches output");
        Ok(self.cursor.into_bytes())
    }

    fn write(
        &mut self,
        op: impl FnOnce(&mut WriteCursor) -> Result<(), CursorError>,
    ) -> Result<(), FormatError> {
        let kind = self.kind;
        op(&mut self.cursor).map_err(|e| e.within(kind))
    }

    fn fail(&self, reason: ErrorKind) -> FormatError {
        FormatError {
            kind: self.kind,
            offset: self.cursor.position(),
            reason,
        }
    }

    fn at_cursor(&self, mut err: FormatError) -> FormatError {
        err.offset = self.cursor.position();
        err
    }

    // =========================================================================
    // Slots
    // =========================================================================

    fn begin_slot(&mut self) -> Result<(), FormatError> {
        let len = self.slot_len.unwrap_or(0);
        self.write(|c| c.begin_slot(len))
    }

    fn end_slot(&mut self) {
        let slack = self.residue.and_then(|r| r.get(self.slot_index));
        let free = self.cursor.slot_slack();
        if let Some(bytes) = slack
            && bytes.len() != free
        {
            tracing::warn!(
                kind = %self.kind,
                slot = self.slot_index,
                residue = bytes.len(),
                free,
                "residue no longer fits its slot, zero-filling"
            );
        }
        self.cursor.finish_slot(slack);
        self.slot_index += 1;
    }

    fn slotted_elements(
        &mut self,
        field: &'static FieldDescriptor,
        value: &Value,
        siblings: &Record,
    ) -> Result<(), FormatError> {
        let items = match field.kind {
            FieldKind::Int16Array(_)
            | FieldKind::Int32Array(_)
            | FieldKind::Float32Array(_)
            | FieldKind::SubRecordArray(..)
            | FieldKind::CountedSubRecordArray(..)
            | FieldKind::TrailingSubRecordArray(_) => {
                list(self.kind, field.name, value).map_err(|e| self.at_cursor(e))?
            }
            _ => {
                self.begin_slot()?;
                self.value(field, value, siblings)?;
                self.end_slot();
                return Ok(());
            }
        };
        self.check_cardinality(field, items.len(), siblings)?;

        for item in items {
            self.begin_slot()?;
            match field.kind {
                FieldKind::Int16Array(_) => self.int16(field.name, item)?,
                FieldKind::Int32Array(_) => self.int32(field.name, item)?,
                FieldKind::Float32Array(_) => self.float32(field.name, item)?,
                FieldKind::SubRecordArray(layout, _)
                | FieldKind::CountedSubRecordArray(layout, _)
                | FieldKind::TrailingSubRecordArray(layout) => self.record(field.name, layout, item)?,
                _ => unreachable!("scalar fields return above"),
            }
            self.end_slot();
        }
        Ok(())
    }

    /// Fixed arrays need their declared length; counted arrays need their count
    fn check_cardinality(
        &self,
        field: &'static FieldDescriptor,
        len: usize,
        siblings: &Record,
    ) -> Result<(), FormatError> {
        if let Some(expected) = field.kind.element_count()
            && expected != len
        {
            return Err(self.fail(ErrorKind::ArrayLength {
                field: field.name,
                expected,
                found: len,
            }));
        }
        if let FieldKind::CountedSubRecordArray(_, count_field) = field.kind {
            let count = lookup(self.kind, siblings, count_field)
                .map_err(|e| self.at_cursor(e))?
                .as_int()
                .ok_or_else(|| {
                    self.fail(ErrorKind::LayoutMismatch {
                        field: count_field.to_string(),
                        expected: "an integer",
                        found: "another type".to_string(),
                    })
                })?;
            if usize::try_from(count).ok() != Some(len) {
                return Err(self.fail(ErrorKind::CountMismatch {
                    field: count_field,
                    count,
                    available: len,
                }));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Packed values
    // =========================================================================

    fn record(&mut self, name: &str, layout: &'static Layout, value: &Value) -> Result<(), FormatError> {
        let record = value
            .as_record()
            .ok_or_else(|| self.at_cursor(mismatch(self.kind, name, "a record", value)))?;
        check_names(self.kind, layout, record).map_err(|e| self.at_cursor(e))?;
        for field in layout.fields {
            let value = lookup(self.kind, record, field.name).map_err(|e| self.at_cursor(e))?;
            self.value(field, value, record)?;
        }
        Ok(())
    }

    fn value(
        &mut self,
        field: &'static FieldDescriptor,
        value: &Value,
        siblings: &Record,
    ) -> Result<(), FormatError> {
        match field.kind {
            FieldKind::FixedText(width) => {
                let encoded = self.latin1(field.name, value)?;
                // Decode drops trailing padding, so it is never written as content
                let bytes = trim_padding(&encoded);
                if bytes.len() > width {
                    return Err(self.fail(ErrorKind::TextOverflow {
                        field: field.name,
                        len: bytes.len(),
                        capacity: width,
                    }));
                }
                let pad = self.padding;
                self.write(|c| c.write_fixed_text(bytes, width, pad))
            }
            FieldKind::VbText(capacity) => {
                let bytes = self.latin1(field.name, value)?;
                if bytes.len() > capacity {
                    return Err(self.fail(ErrorKind::TextOverflow {
                        field: field.name,
                        len: bytes.len(),
                        capacity,
                    }));
                }
                let len = u16::try_from(bytes.len()).map_err(|_| {
                    self.fail(ErrorKind::TextOverflow {
                        field: field.name,
                        len: bytes.len(),
                        capacity: usize::from(u16::MAX),
                    })
                })?;
                self.write(|c| c.write_uint16(len))?;
                self.write(|c| c.write_bytes(&bytes))
            }
            FieldKind::Int16 => self.int16(field.name, value),
            FieldKind::Int32 => self.int32(field.name, value),
            FieldKind::Int64 => self.int64(field.name, value),
            FieldKind::Float32 => self.float32(field.name, value),
            FieldKind::Int16Array(_) | FieldKind::Int32Array(_) | FieldKind::Float32Array(_) => {
                let items = list(self.kind, field.name, value).map_err(|e| self.at_cursor(e))?;
                self.check_cardinality(field, items.len(), siblings)?;
                for item in items {
                    match field.kind {
                        FieldKind::Int16Array(_) => self.int16(field.name, item)?,
                        FieldKind::Int32Array(_) => self.int32(field.name, item)?,
                        _ => self.float32(field.name, item)?,
                    }
                }
                Ok(())
            }
            FieldKind::Reserved(n) => {
                let bytes = match value {
                    Value::Bytes(bytes) => bytes.as_slice(),
                    Value::List(items) if items.is_empty() => &[][..],
                    other => {
                        return Err(self.at_cursor(mismatch(self.kind, field.name, "bytes", other)));
                    }
                };
                if bytes.len() != n {
                    return Err(self.fail(ErrorKind::ArrayLength {
                        field: field.name,
                        expected: n,
                        found: bytes.len(),
                    }));
                }
                self.write(|c| c.write_bytes(bytes))
            }
            FieldKind::SubRecordArray(layout, _)
            | FieldKind::CountedSubRecordArray(layout, _)
            | FieldKind::TrailingSubRecordArray(layout) => {
                let items = list(self.kind, field.name, value).map_err(|e| self.at_cursor(e))?;
                self.check_cardinality(field, items.len(), siblings)?;
                for item in items {
                    self.record(field.name, layout, item)?;
                }
                Ok(())
            }
        }
    }

    fn latin1(&self, name: &'static str, value: &Value) -> Result<Vec<u8>, FormatError> {
        let text = value
            .as_text()
            .ok_or_else(|| self.at_cursor(mismatch(self.kind, name, "text", value)))?;
        encode_latin1(text).map_err(|ch| self.fail(ErrorKind::UnencodableText { field: name, ch }))
    }

    fn integer(&self, name: &'static str, value: &Value, width: &'static str) -> Result<i64, FormatError> {
        value
            .as_int()
            .ok_or_else(|| self.at_cursor(mismatch(self.kind, name, width, value)))
    }

    fn out_of_range(&self, name: &'static str, value: i64, width: &'static str) -> FormatError {
        self.fail(ErrorKind::OutOfRange {
            field: name,
            value,
            width,
        })
    }

    fn int16(&mut self, name: &'static str, value: &Value) -> Result<(), FormatError> {
        let raw = self.integer(name, value, "Int16")?;
        let v = i16::try_from(raw).map_err(|_| self.out_of_range(name, raw, "Int16"))?;
        self.write(|c| c.write_int16(v))
    }

    fn int32(&mut self, name: &'static str, value: &Value) -> Result<(), FormatError> {
        let raw = self.integer(name, value, "Int32")?;
        let v = i32::try_from(raw).map_err(|_| self.out_of_range(name, raw, "Int32"))?;
        self.write(|c| c.write_int32(v))
    }

    fn int64(&mut self, name: &'static str, value: &Value) -> Result<(), FormatError> {
        let v = self.integer(name, value, "Int64")?;
        self.write(|c| c.write_int64(v))
    }

    fn float32(&mut self, name: &'static str, value: &Value) -> Result<(), FormatError> {
        match value {
            Value::Float32(v) => {
                let v = *v;
                self.write(|c| c.write_float32(v))
            }
            other => Err(self.at_cursor(mismatch(self.kind, name, "Float32", other))),
        }
    }
}
