//! Layout-driven decoding

use crate::cursor::{CursorError, ReadCursor};
use crate::error::{ErrorKind, FormatError};
use crate::layout::{FieldDescriptor, FieldKind, Layout, Placement};
use crate::schema::{FileKind, RecordSchema};
use crate::value::{Record, Residue, Value};

/// Walks a schema over a read cursor
pub(crate) struct Decoder<'c, 'a> {
    kind: FileKind,
    cursor: &'c mut ReadCursor<'a>,
    slot_len: Option<usize>,
    slot_index: usize,
    residue: Residue,
}

impl<'c, 'a> Decoder<'c, 'a> {
    pub(crate) fn new(schema: &RecordSchema, cursor: &'c mut ReadCursor<'a>) -> Self {
        Self {
            kind: schema.kind,
            cursor,
            slot_len: schema.slot_len(),
            slot_index: 0,
            residue: Residue::new(),
        }
    }

    /// Decode the root layout
    pub(crate) fn run(mut self, layout: &'static Layout) -> Result<(Record, Residue), FormatError> {
        let mut root = Record::with_capacity(layout.fields.len());
        for field in layout.fields {
            let value = match field.placement {
                Placement::Packed => self.value(field, &root)?,
                Placement::OwnSlot => {
                    self.begin_slot()?;
                    let value = self.value(field, &root)?;
                    self.end_slot();
                    value
                }
                Placement::SlotPerElement => self.slotted_elements(field, &root)?,
            };
            root.push(field.name, value);
        }
        Ok((root, self.residue))
    }

    fn read<T>(
        &mut self,
        op: impl FnOnce(&mut ReadCursor<'a>) -> Result<T, CursorError>,
    ) -> Result<T, FormatError> {
        let kind = self.kind;
        op(&mut *self.cursor).map_err(|e| e.within(kind))
    }

    fn fail(&self, reason: ErrorKind) -> FormatError {
        FormatError {
            kind: self.kind,
            offset: self.cursor.position(),
            reason,
        }
    }

    // =========================================================================
    // Slots
    // =========================================================================

    fn slot(&self) -> usize {
        // Registry validation keeps slotted fields out of slotless files
        self.slot_len.unwrap_or(0)
    }

    fn begin_slot(&mut self) -> Result<(), FormatError> {
        let len = self.slot();
        self.read(|c| c.begin_slot(len))
    }

    fn end_slot(&mut self) {
        let slack = self.cursor.finish_slot();
        if slack.iter().any(|b| *b != 0) {
            tracing::trace!(
                kind = %self.kind,
                slot = self.slot_index,
                bytes = slack.len(),
                "keeping non-zero slot slack"
            );
            self.residue.insert(self.slot_index, slack.to_vec());
        }
        self.slot_index += 1;
    }

    fn slotted_elements(
        &mut self,
        field: &'static FieldDescriptor,
        siblings: &Record,
    ) -> Result<Value, FormatError> {
        let count = match field.kind {
            FieldKind::Int16Array(n)
            | FieldKind::Int32Array(n)
            | FieldKind::Float32Array(n)
            | FieldKind::SubRecordArray(_, n) => n,
            FieldKind::CountedSubRecordArray(_, count_field) => {
                let slot = self.slot().max(1);
                self.count(siblings, count_field, slot)?
            }
            FieldKind::TrailingSubRecordArray(_) => self.trailing_slots()?,
            // A scalar marked per-element occupies a single slot
            _ => {
                self.begin_slot()?;
                let value = self.value(field, siblings)?;
                self.end_slot();
                return Ok(value);
            }
        };

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            self.begin_slot()?;
            let item = match field.kind {
                FieldKind::Int16Array(_) => Value::Int16(self.read(|c| c.read_int16())?),
                FieldKind::Int32Array(_) => Value::Int32(self.read(|c| c.read_int32())?),
                FieldKind::Float32Array(_) => Value::Float32(self.read(|c| c.read_float32())?),
                FieldKind::SubRecordArray(layout, _)
                | FieldKind::CountedSubRecordArray(layout, _)
                | FieldKind::TrailingSubRecordArray(layout) => Value::Record(self.record(layout)?),
                _ => unreachable!("scalar fields return above"),
            };
            self.end_slot();
            items.push(item);
        }
        tracing::trace!(field = field.name, count, "decoded slotted array");
        Ok(Value::List(items))
    }

    /// Whole slots left in the buffer; a partial slot is a truncation
    fn trailing_slots(&self) -> Result<usize, FormatError> {
        let slot = self.slot();
        let remaining = self.cursor.remaining();
        if slot == 0 {
            return Ok(0);
        }
        let whole = remaining / slot;
        let partial = remaining % slot;
        if partial != 0 {
            return Err(FormatError {
                kind: self.kind,
                offset: self.cursor.position() + whole * slot,
                reason: ErrorKind::TruncatedBuffer {
                    needed: slot,
                    remaining: partial,
                },
            });
        }
        Ok(whole)
    }

    /// Validate a count field against the bytes that are left
    fn count(
        &self,
        siblings: &Record,
        count_field: &'static str,
        element_width: usize,
    ) -> Result<usize, FormatError> {
        let raw = siblings
            .get(count_field)
            .and_then(Value::as_int)
            .ok_or_else(|| {
                self.fail(ErrorKind::LayoutMismatch {
                    field: count_field.to_string(),
                    expected: "an earlier integer field",
                    found: "nothing".to_string(),
                })
            })?;
        let available = match element_width {
            0 => usize::MAX,
            width => self.cursor.remaining() / width,
        };
        match usize::try_from(raw) {
            Ok(count) if count <= available => Ok(count),
            _ => Err(self.fail(ErrorKind::CountMismatch {
                field: count_field,
                count: raw,
                available,
            })),
        }
    }

    // =========================================================================
    // Packed values
    // =========================================================================

    fn record(&mut self, layout: &'static Layout) -> Result<Record, FormatError> {
        let mut record = Record::with_capacity(layout.fields.len());
        for field in layout.fields {
            let value = self.value(field, &record)?;
            record.push(field.name, value);
        }
        Ok(record)
    }

    fn value(
        &mut self,
        field: &'static FieldDescriptor,
        siblings: &Record,
    ) -> Result<Value, FormatError> {
        let value = match field.kind {
            FieldKind::FixedText(width) => Value::Text(self.read(|c| c.read_fixed_text(width))?),
            FieldKind::VbText(capacity) => Value::Text(self.vb_text(field.name, capacity)?),
            FieldKind::Int16 => Value::Int16(self.read(|c| c.read_int16())?),
            FieldKind::Int32 => Value::Int32(self.read(|c| c.read_int32())?),
            FieldKind::Int64 => Value::Int64(self.read(|c| c.read_int64())?),
            FieldKind::Float32 => Value::Float32(self.read(|c| c.read_float32())?),
            FieldKind::Int16Array(n) => Value::List(
                (0..n)
                    .map(|_| self.read(|c| c.read_int16()).map(Value::Int16))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::Int32Array(n) => Value::List(
                (0..n)
                    .map(|_| self.read(|c| c.read_int32()).map(Value::Int32))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::Float32Array(n) => Value::List(
                (0..n)
                    .map(|_| self.read(|c| c.read_float32()).map(Value::Float32))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::Reserved(n) => Value::Bytes(self.read(|c| c.read_bytes(n))?.to_vec()),
            FieldKind::SubRecordArray(layout, n) => Value::List(
                (0..n)
                    .map(|_| self.record(layout).map(Value::Record))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::CountedSubRecordArray(layout, count_field) => {
                let count = self.count(siblings, count_field, layout.min_width())?;
                Value::List(
                    (0..count)
                        .map(|_| self.record(layout).map(Value::Record))
                        .collect::<Result<_, _>>()?,
                )
            }
            FieldKind::TrailingSubRecordArray(layout) => {
                let mut items = Vec::new();
                while !self.cursor.is_exhausted() {
                    items.push(Value::Record(self.record(layout)?));
                }
                Value::List(items)
            }
        };
        Ok(value)
    }

    fn vb_text(&mut self, name: &'static str, capacity: usize) -> Result<String, FormatError> {
        let start = self.cursor.position();
        let len = usize::from(self.read(|c| c.read_uint16())?);
        if len > capacity {
            return Err(FormatError {
                kind: self.kind,
                offset: start,
                reason: ErrorKind::TextOverflow {
                    field: name,
                    len,
                    capacity,
                },
            });
        }
        let raw = self.read(|c| c.read_bytes(len))?;
        Ok(crate::cursor::decode_latin1(raw))
    }
}
