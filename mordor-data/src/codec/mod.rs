//! Schema-driven codec
//!
//! [`Codec`] turns MDATA bytes into a [`Record`] tree and back, following the
//! registered layout of the file kind. It holds only configuration, so one
//! instance can serve many threads.

mod json;
mod read;
mod write;

#[cfg(test)]
mod tests;

use crate::bridge;
use crate::config::CodecConfig;
use crate::cursor::ReadCursor;
use crate::entities::MordorFile;
use crate::error::{Error, ErrorKind, FormatError, Result};
use crate::layout::{FieldKind, Layout};
use crate::schema::{self, FileKind, RecordSchema};
use crate::value::{Record, Residue, Value};

pub(crate) use json::record_from_json;
use read::Decoder;
use write::Encoder;

/// A decoded file: the root record plus the slot slack needed to rebuild it exactly
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
    pub kind: FileKind,
    pub root: Record,
    pub residue: Residue,
}

/// Stateless encoder/decoder for every MDATA file kind
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a whole file from a cursor positioned at its first byte
    pub fn decode(
        &self,
        schema: &RecordSchema,
        cursor: &mut ReadCursor<'_>,
    ) -> std::result::Result<DecodedFile, FormatError> {
        let (root, residue) = Decoder::new(schema, cursor).run(schema.layout)?;

        if !cursor.is_exhausted() {
            let count = cursor.remaining();
            if !self.config.allow_trailing_bytes {
                return Err(FormatError {
                    kind: schema.kind,
                    offset: cursor.position(),
                    reason: ErrorKind::TrailingBytes { count },
                });
            }
            tracing::warn!(kind = %schema.kind, count, "ignoring trailing bytes");
        }

        tracing::debug!(
            kind = %schema.kind,
            bytes = cursor.position(),
            residue_slots = residue.len(),
            "decoded file"
        );
        Ok(DecodedFile {
            kind: schema.kind,
            root,
            residue,
        })
    }

    /// Decode a whole buffer as the given kind
    pub fn decode_bytes(&self, kind: FileKind, bytes: &[u8]) -> Result<DecodedFile> {
        let mut cursor = ReadCursor::new(bytes);
        Ok(self.decode(schema::schema(kind), &mut cursor)?)
    }

    /// Encode a root record into a freshly sized buffer, zero-filling slot slack
    pub fn encode(
        &self,
        schema: &RecordSchema,
        root: &Record,
    ) -> std::result::Result<Vec<u8>, FormatError> {
        self.encode_inner(schema, root, None)
    }

    /// Encode a root record, restoring slot slack captured at decode time
    pub fn encode_with_residue(
        &self,
        schema: &RecordSchema,
        root: &Record,
        residue: &Residue,
    ) -> std::result::Result<Vec<u8>, FormatError> {
        self.encode_inner(schema, root, Some(residue))
    }

    /// Encode a decoded file exactly as it was read
    pub fn encode_decoded(&self, file: &DecodedFile) -> Result<Vec<u8>> {
        let schema = schema::schema(file.kind);
        Ok(self.encode_with_residue(schema, &file.root, &file.residue)?)
    }

    fn encode_inner(
        &self,
        schema: &RecordSchema,
        root: &Record,
        residue: Option<&Residue>,
    ) -> std::result::Result<Vec<u8>, FormatError> {
        let size = write::measure(schema, root)?;
        let padding = self.config.text_padding.byte();
        let bytes = Encoder::new(schema, size, residue, padding).run(schema.layout, root)?;
        tracing::debug!(kind = %schema.kind, bytes = bytes.len(), "encoded file");
        Ok(bytes)
    }

    // =========================================================================
    // Typed entities
    // =========================================================================

    pub fn decode_file<T: MordorFile>(&self, bytes: &[u8]) -> Result<T> {
        self.decode_file_with_residue(bytes).map(|(file, _)| file)
    }

    pub fn decode_file_with_residue<T: MordorFile>(&self, bytes: &[u8]) -> Result<(T, Residue)> {
        let decoded = self.decode_bytes(T::KIND, bytes)?;
        let file = from_record(T::KIND, decoded.root)?;
        Ok((file, decoded.residue))
    }

    pub fn encode_file<T: MordorFile>(&self, file: &T) -> Result<Vec<u8>> {
        let root = to_record(T::KIND, file)?;
        Ok(self.encode(schema::schema(T::KIND), &root)?)
    }

    pub fn encode_file_with_residue<T: MordorFile>(&self, file: &T, residue: &Residue) -> Result<Vec<u8>> {
        let root = to_record(T::KIND, file)?;
        Ok(self.encode_with_residue(schema::schema(T::KIND), &root, residue)?)
    }
}

pub(crate) fn from_record<T: MordorFile>(kind: FileKind, root: Record) -> Result<T> {
    bridge::from_value(Value::Record(root)).map_err(|e| Error::Entity {
        kind,
        message: e.to_string(),
    })
}

pub(crate) fn to_record<T: MordorFile>(kind: FileKind, file: &T) -> Result<Record> {
    match bridge::to_value(file) {
        Ok(Value::Record(record)) => Ok(record),
        Ok(other) => Err(Error::Entity {
            kind,
            message: format!("entity serialized to {} instead of a record", other.type_name()),
        }),
        Err(e) => Err(Error::Entity {
            kind,
            message: e.to_string(),
        }),
    }
}

// =============================================================================
// Blank records
// =============================================================================

/// A zero-valued root record for a file kind
///
/// Text is empty, numbers are zero, fixed arrays have their declared length and
/// counted or trailing arrays are empty.
pub fn blank(kind: FileKind) -> Record {
    blank_record(schema::schema(kind).layout)
}

fn blank_record(layout: &'static Layout) -> Record {
    layout
        .fields
        .iter()
        .map(|field| (field.name, blank_value(field.kind)))
        .collect()
}

fn blank_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::FixedText(_) | FieldKind::VbText(_) => Value::Text(String::new()),
        FieldKind::Int16 => Value::Int16(0),
        FieldKind::Int32 => Value::Int32(0),
        FieldKind::Int64 => Value::Int64(0),
        FieldKind::Float32 => Value::Float32(0.0),
        FieldKind::Int16Array(n) => Value::List(vec![Value::Int16(0); n]),
        FieldKind::Int32Array(n) => Value::List(vec![Value::Int32(0); n]),
        FieldKind::Float32Array(n) => Value::List(vec![Value::Float32(0.0); n]),
        FieldKind::Reserved(n) => Value::Bytes(vec![0; n]),
        FieldKind::SubRecordArray(layout, n) => {
            Value::List(vec![Value::Record(blank_record(layout)); n])
        }
        FieldKind::CountedSubRecordArray(..) | FieldKind::TrailingSubRecordArray(_) => {
            Value::List(Vec::new())
        }
    }
}
