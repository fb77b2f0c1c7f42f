//! Codec error types

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FileKind;

/// Why a buffer could not be decoded or a record could not be encoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A read would run past the end of the buffer or the current slot
    #[error("truncated buffer: needed {needed} bytes, {remaining} remaining")]
    TruncatedBuffer { needed: usize, remaining: usize },

    /// A write would run past the pre-sized output or the current slot
    #[error("buffer overrun: writing {needed} bytes with {capacity} left")]
    BufferOverrun { needed: usize, capacity: usize },

    /// A count field disagrees with the array it governs
    #[error("count field `{field}` holds {count} but {available} entries are available")]
    CountMismatch {
        field: &'static str,
        count: i64,
        available: usize,
    },

    /// Text longer than the field's capacity
    #[error("text in `{field}` is {len} bytes, capacity is {capacity}")]
    TextOverflow {
        field: &'static str,
        len: usize,
        capacity: usize,
    },

    /// Text containing a character outside Latin-1
    #[error("text in `{field}` contains {ch:?}, which has no Latin-1 encoding")]
    UnencodableText { field: &'static str, ch: char },

    /// A record value does not have the shape its layout demands
    #[error("field `{field}`: expected {expected}, found {found}")]
    LayoutMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// An integer does not fit the declared field width
    #[error("field `{field}`: {value} does not fit in {width}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        width: &'static str,
    },

    /// A fixed-length array has the wrong number of elements
    #[error("field `{field}`: expected {expected} elements, found {found}")]
    ArrayLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Bytes left over after every field was decoded
    #[error("{count} trailing bytes after the last field")]
    TrailingBytes { count: usize },
}

/// A structural failure inside one file, with the byte offset where it happened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}: {reason}")]
pub struct FormatError {
    pub kind: FileKind,
    pub offset: usize,
    pub reason: ErrorKind,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// No schema is registered for the numeric kind
    #[error("no schema registered for file kind {0}")]
    SchemaNotFound(u8),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// A decoded record does not convert to (or from) its typed entity
    #[error("{kind}: record does not match its entity: {message}")]
    Entity { kind: FileKind, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    /// The structural failure reason, if this is a format error
    pub fn format_reason(&self) -> Option<&ErrorKind> {
        match self {
            Error::Format(err) => Some(&err.reason),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for crate results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError {
            kind: FileKind::Monsters,
            offset: 480,
            reason: ErrorKind::TruncatedBuffer {
                needed: 160,
                remaining: 12,
            },
        };
        assert_eq!(
            err.to_string(),
            "MDATA5 (monsters) at byte 480: truncated buffer: needed 160 bytes, 12 remaining"
        );

        assert_eq!(
            Error::SchemaNotFound(16).to_string(),
            "no schema registered for file kind 16"
        );
    }

    #[test]
    fn test_format_reason() {
        let err: Error = FormatError {
            kind: FileKind::GuildLogs,
            offset: 0,
            reason: ErrorKind::TrailingBytes { count: 3 },
        }
        .into();
        assert_eq!(
            err.format_reason(),
            Some(&ErrorKind::TrailingBytes { count: 3 })
        );
        assert!(Error::SchemaNotFound(0).format_reason().is_none());
    }
}
