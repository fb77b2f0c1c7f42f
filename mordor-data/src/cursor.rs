//! Bounds-checked little-endian cursors over MDATA buffers
//!
//! Both cursors understand record slots: while a slot is open, reads and writes
//! are confined to it, and closing the slot skips (or fills) whatever the
//! fields did not cover.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{ErrorKind, FormatError};
use crate::schema::FileKind;

/// A cursor failure at an absolute buffer offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorError {
    pub offset: usize,
    pub reason: ErrorKind,
}

impl CursorError {
    /// Attach the file kind being processed
    pub fn within(self, kind: FileKind) -> FormatError {
        FormatError {
            kind,
            offset: self.offset,
            reason: self.reason,
        }
    }
}

type CursorResult<T> = Result<T, CursorError>;

// =============================================================================
// Reading
// =============================================================================

/// Read cursor over an immutable byte buffer
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            limit: buf.len(),
        }
    }

    /// Absolute offset of the next byte
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes readable before the end of the buffer (or of the open slot)
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> CursorResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CursorError {
                offset: self.pos,
                reason: ErrorKind::TruncatedBuffer {
                    needed: n,
                    remaining: self.remaining(),
                },
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_bytes(&mut self, n: usize) -> CursorResult<&'a [u8]> {
        self.take(n)
    }

    pub fn read_int16(&mut self) -> CursorResult<i16> {
        self.take(2).map(LittleEndian::read_i16)
    }

    pub fn read_uint16(&mut self) -> CursorResult<u16> {
        self.take(2).map(LittleEndian::read_u16)
    }

    pub fn read_int32(&mut self) -> CursorResult<i32> {
        self.take(4).map(LittleEndian::read_i32)
    }

    pub fn read_int64(&mut self) -> CursorResult<i64> {
        self.take(8).map(LittleEndian::read_i64)
    }

    pub fn read_float32(&mut self) -> CursorResult<f32> {
        self.take(4).map(LittleEndian::read_f32)
    }

    /// Read a fixed-width Latin-1 field, dropping trailing NUL and space padding
    pub fn read_fixed_text(&mut self, width: usize) -> CursorResult<String> {
        let raw = self.take(width)?;
        Ok(decode_latin1(trim_padding(raw)))
    }

    /// Open a slot of `len` bytes at the current position
    ///
    /// The whole slot must be present; a partial slot is reported at its first byte.
    pub fn begin_slot(&mut self, len: usize) -> CursorResult<()> {
        debug_assert_eq!(self.limit, self.buf.len(), "slots do not nest");
        if len > self.remaining() {
            return Err(CursorError {
                offset: self.pos,
                reason: ErrorKind::TruncatedBuffer {
                    needed: len,
                    remaining: self.remaining(),
                },
            });
        }
        self.limit = self.pos + len;
        Ok(())
    }

    /// Close the open slot and return the bytes the fields did not consume
    pub fn finish_slot(&mut self) -> &'a [u8] {
        let slack = &self.buf[self.pos..self.limit];
        self.pos = self.limit;
        self.limit = self.buf.len();
        slack
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Write cursor over a pre-sized, zero-filled output buffer
#[derive(Debug)]
pub struct WriteCursor {
    buf: Vec<u8>,
    pos: usize,
    limit: usize,
}

impl WriteCursor {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: 0,
            limit: capacity,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes writable before the end of the buffer (or of the open slot)
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    fn reserve(&mut self, n: usize) -> CursorResult<&mut [u8]> {
        if n > self.remaining() {
            return Err(CursorError {
                offset: self.pos,
                reason: ErrorKind::BufferOverrun {
                    needed: n,
                    capacity: self.remaining(),
                },
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&mut self.buf[start..start + n])
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> CursorResult<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_int16(&mut self, value: i16) -> CursorResult<()> {
        LittleEndian::write_i16(self.reserve(2)?, value);
        Ok(())
    }

    pub fn write_uint16(&mut self, value: u16) -> CursorResult<()> {
        LittleEndian::write_u16(self.reserve(2)?, value);
        Ok(())
    }

    pub fn write_int32(&mut self, value: i32) -> CursorResult<()> {
        LittleEndian::write_i32(self.reserve(4)?, value);
        Ok(())
    }

    pub fn write_int64(&mut self, value: i64) -> CursorResult<()> {
        LittleEndian::write_i64(self.reserve(8)?, value);
        Ok(())
    }

    pub fn write_float32(&mut self, value: f32) -> CursorResult<()> {
        LittleEndian::write_f32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write already-encoded Latin-1 text into a field of `width` bytes, padded with `pad`
    pub fn write_fixed_text(&mut self, text: &[u8], width: usize, pad: u8) -> CursorResult<()> {
        if text.len() > width {
            return Err(CursorError {
                offset: self.pos,
                reason: ErrorKind::BufferOverrun {
                    needed: text.len(),
                    capacity: width,
                },
            });
        }
        let field = self.reserve(width)?;
        field[..text.len()].copy_from_slice(text);
        field[text.len()..].fill(pad);
        Ok(())
    }

    /// Open a slot of `len` bytes at the current position
    pub fn begin_slot(&mut self, len: usize) -> CursorResult<()> {
        debug_assert_eq!(self.limit, self.buf.len(), "slots do not nest");
        if len > self.remaining() {
            return Err(CursorError {
                offset: self.pos,
                reason: ErrorKind::BufferOverrun {
                    needed: len,
                    capacity: self.remaining(),
                },
            });
        }
        self.limit = self.pos + len;
        Ok(())
    }

    /// Close the open slot
    ///
    /// The unwritten tail stays zero unless `slack` has exactly its length, in
    /// which case it is copied in. Returns whether `slack` was applied.
    pub fn finish_slot(&mut self, slack: Option<&[u8]>) -> bool {
        let tail = &mut self.buf[self.pos..self.limit];
        let applied = match slack {
            Some(bytes) if bytes.len() == tail.len() => {
                tail.copy_from_slice(bytes);
                true
            }
            _ => false,
        };
        self.pos = self.limit;
        self.limit = self.buf.len();
        applied
    }

    /// Length of the unwritten tail of the open slot
    pub fn slot_slack(&self) -> usize {
        self.remaining()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// =============================================================================
// Latin-1 Text
// =============================================================================

/// Strip the trailing NUL and space bytes that pad fixed-width text
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != 0 && *b != b' ')
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Decode Latin-1 bytes; every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}

/// Encode text as Latin-1, failing on the first character above U+00FF
pub fn encode_latin1(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).map_err(|_| ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars_little_endian() {
        let data = [
            0x34, 0x12, // i16
            0x78, 0x56, 0x34, 0x12, // i32
            0x00, 0x00, 0x80, 0x3F, // f32 1.0
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // i64 -1
        ];
        let mut cursor = ReadCursor::new(&data);
        assert_eq!(cursor.read_int16().unwrap(), 0x1234);
        assert_eq!(cursor.read_int32().unwrap(), 0x1234_5678);
        assert_eq!(cursor.read_float32().unwrap(), 1.0);
        assert_eq!(cursor.read_int64().unwrap(), -1);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_read_past_end() {
        let data = [1, 2, 3];
        let mut cursor = ReadCursor::new(&data);
        cursor.read_int16().unwrap();
        let err = cursor.read_int16().unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(
            err.reason,
            ErrorKind::TruncatedBuffer {
                needed: 2,
                remaining: 1
            }
        );
        // A failed read does not move the cursor
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_fixed_text_trims_padding() {
        let data = *b"Gandalf\0   ";
        let mut cursor = ReadCursor::new(&data);
        assert_eq!(cursor.read_fixed_text(data.len()).unwrap(), "Gandalf");

        let blank = [0u8; 8];
        let mut cursor = ReadCursor::new(&blank);
        assert_eq!(cursor.read_fixed_text(8).unwrap(), "");
    }

    #[test]
    fn test_slot_confines_reads() {
        let data = [1, 0, 0xAA, 0xBB, 2, 0];
        let mut cursor = ReadCursor::new(&data);

        cursor.begin_slot(4).unwrap();
        assert_eq!(cursor.read_int16().unwrap(), 1);
        assert_eq!(cursor.remaining(), 2);
        assert!(cursor.read_int32().is_err());
        assert_eq!(cursor.finish_slot(), &[0xAA, 0xBB]);

        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.read_int16().unwrap(), 2);
    }

    #[test]
    fn test_partial_slot_reports_slot_start() {
        let data = [0u8; 10];
        let mut cursor = ReadCursor::new(&data);
        cursor.begin_slot(6).unwrap();
        cursor.finish_slot();

        let err = cursor.begin_slot(6).unwrap_err();
        assert_eq!(err.offset, 6);
        assert_eq!(
            err.reason,
            ErrorKind::TruncatedBuffer {
                needed: 6,
                remaining: 4
            }
        );
    }

    #[test]
    fn test_write_overrun() {
        let mut cursor = WriteCursor::with_capacity(3);
        cursor.write_int16(7).unwrap();
        let err = cursor.write_int16(8).unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(
            err.reason,
            ErrorKind::BufferOverrun {
                needed: 2,
                capacity: 1
            }
        );
    }

    #[test]
    fn test_write_slot_slack() {
        let mut cursor = WriteCursor::with_capacity(8);
        cursor.begin_slot(4).unwrap();
        cursor.write_int16(-2).unwrap();
        assert!(cursor.finish_slot(Some(&[9, 9])));

        cursor.begin_slot(4).unwrap();
        cursor.write_int16(3).unwrap();
        // Wrong-length slack is ignored; the tail stays zero
        assert!(!cursor.finish_slot(Some(&[1, 2, 3])));

        assert_eq!(cursor.into_bytes(), vec![0xFE, 0xFF, 9, 9, 3, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_text_padding() {
        let mut cursor = WriteCursor::with_capacity(12);
        cursor.write_fixed_text(b"Orc", 6, b' ').unwrap();
        cursor.write_fixed_text(b"Elf", 6, 0).unwrap();
        assert_eq!(cursor.into_bytes(), b"Orc   Elf\0\0\0".to_vec());
    }

    #[test]
    fn test_uint16_length_prefix() {
        let data = [0xFE, 0xFF];
        let mut cursor = ReadCursor::new(&data);
        assert_eq!(cursor.read_uint16().unwrap(), 0xFFFE);

        let mut cursor = WriteCursor::with_capacity(2);
        cursor.write_uint16(0xFFFE).unwrap();
        assert_eq!(cursor.into_bytes(), data.to_vec());
    }

    #[test]
    fn test_trim_padding() {
        assert_eq!(trim_padding(b"Zorn\0 \0"), b"Zorn");
        assert_eq!(trim_padding(b"Two Words  "), b"Two Words");
        assert_eq!(trim_padding(b"\0\0  "), b"");
    }

    #[test]
    fn test_latin1() {
        assert_eq!(decode_latin1(&[0x43, 0x61, 0x66, 0xE9]), "Café");
        assert_eq!(encode_latin1("Café").unwrap(), vec![0x43, 0x61, 0x66, 0xE9]);
        assert_eq!(encode_latin1("Dragon \u{2694}"), Err('\u{2694}'));
    }
}
