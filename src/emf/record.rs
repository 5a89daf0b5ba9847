//! Record framing.
//!
//! Every record starts with its type and total byte size as little-endian
//! `u32`s. The size counts the 8-byte frame and is always a multiple of 4.

use bytes::{BufMut, Bytes, BytesMut};

/// Size of the type/size frame in front of every record.
pub const FRAME_SIZE: usize = 8;

/// Record types emitted by the writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RecordType {
    Header = 0x01,
    Polyline = 0x04,
    Eof = 0x0E,
    SetBkMode = 0x12,
    SetTextAlign = 0x16,
    SetTextColor = 0x18,
    MoveToEx = 0x1B,
    SelectObject = 0x25,
    DeleteObject = 0x28,
    LineTo = 0x36,
    BeginPath = 0x3B,
    EndPath = 0x3C,
    CloseFigure = 0x3D,
    StrokePath = 0x40,
    ExtCreateFontIndirectW = 0x52,
    ExtTextOutW = 0x54,
    ExtCreatePen = 0x5F,
}

impl RecordType {
    const ALL: [RecordType; 17] = [
        RecordType::Header,
        RecordType::Polyline,
        RecordType::Eof,
        RecordType::SetBkMode,
        RecordType::SetTextAlign,
        RecordType::SetTextColor,
        RecordType::MoveToEx,
        RecordType::SelectObject,
        RecordType::DeleteObject,
        RecordType::LineTo,
        RecordType::BeginPath,
        RecordType::EndPath,
        RecordType::CloseFigure,
        RecordType::StrokePath,
        RecordType::ExtCreateFontIndirectW,
        RecordType::ExtTextOutW,
        RecordType::ExtCreatePen,
    ];

    /// Numeric type code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up a known record type by its code.
    pub fn from_code(code: u32) -> Option<RecordType> {
        RecordType::ALL.iter().copied().find(|kind| kind.code() == code)
    }
}

/// A framed record, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    record_type: RecordType,
    payload: Bytes,
}

impl Record {
    /// Start building a record of the given type.
    pub fn build(record_type: RecordType) -> RecordBuilder {
        RecordBuilder {
            record_type,
            payload: BytesMut::new(),
        }
    }

    /// A record without payload.
    pub fn empty(record_type: RecordType) -> Record {
        Record::build(record_type).finish()
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Payload bytes, padding included.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Total size in bytes, frame included.
    pub fn size(&self) -> usize {
        FRAME_SIZE + self.payload.len()
    }

    /// Append the framed record to `out`.
    pub fn write_to(&self, out: &mut BytesMut) {
        out.reserve(self.size());
        out.put_u32_le(self.record_type.code());
        out.put_u32_le(self.size() as u32);
        out.put_slice(&self.payload);
    }
}

/// Typed little-endian writes into a record payload.
#[derive(Debug)]
pub struct RecordBuilder {
    record_type: RecordType,
    payload: BytesMut,
}

impl RecordBuilder {
    pub fn u8s(mut self, values: &[u8]) -> Self {
        self.payload.put_slice(values);
        self
    }

    pub fn u32s(mut self, values: &[u32]) -> Self {
        for value in values {
            self.payload.put_u32_le(*value);
        }
        self
    }

    pub fn i32s(mut self, values: &[i32]) -> Self {
        for value in values {
            self.payload.put_i32_le(*value);
        }
        self
    }

    pub fn f32s(mut self, values: &[f32]) -> Self {
        for value in values {
            self.payload.put_f32_le(*value);
        }
        self
    }

    pub fn u32(self, value: u32) -> Self {
        self.u32s(&[value])
    }

    /// Pad the payload to a multiple of 4 and seal the record.
    pub fn finish(mut self) -> Record {
        let padding = (4 - self.payload.len() % 4) % 4;
        self.payload.put_bytes(0, padding);
        Record {
            record_type: self.record_type,
            payload: self.payload.freeze(),
        }
    }
}

/// Encode `text` as UTF-16LE in a zero-filled field of `size` bytes,
/// truncating to whole code units.
pub fn utf16_field(text: &str, size: usize) -> Vec<u8> {
    let mut field: Vec<u8> = text
        .encode_utf16()
        .take(size / 2)
        .flat_map(u16::to_le_bytes)
        .collect();
    field.resize(size, 0);
    field
}
