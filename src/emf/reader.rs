//! Walk the records of a serialized metafile.

use bytes::Buf;

use super::record::{FRAME_SIZE, RecordType};
use crate::errors::RenderError;

/// One record borrowed from a serialized stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Byte offset of the record in the stream.
    pub offset: usize,
    pub record_type: u32,
    pub size: u32,
    /// Everything after the 8-byte frame.
    pub payload: &'a [u8],
}

impl<'a> RawRecord<'a> {
    /// The known record type, if any.
    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_code(self.record_type)
    }

    /// Payload word `index` as an unsigned integer.
    pub fn u32_at(&self, index: usize) -> Option<u32> {
        let start = index * 4;
        let mut word = self.payload.get(start..start + 4)?;
        Some(word.get_u32_le())
    }

    /// Payload word `index` as a signed integer.
    pub fn i32_at(&self, index: usize) -> Option<i32> {
        self.u32_at(index).map(|word| word as i32)
    }
}

/// Iterator over the records of a stream.
///
/// Stops after the first malformed record.
#[derive(Clone, Debug)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RecordReader { data, offset: 0 }
    }

    fn read_record(&self) -> Result<RawRecord<'a>, RenderError> {
        let offset = self.offset;
        let truncated = RenderError::TruncatedRecord { offset };

        let mut frame = self.data.get(offset..offset + FRAME_SIZE).ok_or(truncated.clone())?;
        let record_type = frame.get_u32_le();
        let size = frame.get_u32_le();

        let len = size as usize;
        if len < FRAME_SIZE || len % 4 != 0 {
            return Err(truncated);
        }
        let payload = self
            .data
            .get(offset + FRAME_SIZE..offset + len)
            .ok_or(truncated)?;

        Ok(RawRecord {
            offset,
            record_type,
            size,
            payload,
        })
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<RawRecord<'a>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.data.len() {
            return None;
        }
        match self.read_record() {
            Ok(record) => {
                self.offset += record.size as usize;
                Some(Ok(record))
            }
            Err(err) => {
                self.offset = self.data.len();
                Some(Err(err))
            }
        }
    }
}
