//! Enhanced Metafile writer.
//!
//! Only the small subset of records needed for box-and-line diagrams is
//! supported. Records are collected in memory; the header, which has to
//! know the size and count of everything after it, is synthesized by
//! [`Emf::finish`].
//!
//! All coordinates are converted to device pixels using the resolution of
//! the [`Size`] values passed in.

mod reader;
mod record;

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use glam::IVec2;

pub use reader::{RawRecord, RecordReader};
pub use record::{FRAME_SIZE, Record, RecordBuilder, RecordType};

use crate::errors::RenderError;
use crate::size::Size;

/// Size of the header record.
pub const HEADER_SIZE: usize = 124;

/// Size of the end-of-file record.
pub const EOF_SIZE: usize = 20;

/// Offset of the description string inside the header record.
const DESCRIPTION_OFFSET: u32 = 108;

/// Application description stored in the header, NUL terminated.
const DESCRIPTION: &str = "pedtree\0";

/// Number of object handle slots: the reserved one and the pen/font slot.
const HANDLE_COUNT: u16 = 2;

/// Handle used for every created pen and font.
const OBJECT_HANDLE: u32 = 1;

/// Face name used when none is given.
pub const DEFAULT_FONT_FACE: &str = "Times New Roman";

/// Stock objects selected when a pen or font goes out of scope.
pub mod stock {
    pub const NULL_PEN: u32 = 0x8000_0008;
    pub const DEVICE_DEFAULT_FONT: u32 = 0x8000_000E;
}

const PS_GEOMETRIC: u32 = 0x0001_0000;
const TA_BASELINE: u32 = 0x0018;
const GM_COMPATIBLE: u32 = 1;
const HATCH_CROSS: u32 = 6;
const FW_NORMAL: i32 = 400;
const DEFAULT_CHARSET: u8 = 1;

/// Offset of the string in a text record: frame plus the fixed fields.
const TEXT_STRING_OFFSET: u32 = 76;

/// Background fill mode for text and hatched lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundMode {
    Transparent,
    Opaque,
}

impl BackgroundMode {
    pub fn code(self) -> u32 {
        match self {
            BackgroundMode::Transparent => 1,
            BackgroundMode::Opaque => 2,
        }
    }
}

/// Line pattern of a pen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl PenStyle {
    /// Style bits written to the pen record, geometric flag included.
    pub fn code(self) -> u32 {
        let base = match self {
            PenStyle::Solid => 0,
            PenStyle::Dash => 1,
            PenStyle::Dot => 2,
            PenStyle::DashDot => 3,
            PenStyle::DashDotDot => 4,
        };
        base | PS_GEOMETRIC
    }
}

/// Pen parameters. Colors are `0x00BBGGRR`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub style: PenStyle,
    pub width: Size,
    pub color: u32,
}

impl Pen {
    pub fn solid(width: Size, color: u32) -> Self {
        Pen {
            style: PenStyle::Solid,
            width,
            color,
        }
    }
}

/// Horizontal text alignment; text is always aligned on its baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn code(self) -> u32 {
        let horizontal = match self {
            TextAlign::Left => 0x0000,
            TextAlign::Right => 0x0002,
            TextAlign::Center => 0x0006,
        };
        horizontal | TA_BASELINE
    }
}

impl FromStr for TextAlign {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l" => Ok(TextAlign::Left),
            "c" => Ok(TextAlign::Center),
            "r" => Ok(TextAlign::Right),
            other => Err(RenderError::UnknownAlignment {
                mode: other.to_string(),
            }),
        }
    }
}

/// Metafile under construction.
#[derive(Clone, Debug)]
pub struct Emf {
    width: Size,
    height: Size,
    records: Vec<Record>,
}

impl Emf {
    /// Empty picture of the given size.
    pub fn new(width: Size, height: Size) -> Self {
        crate::log::debug!(
            width_px = width.pxf(),
            height_px = height.pxf(),
            dpi = width.dpi(),
            "new metafile"
        );
        Emf {
            width,
            height,
            records: Vec::new(),
        }
    }

    pub fn width(&self) -> Size {
        self.width
    }

    pub fn height(&self) -> Size {
        self.height
    }

    /// Records added so far, header and EOF excluded.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn push(&mut self, record: Record) {
        crate::log::trace!(kind = ?record.record_type(), size = record.size(), "record");
        self.records.push(record);
    }

    pub fn set_bkmode(&mut self, mode: BackgroundMode) {
        self.push(Record::build(RecordType::SetBkMode).u32(mode.code()).finish());
    }

    /// Create and select a pen, run `body`, then release the pen.
    pub fn with_pen<R>(&mut self, pen: &Pen, body: impl FnOnce(&mut Emf) -> R) -> R {
        let width_px = pen.width.pxf().ceil() as u32;
        crate::log::debug!(
            handle = OBJECT_HANDLE,
            style = pen.style.code(),
            width_px,
            color = pen.color,
            "create pen"
        );
        self.push(
            Record::build(RecordType::ExtCreatePen)
                .u32s(&[OBJECT_HANDLE, 0, 0, 0, 0])
                .u32s(&[pen.style.code(), width_px, 0, pen.color, HATCH_CROSS, 0, 0])
                .finish(),
        );
        self.select_object(OBJECT_HANDLE);

        let result = body(self);

        self.select_object(stock::NULL_PEN);
        self.delete_object(OBJECT_HANDLE);
        result
    }

    /// Create and select a font, run `body`, then release the font.
    ///
    /// The font height is negative so that it matches the character height
    /// rather than the cell height.
    pub fn with_font<R>(&mut self, size: Size, face: &str, body: impl FnOnce(&mut Emf) -> R) -> R {
        let height = -(size.px() as i32);
        crate::log::debug!(handle = OBJECT_HANDLE, height, face, "create font");
        self.push(
            Record::build(RecordType::ExtCreateFontIndirectW)
                .u32(OBJECT_HANDLE)
                .i32s(&[height, 0, 0, 0, FW_NORMAL])
                .u8s(&[0, 0, 0, DEFAULT_CHARSET])
                .u8s(&[0, 0, 0, 0])
                .u8s(&record::utf16_field(face, 64))
                .finish(),
        );
        self.select_object(OBJECT_HANDLE);

        let result = body(self);

        self.select_object(stock::DEVICE_DEFAULT_FONT);
        self.delete_object(OBJECT_HANDLE);
        result
    }

    fn select_object(&mut self, handle: u32) {
        self.push(Record::build(RecordType::SelectObject).u32(handle).finish());
    }

    fn delete_object(&mut self, handle: u32) {
        self.push(Record::build(RecordType::DeleteObject).u32(handle).finish());
    }

    /// Connected line segments through `points`.
    ///
    /// An empty point list draws nothing.
    pub fn polyline(&mut self, points: &[(Size, Size)]) {
        let device: Vec<IVec2> = points.iter().map(|&(x, y)| device_point(x, y)).collect();
        let Some(&first) = device.first() else {
            crate::log::warn!("polyline without points");
            return;
        };
        let (min, max) = device
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));

        let mut record = Record::build(RecordType::Polyline)
            .i32s(&[min.x, min.y, max.x, max.y])
            .u32(device.len() as u32);
        for point in &device {
            record = record.i32s(&point.to_array());
        }
        self.push(record.finish());
    }

    /// Outline of a rectangle, drawn as a stroked path.
    pub fn rectangle(&mut self, left: Size, top: Size, right: Size, bottom: Size) {
        let top_left = device_point(left, top);
        let bottom_right = device_point(right, bottom);
        crate::log::trace!(
            left = top_left.x,
            top = top_left.y,
            right = bottom_right.x,
            bottom = bottom_right.y,
            "rectangle"
        );

        self.push(Record::empty(RecordType::BeginPath));
        self.push(Record::build(RecordType::MoveToEx).i32s(&top_left.to_array()).finish());
        for corner in [
            IVec2::new(bottom_right.x, top_left.y),
            bottom_right,
            IVec2::new(top_left.x, bottom_right.y),
        ] {
            self.push(Record::build(RecordType::LineTo).i32s(&corner.to_array()).finish());
        }
        self.push(Record::empty(RecordType::CloseFigure));
        self.push(Record::empty(RecordType::EndPath));
        self.push(Record::build(RecordType::StrokePath).i32s(&[0, 0, -1, -1]).finish());
    }

    /// Alignment for the following text records.
    pub fn text_align(&mut self, align: TextAlign) {
        self.push(Record::build(RecordType::SetTextAlign).u32(align.code()).finish());
    }

    /// Color for the following text records, `0x00BBGGRR`.
    pub fn text_color(&mut self, color: u32) {
        self.push(Record::build(RecordType::SetTextColor).u32(color).finish());
    }

    /// Draw `text` with its reference point at (x, y).
    pub fn text(&mut self, x: Size, y: Size, text: &str) {
        let reference = device_point(x, y);
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut encoded: Vec<u8> = units.iter().flat_map(|unit| unit.to_le_bytes()).collect();
        if encoded.len() % 4 != 0 {
            encoded.extend_from_slice(&[0, 0]);
        }

        self.push(
            Record::build(RecordType::ExtTextOutW)
                .i32s(&[0, 0, -1, -1])
                .u32(GM_COMPATIBLE)
                .f32s(&[1.0, 1.0])
                .i32s(&reference.to_array())
                .u32s(&[units.len() as u32, TEXT_STRING_OFFSET, 0])
                .i32s(&[0, 0, -1, -1])
                .u32(0)
                .u8s(&encoded)
                .finish(),
        );
    }

    /// Serialize the picture: header, every record, then EOF.
    pub fn finish(self) -> Bytes {
        let eof = Record::build(RecordType::Eof)
            .u32s(&[0, 16, EOF_SIZE as u32])
            .finish();
        let body_size: usize = self.records.iter().map(Record::size).sum::<usize>() + eof.size();
        let record_count = self.records.len() + 2;

        let mut out = BytesMut::with_capacity(HEADER_SIZE + body_size);
        self.write_header(&mut out, HEADER_SIZE + body_size, record_count);
        for record in &self.records {
            record.write_to(&mut out);
        }
        eof.write_to(&mut out);
        out.freeze()
    }

    fn write_header(&self, out: &mut BytesMut, total_size: usize, record_count: usize) {
        let bounds_x = self.width.pxf().ceil() as u32;
        let bounds_y = self.height.pxf().ceil() as u32;
        let size_x_mm = self.width.mm().ceil() as u32;
        let size_y_mm = self.height.mm().ceil() as u32;
        crate::log::debug!(
            bounds_x,
            bounds_y,
            size_x_mm,
            size_y_mm,
            total_size,
            record_count,
            "metafile header"
        );

        out.put_u32_le(RecordType::Header.code());
        out.put_u32_le(HEADER_SIZE as u32);
        // bounds in device units, frame in 0.01mm
        for value in [0, 0, bounds_x, bounds_y, 0, 0, size_x_mm * 100, size_y_mm * 100] {
            out.put_u32_le(value);
        }
        out.put_slice(b" EMF");
        out.put_u32_le(0x0001_0000);
        out.put_u32_le(total_size as u32);
        out.put_u32_le(record_count as u32);
        out.put_u16_le(HANDLE_COUNT);
        out.put_u16_le(0);
        let description_len = DESCRIPTION.encode_utf16().count() as u32 - 1;
        for value in [
            description_len,
            DESCRIPTION_OFFSET,
            0, // palette entries
            bounds_x,
            bounds_y,
            size_x_mm,
            size_y_mm,
            0, // pixel format size
            0, // pixel format offset
            0, // no OpenGL
            size_x_mm * 1000,
            size_y_mm * 1000,
        ] {
            out.put_u32_le(value);
        }
        out.put_slice(&record::utf16_field(DESCRIPTION, 16));
    }
}

fn device_point(x: Size, y: Size) -> IVec2 {
    IVec2::new(x.px() as i32, y.px() as i32)
}
