use std::io::{Read, Seek};

use crate::error::{Error, Result, ResultExt};
use crate::raw::Raw;

/// Magic number of classic TIFF files
pub const MAGIC_TIFF: u16 = 42;
/// Magic number used by Panasonic RW2 files
pub const MAGIC_RW2: u16 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Interprets the first two header bytes
    pub fn from_mark(mark: [u8; 2]) -> Option<Self> {
        match &mark {
            b"II" => Some(Self::LittleEndian),
            b"MM" => Some(Self::BigEndian),
            _ => None,
        }
    }

    pub fn is_little_endian(self) -> bool {
        self == Self::LittleEndian
    }

    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes(bytes),
            Self::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::LittleEndian => u32::from_le_bytes(bytes),
            Self::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// The first eight bytes of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    pub magic: u16,
    /// Position of IFD0 counted from the start of the file
    pub ifd0_offset: u32,
}

impl TiffHeader {
    pub const LEN: usize = 8;

    /// Parses a header
    ///
    /// The byte order mark is checked first since every following field
    /// depends on it. Both the TIFF magic 42 and the RW2 magic 85 are accepted.
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Result<Self> {
        let [b0, b1, m0, m1, o0, o1, o2, o3] = bytes;

        let byte_order = ByteOrder::from_mark([b0, b1]).ok_or(Error::UnknownByteOrder([b0, b1]))?;

        let magic = byte_order.u16([m0, m1]);
        if magic != MAGIC_TIFF && magic != MAGIC_RW2 {
            return Err(Error::MagicBytesWrong(magic));
        }

        let ifd0_offset = byte_order.u32([o0, o1, o2, o3]);

        Ok(Self {
            byte_order,
            magic,
            ifd0_offset,
        })
    }

    /// Reads the header from the start of the stream
    ///
    /// On success the stream's byte order is switched to the one of the file.
    pub fn decode<R: Read + Seek>(raw: &mut Raw<R>) -> Result<Self> {
        raw.seek_start(0)?;
        let bytes = raw.read_exact().eof_as(Error::HeaderEof)?;
        let header = Self::from_bytes(bytes)?;

        tracing::debug!(
            "TIFF header: {:?}, magic {}, IFD0 at {}",
            header.byte_order,
            header.magic,
            header.ifd0_offset
        );

        raw.byte_order = header.byte_order;

        Ok(header)
    }

    pub fn is_rw2(&self) -> bool {
        self.magic == MAGIC_RW2
    }
}
