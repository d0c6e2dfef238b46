use std::io::{Read, Seek};

use remodel_common::math::*;

use crate::error::{Error, Result, ResultExt};
use crate::header::ByteOrder;
use crate::raw::Raw;
use crate::type_::Type;

const ENTRY_LEN: u32 = 12;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Tag(pub u16);

impl Tag {
    pub const MAKE: Self = Self(0x010F);
    pub const MODEL: Self = Self(0x0110);
}

/// This can either be a value or an offset where to find the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOffset {
    Value(u32),
    Offset(u32),
}

impl ValueOffset {
    /// Values that fit into four bytes are stored inside the entry itself
    ///
    /// A size that overflows can never be inline.
    pub fn new(data_type: Type, count: u32, value: u32) -> Self {
        let inline = data_type
            .size()
            .checked_mul(count)
            .is_some_and(|size| size <= 4);

        if inline {
            Self::Value(value)
        } else {
            Self::Offset(value)
        }
    }

    pub fn u32(&self) -> u32 {
        match self {
            Self::Value(x) => *x,
            Self::Offset(x) => *x,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// A single twelve byte entry of an IFD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Index within the entry table
    pub index: u16,
    /// Absolute position of the entry
    pub position: u32,
    pub tag: Tag,
    pub data_type: Type,
    pub count: u32,
    pub value_offset: ValueOffset,
}

impl IfdEntry {
    pub const LEN: usize = 12;

    /// Decodes the entry with `index` of the table belonging to the IFD at
    /// `ifd_offset`
    pub fn decode(
        byte_order: ByteOrder,
        ifd_offset: u32,
        index: u16,
        bytes: [u8; Self::LEN],
    ) -> Result<Self> {
        let [t0, t1, y0, y1, c0, c1, c2, c3, v0, v1, v2, v3] = bytes;

        let index_u32 = u32::from(index);
        checked![ifd_offset, index_u32];
        // Entry table starts after the two byte entry count
        let position = (ifd_offset + 2_u32 + index_u32 * ENTRY_LEN).check()?;

        let data_type = Type::from(byte_order.u16([y0, y1]));
        let count = byte_order.u32([c0, c1, c2, c3]);
        let value_offset = ValueOffset::new(data_type, count, byte_order.u32([v0, v1, v2, v3]));

        Ok(Self {
            index,
            position,
            tag: Tag(byte_order.u16([t0, t1])),
            data_type,
            count,
            value_offset,
        })
    }

    /// Position of the four value-or-offset bytes
    pub fn value_offset_position(&self) -> Result<u32> {
        Ok(self.position.safe_add(8)?)
    }

    /// Absolute position of the value's bytes
    ///
    /// Inline values live in the entry itself, otherwise the entry holds the
    /// position.
    pub fn value_position(&self) -> Result<u32> {
        match self.value_offset {
            ValueOffset::Value(_) => self.value_offset_position(),
            ValueOffset::Offset(offset) => Ok(offset),
        }
    }

    /// Length of the value in bytes
    pub fn data_len(&self) -> Result<u32> {
        Ok(self.count.safe_mul(self.data_type.size())?)
    }

    /// Reads the complete value
    pub fn read_value<R: Read + Seek>(&self, raw: &mut Raw<R>) -> Result<Vec<u8>> {
        raw.seek_start(self.value_position()?.into())?;
        raw.read_vec(self.data_len()?.into())
            .eof_as(Error::ValueEof)
    }
}

/// Image file directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    pub offset: u32,
    pub entries: Vec<IfdEntry>,
}

impl Ifd {
    /// Reads the entry count and the entry table at `offset`
    pub fn read<R: Read + Seek>(raw: &mut Raw<R>, offset: u32) -> Result<Self> {
        raw.seek_start(offset.into())?;

        let n_entries = raw.read_u16().eof_as(Error::IfdEof)?;
        tracing::debug!("Reading IFD at byte {offset} with {n_entries} entries");

        let table_len = u32::from(n_entries).safe_mul(ENTRY_LEN)?;
        let table = raw
            .read_vec(table_len.into())
            .eof_as(Error::IfdEntriesEof)?;

        let mut entries = Vec::with_capacity(n_entries.into());
        for (index, chunk) in (0..n_entries).zip(table.chunks_exact(IfdEntry::LEN)) {
            let bytes = chunk.try_into().map_err(|_| Error::IfdEntriesEof)?;
            entries.push(IfdEntry::decode(raw.byte_order, offset, index, bytes)?);
        }

        tracing::debug!("All entries in IFD at byte {offset} read");

        Ok(Self { offset, entries })
    }

    /// First entry with `tag` in table order
    pub fn entry(&self, tag: Tag) -> Option<&IfdEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn ifd_data() -> Vec<u8> {
        let mut data = vec![0; 8];
        data.extend_from_slice(&2_u16.to_be_bytes());

        data.extend_from_slice(&0x010F_u16.to_be_bytes());
        data.extend_from_slice(&2_u16.to_be_bytes());
        data.extend_from_slice(&4_u32.to_be_bytes());
        data.extend_from_slice(b"Pan\0");

        data.extend_from_slice(&0x0110_u16.to_be_bytes());
        data.extend_from_slice(&2_u16.to_be_bytes());
        data.extend_from_slice(&6_u32.to_be_bytes());
        data.extend_from_slice(&34_u32.to_be_bytes());

        data.extend_from_slice(b"DC-S9\0");
        data
    }

    #[test]
    fn read_entries() {
        let mut raw = Raw::new(Cursor::new(ifd_data()));
        raw.byte_order = ByteOrder::BigEndian;

        let ifd = Ifd::read(&mut raw, 8).unwrap();
        assert_eq!(ifd.entries.len(), 2);

        let make = ifd.entry(Tag::MAKE).unwrap();
        assert_eq!(make.position, 10);
        assert!(make.value_offset.is_inline());
        assert_eq!(make.value_position().unwrap(), 18);
        assert_eq!(make.read_value(&mut raw).unwrap(), b"Pan\0");

        let model = ifd.entry(Tag::MODEL).unwrap();
        assert_eq!(model.index, 1);
        assert_eq!(model.data_type, Type::Ascii);
        assert_eq!(model.value_offset, ValueOffset::Offset(34));
        assert_eq!(model.read_value(&mut raw).unwrap(), b"DC-S9\0");
    }

    #[test]
    fn truncated_table() {
        let mut data = ifd_data();
        data.truncate(20);
        let mut raw = Raw::new(Cursor::new(data));
        raw.byte_order = ByteOrder::BigEndian;

        assert!(matches!(Ifd::read(&mut raw, 8), Err(Error::IfdEntriesEof)));
        assert!(matches!(Ifd::read(&mut raw, 20), Err(Error::IfdEof)));
    }

    #[test]
    fn value_outside_file() {
        let mut data = ifd_data();
        data.truncate(36);
        let mut raw = Raw::new(Cursor::new(data));
        raw.byte_order = ByteOrder::BigEndian;

        let ifd = Ifd::read(&mut raw, 8).unwrap();
        let model = ifd.entry(Tag::MODEL).unwrap();
        assert!(matches!(model.read_value(&mut raw), Err(Error::ValueEof)));
    }

    #[test]
    fn oversized_entry_is_indirect() {
        assert_eq!(
            ValueOffset::new(Type::Double, 0x2000_0000, 40),
            ValueOffset::Offset(40)
        );
        assert_eq!(ValueOffset::new(Type::Short, 2, 7), ValueOffset::Value(7));
        assert_eq!(ValueOffset::new(Type::Short, 3, 7), ValueOffset::Offset(7));
    }

    #[test]
    fn oversized_entry_before_model() {
        let mut data = vec![0; 8];
        data.extend_from_slice(&2_u16.to_be_bytes());

        data.extend_from_slice(&0x9999_u16.to_be_bytes());
        data.extend_from_slice(&12_u16.to_be_bytes());
        data.extend_from_slice(&0x2000_0000_u32.to_be_bytes());
        data.extend_from_slice(&0_u32.to_be_bytes());

        data.extend_from_slice(&0x0110_u16.to_be_bytes());
        data.extend_from_slice(&2_u16.to_be_bytes());
        data.extend_from_slice(&6_u32.to_be_bytes());
        data.extend_from_slice(&34_u32.to_be_bytes());

        data.extend_from_slice(b"DC-S9\0");

        let mut raw = Raw::new(Cursor::new(data));
        raw.byte_order = ByteOrder::BigEndian;

        let ifd = Ifd::read(&mut raw, 8).unwrap();
        assert!(matches!(ifd.entries[0].data_len(), Err(Error::Math(_))));

        let model = ifd.entry(Tag::MODEL).unwrap();
        assert_eq!(model.read_value(&mut raw).unwrap(), b"DC-S9\0");
    }

    #[test]
    fn position_overflow() {
        let err = IfdEntry::decode(ByteOrder::LittleEndian, u32::MAX, 0, [0; 12]).unwrap_err();
        assert!(matches!(err, Error::Math(_)));
    }
}
