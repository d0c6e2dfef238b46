use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::header::ByteOrder;

/// Stream that decodes integers in the file's byte order
#[derive(Debug)]
pub struct Raw<R> {
    pub byte_order: ByteOrder,
    inner: R,
}

impl<R> Raw<R> {
    /// Starts out little endian until a header has been decoded
    pub fn new(inner: R) -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            inner,
        }
    }
}

impl<R: Seek> Raw<R> {
    pub fn seek_start(&mut self, seek: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(seek))?;
        Ok(())
    }
}

impl<R: Read> Raw<R> {
    pub fn read_exact<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut bytes: [u8; N] = [0; N];
        self.inner.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads exactly `len` bytes
    ///
    /// The buffer only grows with the data actually read, so a corrupt length
    /// does not lead to a huge allocation up front.
    pub fn read_vec(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len).read_to_end(&mut buf)?;

        if u64::try_from(buf.len()).ok() == Some(len) {
            Ok(buf)
        } else {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, got {}", buf.len()),
            ))
        }
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        let bytes = self.read_exact()?;
        Ok(self.byte_order.u16(bytes))
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        let bytes = self.read_exact()?;
        Ok(self.byte_order.u32(bytes))
    }
}

impl<R: Write> Raw<R> {
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn byte_order_reads() {
        let mut raw = Raw::new(Cursor::new(vec![0x01, 0x02, 0x01, 0x02, 0x03, 0x04]));
        raw.byte_order = ByteOrder::BigEndian;
        assert_eq!(raw.read_u16().unwrap(), 0x0102);

        raw.byte_order = ByteOrder::LittleEndian;
        assert_eq!(raw.read_u32().unwrap(), 0x0403_0201);
    }

    #[test]
    fn read_vec_short() {
        let mut raw = Raw::new(Cursor::new(vec![1, 2, 3]));
        let err = raw.read_vec(4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        raw.seek_start(1).unwrap();
        assert_eq!(raw.read_vec(2).unwrap(), vec![2, 3]);
    }
}
