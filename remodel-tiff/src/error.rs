use remodel_common::math::MathError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a valid TIFF/RW2 file (byte order mark {0:02x?})")]
    UnknownByteOrder([u8; 2]),
    #[error("could not read TIFF header")]
    HeaderEof,
    #[error("unexpected magic number: {0}")]
    MagicBytesWrong(u16),
    #[error("could not read IFD")]
    IfdEof,
    #[error("could not read IFD entries")]
    IfdEntriesEof,
    #[error("could not read tag value")]
    ValueEof,
    #[error("offset out of range: {0}")]
    Math(#[from] MathError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ResultExt<T> {
    /// Replaces a short read with a more specific error
    ///
    /// All other I/O errors keep their original reason.
    fn eof_as(self, err: Error) -> Result<T>;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn eof_as(self, err: Error) -> Result<T> {
        self.map_err(|io_err| {
            if io_err.kind() == std::io::ErrorKind::UnexpectedEof {
                err
            } else {
                Error::Io(io_err)
            }
        })
    }
}
