use remodel_common::math::MathError;
use remodel_tiff::Type;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tiff(#[from] remodel_tiff::Error),
    #[error("model tag has unexpected type: {0:?}")]
    UnexpectedType(Type),
    #[error("model tag not found in file")]
    ModelTagNotFound,
    #[error("not a Lumix S9 file (Model: {0})")]
    NotSourceModel(String),
    #[error("new model name too long for field ({field_len} bytes)")]
    FieldTooShort { field_len: u32 },
    #[error("file header damaged after write: {0}")]
    HeaderDamaged(remodel_tiff::Error),
    #[error("written model does not match: found {found}")]
    ModelMismatch { found: String },
    #[error("file size changed from {before} to {after} bytes")]
    SizeChanged { before: u64, after: u64 },
    #[error("too many bytes changed: {changed} (field length {allowed})")]
    TooManyBytesChanged { changed: u64, allowed: u32 },
    #[error("offset out of range: {0}")]
    Math(#[from] MathError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors that are found after data has been written
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::HeaderDamaged(_)
                | Self::ModelMismatch { .. }
                | Self::SizeChanged { .. }
                | Self::TooManyBytesChanged { .. }
        )
    }
}
