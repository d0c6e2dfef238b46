use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not create backup {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not copy to {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("backup {} already exists", .0.display())]
    BackupExists(PathBuf),
    #[error("{} already exists", .0.display())]
    TargetExists(PathBuf),
    #[error("{cause}; restoring {} from backup failed: {source}", .path.display())]
    Restore {
        path: PathBuf,
        cause: Box<Error>,
        source: std::io::Error,
    },
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error(transparent)]
    Rw2(#[from] remodel_rw2::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn open(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Open { path, source }
    }
}
