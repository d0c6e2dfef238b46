use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Copy of a file taken before it is changed
///
/// Dropping a backup leaves the copy on disk. Use [`Backup::restore`] or
/// [`Backup::discard`] to finish it.
#[derive(Debug)]
#[must_use]
pub struct Backup {
    original: PathBuf,
    copy: PathBuf,
}

impl Backup {
    /// Copies `original` to the same path with `suffix` appended
    ///
    /// Existing backups are never overwritten since they might be the only
    /// intact copy left from an earlier run.
    pub fn create(original: &Path, suffix: &OsStr) -> Result<Self> {
        let mut copy = original.as_os_str().to_owned();
        copy.push(suffix);
        let copy = PathBuf::from(copy);

        if copy.try_exists().map_err(Error::open(&copy))? {
            return Err(Error::BackupExists(copy));
        }

        let copied = fs::copy(original, &copy).map_err(|source| Error::Backup {
            path: copy.clone(),
            source,
        })?;
        let size = fs::metadata(original)?.len();
        if copied != size {
            if let Err(err) = fs::remove_file(&copy) {
                tracing::warn!("Could not remove incomplete backup {copy:?}: {err}");
            }
            return Err(Error::Backup {
                path: copy,
                source: std::io::Error::other(format!("copied {copied} of {size} bytes")),
            });
        }

        tracing::debug!("Backup of {original:?} at {copy:?}");

        Ok(Self {
            original: original.to_path_buf(),
            copy,
        })
    }

    pub fn path(&self) -> &Path {
        &self.copy
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Replaces the original with the backup
    pub fn restore(self) -> std::io::Result<()> {
        tracing::warn!("Restoring {:?} from backup", self.original);
        fs::rename(&self.copy, &self.original)
    }

    /// Removes the backup
    pub fn discard(self) -> std::io::Result<()> {
        fs::remove_file(&self.copy)
    }
}
