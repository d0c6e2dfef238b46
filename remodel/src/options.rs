use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";
pub const DEFAULT_MAX_REPORTED_ERRORS: usize = 10;

/// How files are changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Change the file itself
    ///
    /// A copy named like the file plus `backup_suffix` is created next to it
    /// and removed once the file has been verified.
    InPlace { backup_suffix: OsString },
    /// Copy the file into `dir` and change the copy
    CopyTo { dir: PathBuf },
}

impl Default for Policy {
    fn default() -> Self {
        Self::InPlace {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub policy: Policy,
    /// Only analyze files, never write
    pub dry_run: bool,
    /// Compare the changed file with the original and fail if more bytes than
    /// the field length differ
    pub check_changed_bytes: bool,
    /// Number of error messages kept in the [`Summary`](crate::Summary)
    pub max_reported_errors: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            dry_run: false,
            check_changed_bytes: true,
            max_reported_errors: DEFAULT_MAX_REPORTED_ERRORS,
        }
    }
}
