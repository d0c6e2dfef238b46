//! Converting files on disk
//!
//! [`remodel_rw2`] only knows about streams. This crate adds what is needed to
//! change files safely:
//!
//! - A copy of every file is made before it is written to. If writing or any
//!   of the checks afterwards fail, the copy is put back.
//! - After writing, the header and the new model are read back, the file size
//!   is compared and the number of changed bytes is bounded by the field
//!   length.
//! - [`Batch`] converts many files one after another, reports progress after
//!   every file and can be cancelled between files.

mod backup;
mod batch;
mod convert;
mod error;
mod options;
mod summary;

pub use backup::Backup;
pub use batch::{Batch, Progress};
pub use convert::{analyze_file, convert_file, FileOutcome};
pub use error::{Error, Result};
pub use options::{Options, Policy, DEFAULT_BACKUP_SUFFIX, DEFAULT_MAX_REPORTED_ERRORS};
pub use summary::{FileError, Summary};

pub use remodel_rw2 as rw2;
