use std::fmt;
use std::path::{Path, PathBuf};

use crate::convert::FileOutcome;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Tally of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub converted: usize,
    pub would_convert: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The first errors up to the configured limit
    pub errors: Vec<FileError>,
    /// Errors that did not fit into `errors`
    pub omitted_errors: usize,
    /// Run was stopped before all files were processed
    pub cancelled: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    max_errors: usize,
}

impl Summary {
    pub fn new(max_errors: usize) -> Self {
        Self {
            max_errors,
            ..Default::default()
        }
    }

    pub fn record(&mut self, path: &Path, result: &Result<FileOutcome>) {
        match result {
            Ok(FileOutcome::Converted { .. }) => self.converted = self.converted.saturating_add(1),
            Ok(FileOutcome::WouldConvert(_)) => {
                self.would_convert = self.would_convert.saturating_add(1)
            }
            Ok(FileOutcome::Skipped) => self.skipped = self.skipped.saturating_add(1),
            Err(err) => {
                self.failed = self.failed.saturating_add(1);
                if self.errors.len() < self.max_errors {
                    self.errors.push(FileError {
                        path: path.to_path_buf(),
                        message: err.to_string(),
                    });
                } else {
                    self.omitted_errors = self.omitted_errors.saturating_add(1);
                }
            }
        }
    }

    /// Number of files that have been processed
    pub fn processed(&self) -> usize {
        self.converted
            .saturating_add(self.would_convert)
            .saturating_add(self.skipped)
            .saturating_add(self.failed)
    }

    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} converted", self.converted)?;
        if self.would_convert > 0 {
            write!(f, ", {} to convert", self.would_convert)?;
        }
        write!(f, ", {} skipped, {} failed", self.skipped, self.failed)?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }

        for error in &self.errors {
            write!(f, "\n - {}: {}", error.path.display(), error.message)?;
        }
        if self.omitted_errors > 0 {
            write!(f, "\n ... and {} more errors", self.omitted_errors)?;
        }

        Ok(())
    }
}
