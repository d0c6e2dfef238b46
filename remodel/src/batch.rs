use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::convert::{convert_file, FileOutcome};
use crate::error::Result;
use crate::options::Options;
use crate::summary::Summary;

/// Reported after each processed file
#[derive(Debug)]
pub struct Progress<'a> {
    /// Files processed so far, including this one
    pub completed: usize,
    pub total: usize,
    pub path: &'a Path,
    pub result: &'a Result<FileOutcome>,
}

/// Converts a list of files one after another
///
/// A failure only affects the file it occurred for, the remaining files are
/// still processed.
#[derive(Debug, Default)]
pub struct Batch {
    options: Options,
    cancel: Arc<AtomicBool>,
}

impl Batch {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            cancel: Arc::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Flag that stops the run when set
    ///
    /// It is only checked between files. A file that is being converted is
    /// always finished first.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn run<P: AsRef<Path>>(
        &self,
        paths: &[P],
        mut on_progress: impl FnMut(&Progress<'_>),
    ) -> Summary {
        let mut summary = Summary::new(self.options.max_reported_errors);
        let total = paths.len();

        for (completed, path) in (1..).zip(paths) {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::info!("Cancelled after {} of {total} files", summary.processed());
                summary.cancelled = true;
                break;
            }

            let path = path.as_ref();
            let _span = tracing::info_span!("file", ?path).entered();

            let result = convert_file(path, &self.options);
            summary.record(path, &result);

            on_progress(&Progress {
                completed,
                total,
                path,
                result: &result,
            });
        }

        summary
    }
}
