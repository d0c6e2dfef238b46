use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use remodel_rw2::{Analysis, ModelField};

use crate::backup::Backup;
use crate::error::{Error, Result};
use crate::options::{Options, Policy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The model was replaced in the file at `output`
    Converted { output: PathBuf },
    /// The file would be converted, nothing was written
    WouldConvert(ModelField),
    /// The file already carries the target model
    Skipped,
}

/// Opens `path` read-only and analyzes it
pub fn analyze_file(path: &Path) -> Result<Analysis> {
    let file = File::open(path).map_err(Error::open(path))?;
    Ok(remodel_rw2::analyze(BufReader::new(file))?)
}

/// Converts a single file
///
/// Runs analysis, writing and all checks. Whenever something fails after the
/// file has been copied, the original state is restored. In case of
/// [`Policy::CopyTo`] the copy is removed instead.
pub fn convert_file(path: &Path, options: &Options) -> Result<FileOutcome> {
    let field = match analyze_file(path)? {
        Analysis::Skip => {
            tracing::info!("{path:?} already converted");
            return Ok(FileOutcome::Skipped);
        }
        Analysis::Convert(field) => field,
    };

    if options.dry_run {
        return Ok(FileOutcome::WouldConvert(field));
    }

    match &options.policy {
        Policy::InPlace { backup_suffix } => {
            convert_in_place(path, backup_suffix, |target, reference| {
                patch_and_verify(target, reference, &field, options)
            })
        }
        Policy::CopyTo { dir } => {
            let name = path
                .file_name()
                .ok_or_else(|| Error::NoFileName(path.to_path_buf()))?;
            let output = dir.join(name);

            if output.try_exists().map_err(Error::open(&output))? {
                return Err(Error::TargetExists(output));
            }

            fs::copy(path, &output).map_err(|source| Error::Copy {
                path: output.clone(),
                source,
            })?;

            match patch_and_verify(&output, path, &field, options) {
                Ok(()) => {
                    tracing::info!("Converted {path:?} into {output:?}");
                    Ok(FileOutcome::Converted { output })
                }
                Err(err) => {
                    log_failure(path, &err);
                    if let Err(rm_err) = fs::remove_file(&output) {
                        tracing::warn!("Could not remove {output:?}: {rm_err}");
                    }
                    Err(err)
                }
            }
        }
    }
}

/// Runs `patch` on `path` with a backup as reference and restores the backup
/// if `patch` fails
fn convert_in_place<F>(path: &Path, backup_suffix: &OsStr, patch: F) -> Result<FileOutcome>
where
    F: FnOnce(&Path, &Path) -> Result<()>,
{
    let backup = Backup::create(path, backup_suffix)?;

    match patch(path, backup.path()) {
        Ok(()) => {
            if let Err(err) = backup.discard() {
                tracing::warn!("Could not remove backup of {path:?}: {err}");
            }
            tracing::info!("Converted {path:?}");
            Ok(FileOutcome::Converted {
                output: path.to_path_buf(),
            })
        }
        Err(err) => {
            log_failure(path, &err);
            match backup.restore() {
                Ok(()) => Err(err),
                Err(source) => Err(Error::Restore {
                    path: path.to_path_buf(),
                    cause: Box::new(err),
                    source,
                }),
            }
        }
    }
}

fn log_failure(path: &Path, err: &Error) {
    match err {
        Error::Rw2(rw2_err) if rw2_err.is_integrity_failure() => {
            tracing::error!("Written file {path:?} failed validation: {err}");
        }
        _ => tracing::warn!("Converting {path:?} failed: {err}"),
    }
}

/// Writes the new model into `target` and checks the result against
/// `reference`, an unchanged copy of the file
fn patch_and_verify(
    target: &Path,
    reference: &Path,
    field: &ModelField,
    options: &Options,
) -> Result<()> {
    let size_before = fs::metadata(reference).map_err(Error::open(reference))?.len();

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(target)
        .map_err(Error::open(target))?;

    remodel_rw2::write(&mut file, field.offset, field.length)?;
    file.sync_all()?;

    remodel_rw2::check(&mut file, field.offset)?;

    let size_after = file.metadata()?.len();
    remodel_rw2::check_size(size_before, size_after)?;

    if options.check_changed_bytes {
        let before = File::open(reference).map_err(Error::open(reference))?;
        file.seek(SeekFrom::Start(0))?;
        remodel_rw2::check_changed_bytes(
            BufReader::new(before),
            BufReader::new(file),
            field.length,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(content: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("P1000001.RW2");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn mismatch() -> Error {
        remodel_rw2::Error::ModelMismatch {
            found: String::from("DC-S9"),
        }
        .into()
    }

    #[test]
    fn failed_check_restores_original() {
        let (dir, path) = setup(b"original");

        let err = convert_in_place(&path, OsStr::new(".bak"), |target, reference| {
            assert_eq!(fs::read(reference).unwrap(), b"original");
            fs::write(target, b"damaged!").unwrap();
            Err(mismatch())
        })
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Rw2(remodel_rw2::Error::ModelMismatch { .. })
        ));
        assert_eq!(fs::read(&path).unwrap(), b"original");
        assert!(!dir.path().join("P1000001.RW2.bak").exists());
    }

    #[test]
    fn failed_restore_keeps_both_errors() {
        let (_dir, path) = setup(b"original");

        let err = convert_in_place(&path, OsStr::new(".bak"), |target, reference| {
            fs::write(target, b"damaged!").unwrap();
            fs::remove_file(reference).unwrap();
            Err(mismatch())
        })
        .unwrap_err();

        let Error::Restore { cause, .. } = &err else {
            panic!("expected restore error, got {err:?}");
        };
        assert!(matches!(
            **cause,
            Error::Rw2(remodel_rw2::Error::ModelMismatch { .. })
        ));
        assert!(err
            .to_string()
            .starts_with("written model does not match: found DC-S9; restoring"));
    }

    #[test]
    fn success_removes_backup() {
        let (dir, path) = setup(b"original");

        let outcome = convert_in_place(&path, OsStr::new(".bak"), |target, _| {
            fs::write(target, b"patched!").unwrap();
            Ok(())
        })
        .unwrap();

        assert_eq!(
            outcome,
            FileOutcome::Converted {
                output: path.clone()
            }
        );
        assert_eq!(fs::read(&path).unwrap(), b"patched!");
        assert!(!dir.path().join("P1000001.RW2.bak").exists());
    }
}
