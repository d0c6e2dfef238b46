use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use remodel::{Batch, FileOutcome, Options, Policy};
use tracing_subscriber::prelude::*;

/// Make Lumix S9 raw files show up as DC-S5
///
/// The camera model stored in each file is replaced in place. A backup is kept
/// while a file is changed and restored if anything goes wrong.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// RW2 files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write converted copies into this folder and leave the originals alone
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Appended to the file name of backups
    #[arg(long, default_value = remodel::DEFAULT_BACKUP_SUFFIX)]
    backup_suffix: String,

    /// Only report what would be done
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Skip comparing the converted file with its backup byte by byte
    #[arg(long)]
    no_byte_check: bool,

    /// Maximum number of errors listed in the summary
    #[arg(long, default_value_t = remodel::DEFAULT_MAX_REPORTED_ERRORS)]
    max_errors: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> Options {
        let policy = match &self.output_dir {
            Some(dir) => Policy::CopyTo { dir: dir.clone() },
            None => Policy::InPlace {
                backup_suffix: self.backup_suffix.clone().into(),
            },
        };

        Options {
            policy,
            dry_run: self.dry_run,
            check_changed_bytes: !self.no_byte_check,
            max_reported_errors: self.max_errors,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(
            tracing_subscriber::fmt::Layer::default()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let batch = Batch::new(args.options());
    let summary = batch.run(&args.files, |progress| {
        let status = match progress.result {
            Ok(FileOutcome::Converted { output }) => format!("converted -> {}", output.display()),
            Ok(FileOutcome::WouldConvert(field)) => {
                format!("would convert {} bytes at {}", field.length, field.offset)
            }
            Ok(FileOutcome::Skipped) => String::from("already converted"),
            Err(err) => format!("error: {err}"),
        };
        eprintln!(
            "[{}/{}] {}: {status}",
            progress.completed,
            progress.total,
            progress.path.display()
        );
    });

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!("Could not serialize summary: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{summary}");
    }

    if summary.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
