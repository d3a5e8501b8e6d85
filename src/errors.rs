//src/errors.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a combine run.
///
/// Per-sample and per-row problems (a missing report file, short rows,
/// non-numeric counts) are absorbed where they occur and never surface here.
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("metadata file not found at '{}'", .0.display())]
    MetadataNotFound(PathBuf),

    #[error("metadata file '{}' has no 'SampleID' column", .0.display())]
    MissingSampleIdColumn(PathBuf),

    #[error("no report files were successfully processed")]
    NoSamplesProcessed,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
