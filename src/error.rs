use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for task execution.
pub type TaskResult<T> = Result<T, TaskError>;

/// Coarse classification shared by load and task failures.
///
/// `MissingColumn` and `Unrecognized` are never errors; they are reported as
/// [`crate::dispatch::Outcome`] variants and only appear here so callers can name every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path does not resolve to a readable file.
    NotFound,
    /// The path's extension is neither a tabular nor a text extension.
    UnsupportedFormat,
    /// A format reader failed, or a value could not be coerced during an aggregate.
    Decode,
    /// A task matched but its required column is absent.
    MissingColumn,
    /// No task pattern matched the instruction.
    Unrecognized,
}

/// Error type returned by the source loaders.
///
/// A single enum shared by every tabular and text reader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "unsupported file type {} for path ({}); only tabular (csv, json, parquet, xlsx) or text (pdf, txt) sources are allowed",
        describe_extension(.extension.as_deref()),
        .path.display()
    )]
    UnsupportedFormat {
        path: PathBuf,
        extension: Option<String>,
    },

    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[cfg(feature = "excel")]
    /// Spreadsheet error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("pdf error: {message}")]
    Pdf { message: String },

    #[error("text is not valid utf-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    /// The file parsed, but its content cannot form a table (duplicate headers, non-object rows...).
    #[error("decode error: {message}")]
    Decode { message: String },
}

fn describe_extension(ext: Option<&str>) -> String {
    match ext {
        Some(e) => format!("'.{e}'"),
        None => "(no extension)".to_string(),
    }
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // An existing but unreadable file is reported the same way as a missing one.
            LoadError::NotFound { .. } | LoadError::Io(_) => ErrorKind::NotFound,
            LoadError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            _ => ErrorKind::Decode,
        }
    }
}

/// Error raised while executing a recognized task.
#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("column '{column}' is not numeric (row {row}: '{raw}')")]
    NonNumeric {
        column: String,
        /// 1-based row number within the table.
        row: usize,
        raw: String,
    },

    #[error("integer overflow while aggregating column '{column}'")]
    Overflow { column: String },
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Decode
    }
}
