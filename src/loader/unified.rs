//! Unified load entrypoint.
//!
//! Most callers should use [`load_from_path`], which turns a file into an in-memory
//! [`crate::types::Source`]: a [`crate::types::Table`] for tabular formats, a
//! [`crate::types::Text`] for documents.
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::{Shape, Source};

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json, parquet, pdf, text};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
    /// PDF document.
    Pdf,
    /// UTF-8 plain text.
    PlainText,
}

impl SourceFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "pdf" => Some(Self::Pdf),
            "txt" | "text" | "log" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// The shape of value this format loads into.
    pub fn shape(self) -> Shape {
        match self {
            Self::Csv | Self::Json | Self::Parquet | Self::Excel => Shape::Table,
            Self::Pdf | Self::PlainText => Shape::Text,
        }
    }
}

/// How to choose sheet(s) when loading a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// Load the first sheet (default).
    #[default]
    First,
    /// Load a single named sheet.
    Sheet(String),
    /// Load all sheets and concatenate rows.
    AllSheets,
    /// Load only the listed sheets (in order) and concatenate rows.
    Sheets(Vec<String>),
}

/// Options controlling [`load_from_path`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<SourceFormat>,
    /// Workbook sheet selection; ignored for other formats.
    pub sheets: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheets", &self.sheets)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheets: SheetSelection::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a file into a [`Source`].
///
/// Checks run in this order: the path must be an existing file ([`LoadError::NotFound`]), then
/// the format must be known ([`LoadError::UnsupportedFormat`]), then the reader runs. No partial
/// value is ever returned.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column/character stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use source_tasks::loader::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), source_tasks::LoadError> {
/// let source = load_from_path("people.csv", &LoadOptions::default())?;
/// println!("{}", source.summary());
/// # Ok(())
/// # }
/// ```
///
/// Forcing a format for a file without a useful extension:
///
/// ```no_run
/// use source_tasks::loader::{load_from_path, LoadOptions, SourceFormat};
///
/// # fn main() -> Result<(), source_tasks::LoadError> {
/// let opts = LoadOptions {
///     format: Some(SourceFormat::PlainText),
///     ..Default::default()
/// };
/// let source = load_from_path("README", &opts)?;
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Source> {
    let path = path.as_ref();
    let format = options.format.or_else(|| infer_format_from_path(path));

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = load_checked(path, format, &options.sheets);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(source) => obs.on_success(&ctx, stats_for(source)),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn load_checked(path: &Path, format: Option<SourceFormat>, sheets: &SheetSelection) -> LoadResult<Source> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = format.ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string()),
    })?;

    tracing::trace!(?format, shape = ?format.shape(), path = %path.display(), "loading source");

    let source: Source = match format {
        SourceFormat::Csv => csv::load_csv_from_path(path)?.into(),
        SourceFormat::Json => json::load_json_from_path(path)?.into(),
        SourceFormat::Parquet => parquet::load_parquet_from_path(path)?.into(),
        SourceFormat::Excel => load_excel_dispatch(path, sheets)?.into(),
        SourceFormat::Pdf => pdf::load_pdf_from_path(path)?.into(),
        SourceFormat::PlainText => text::load_text_from_path(path)?.into(),
    };
    Ok(source)
}

fn stats_for(source: &Source) -> LoadStats {
    match source {
        Source::Table(t) => LoadStats {
            rows: t.row_count(),
            columns: t.column_count(),
            chars: 0,
        },
        Source::Text(t) => LoadStats {
            rows: 0,
            columns: 0,
            chars: t.char_count(),
        },
    }
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::NotFound { .. } | LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::UnsupportedFormat { .. } => LoadSeverity::Error,
        LoadError::Parquet(err) => {
            // Parquet errors often wrap IO, but not always in a structured way.
            if error_chain_contains_io(err) {
                LoadSeverity::Critical
            } else {
                LoadSeverity::Error
            }
        }
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        #[cfg(feature = "excel")]
        LoadError::Excel(_) => LoadSeverity::Error,
        LoadError::Json(_)
        | LoadError::Pdf { .. }
        | LoadError::InvalidText(_)
        | LoadError::Decode { .. } => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn infer_format_from_path(path: &Path) -> Option<SourceFormat> {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(SourceFormat::from_extension)
}

fn load_excel_dispatch(path: &Path, sel: &SheetSelection) -> LoadResult<crate::types::Table> {
    #[cfg(feature = "excel")]
    {
        use super::excel;

        match sel {
            SheetSelection::First => excel::load_excel_from_path(path, None),
            SheetSelection::Sheet(name) => excel::load_excel_from_path(path, Some(name.as_str())),
            SheetSelection::AllSheets => excel::load_excel_workbook_from_path(path, None),
            SheetSelection::Sheets(names) => {
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
                excel::load_excel_workbook_from_path(path, Some(refs.as_slice()))
            }
        }
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = sel;
        Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: path
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string()),
        })
    }
}
