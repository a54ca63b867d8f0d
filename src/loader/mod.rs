//! Source loaders.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`LoadOptions`])
//! - loads the file into an in-memory [`crate::types::Source`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`], [`json`], [`parquet`] (and `excel` with the `excel` feature) for tables
//! - [`pdf`], [`text`] for documents

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod pdf;
pub mod text;
pub mod unified;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use unified::{load_from_path, LoadOptions, SheetSelection, SourceFormat};
