//! `source-tasks` loads a single data source into memory, then runs loosely-worded tasks against
//! it.
//!
//! A source is either a [`types::Table`] (CSV, JSON/NDJSON, Parquet, and workbooks with the
//! `excel` feature) or a [`types::Text`] (PDF, plain text). Tasks are free-text instructions
//! matched by substring against a small, fixed set of operations for the source's shape.
//!
//! ## Tasks
//!
//! **Tables:**
//!
//! - `... highest salary ...`: every row at the maximum of the `Salary` column
//! - `... lowest age ...`: every row at the minimum of the `Age` column
//! - `... sum salary ...`: the sum of the `Salary` column
//!
//! **Text:**
//!
//! - `find <keyword>`: every line containing `<keyword>`, case-insensitively
//!
//! Anything else yields [`dispatch::Outcome::Unrecognized`]. A task whose column is absent yields
//! [`dispatch::Outcome::MissingColumn`].
//!
//! ## Quick example
//!
//! ```no_run
//! use source_tasks::loader::LoadOptions;
//! use source_tasks::Session;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::open("staff.csv", &LoadOptions::default())?;
//! println!("{}", session.source().summary());
//! println!("{}", session.dispatch("who has the highest salary?")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`loader`]: unified load entrypoint and format-specific readers
//! - [`types`]: table/text data model
//! - [`processing`]: read-only filter/reduce/search primitives
//! - [`dispatch`]: instruction matching, operation tables and outcomes
//! - [`session`]: the loaded source bound to a dispatch entrypoint
//! - [`error`]: error types for loading and task execution

pub mod dispatch;
pub mod error;
pub mod loader;
pub mod processing;
pub mod session;
pub mod types;

pub use dispatch::{dispatch, Outcome};
pub use error::{ErrorKind, LoadError, LoadResult, TaskError, TaskResult};
pub use session::Session;
