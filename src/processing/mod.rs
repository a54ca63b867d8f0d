//! Read-only table and text primitives the dispatcher's operations are built from.
//!
//! - [`filter()`] / [`positions_equal_to()`]: row selection
//! - [`reduce()`]: count/sum/min/max over one column
//! - [`search_lines()`]: case-insensitive line search
//!
//! ## Example: rows at a column maximum
//!
//! ```rust
//! use source_tasks::processing::{positions_equal_to, reduce, ReduceOp};
//! use source_tasks::types::{DataType, Field, Schema, Table, Value};
//!
//! let table = Table::new(
//!     Schema::new(vec![
//!         Field::new("Name", DataType::Utf8),
//!         Field::new("Salary", DataType::Int64),
//!     ]),
//!     vec![
//!         vec![Value::Utf8("A".to_string()), Value::Int64(100)],
//!         vec![Value::Utf8("B".to_string()), Value::Int64(200)],
//!         vec![Value::Utf8("B2".to_string()), Value::Int64(200)],
//!     ],
//! );
//!
//! let max = reduce(&table, "Salary", ReduceOp::Max).unwrap().unwrap();
//! let top = positions_equal_to(&table, 1, &max);
//! assert_eq!(top, vec![1, 2]);
//! assert_eq!(table.select(&top).row_count(), 2);
//! ```

pub mod filter;
pub mod reduce;
pub mod search;

pub use filter::{filter, positions_equal_to};
pub use reduce::{reduce, ReduceOp};
pub use search::search_lines;
