//! Task dispatch: match a free-text instruction against the operations valid for the loaded
//! source's shape and run the first one that fires.
//!
//! Each [`Source`] variant owns its own operation table ([`TABLE_OPERATIONS`],
//! [`TEXT_OPERATIONS`]), so a table operation can never be handed text and vice versa. Within a
//! table, specs are evaluated in order and the first whose trigger occurs in the lower-cased
//! instruction wins; later specs are not consulted even if they would also match.
//!
//! ```rust
//! use source_tasks::dispatch::{dispatch, Outcome};
//! use source_tasks::types::{Source, Text};
//!
//! let source = Source::from(Text::new("apple pie\nbanana split\nApple tart"));
//! match dispatch(&source, "find apple").unwrap() {
//!     Outcome::Lines { lines, .. } => assert_eq!(lines, vec!["apple pie", "Apple tart"]),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod outcome;
mod report;

use crate::error::TaskResult;
use crate::processing::{positions_equal_to, reduce, search_lines, ReduceOp};
use crate::types::{Source, Table, Text, Value};

pub use outcome::Outcome;
pub use report::render_table;

/// Hint attached to [`Outcome::Unrecognized`] for tables.
pub const TABLE_HINT: &str = "Task not recognized or column missing";
/// Hint attached to [`Outcome::Unrecognized`] for text.
pub const TEXT_HINT: &str = "Task not recognized for PDF";

const SALARY: &str = "Salary";
const AGE: &str = "Age";
const FIND: &str = "find";

/// One raw instruction, with a lower-cased copy used only for matching.
#[derive(Debug, Clone)]
pub struct Instruction<'a> {
    raw: &'a str,
    normalized: String,
}

impl<'a> Instruction<'a> {
    pub fn new(raw: &'a str) -> Self {
        // ASCII folding keeps byte offsets identical between `raw` and `normalized`.
        Self {
            raw,
            normalized: raw.to_ascii_lowercase(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// `true` if the lower-case `trigger` occurs anywhere in the instruction.
    pub fn contains(&self, trigger: &str) -> bool {
        self.normalized.contains(trigger)
    }

    /// The original-case instruction with the first case-insensitive occurrence of `trigger`
    /// removed, trimmed. `None` if the trigger does not occur.
    pub fn without_first(&self, trigger: &str) -> Option<String> {
        let start = self.normalized.find(trigger)?;
        let end = start + trigger.len();
        let mut out = String::with_capacity(self.raw.len() - trigger.len());
        out.push_str(&self.raw[..start]);
        out.push_str(&self.raw[end..]);
        Some(out.trim().to_string())
    }
}

/// Handler signature shared by every operation on data of type `D`.
pub type Handler<D> = fn(&D, &Instruction<'_>) -> TaskResult<Outcome>;

/// A recognized task: a lower-case trigger substring bound to a handler for one data shape.
pub struct OperationSpec<D> {
    /// Stable name used in logs.
    pub name: &'static str,
    /// Lower-case substring that selects this operation.
    pub trigger: &'static str,
    pub handler: Handler<D>,
}

impl<D> std::fmt::Debug for OperationSpec<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSpec")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .finish()
    }
}

/// Table operations, in priority order.
pub static TABLE_OPERATIONS: &[OperationSpec<Table>] = &[
    OperationSpec {
        name: "max_salary",
        trigger: "highest salary",
        handler: highest_salary,
    },
    OperationSpec {
        name: "min_age",
        trigger: "lowest age",
        handler: lowest_age,
    },
    OperationSpec {
        name: "sum_salary",
        trigger: "sum salary",
        handler: sum_salary,
    },
];

/// Text operations, in priority order.
pub static TEXT_OPERATIONS: &[OperationSpec<Text>] = &[OperationSpec {
    name: "find_lines",
    trigger: FIND,
    handler: find_lines,
}];

/// Run one instruction against a loaded source.
///
/// Never mutates `source`. Returns [`Outcome::Unrecognized`] when no operation for the
/// source's shape matches; errors only when a matched operation cannot coerce its data.
pub fn dispatch(source: &Source, instruction: &str) -> TaskResult<Outcome> {
    let instruction = Instruction::new(instruction);
    tracing::trace!(shape = ?source.shape(), instruction = instruction.raw(), "dispatching");
    match source {
        Source::Table(table) => run(TABLE_OPERATIONS, table, &instruction, TABLE_HINT),
        Source::Text(text) => run(TEXT_OPERATIONS, text, &instruction, TEXT_HINT),
    }
}

/// The first spec in `specs` whose trigger occurs in `instruction`.
pub fn match_operation<'s, D>(
    specs: &'s [OperationSpec<D>],
    instruction: &Instruction<'_>,
) -> Option<&'s OperationSpec<D>> {
    specs.iter().find(|spec| instruction.contains(spec.trigger))
}

fn run<D>(
    specs: &[OperationSpec<D>],
    data: &D,
    instruction: &Instruction<'_>,
    hint: &'static str,
) -> TaskResult<Outcome> {
    match match_operation(specs, instruction) {
        Some(spec) => {
            tracing::debug!(operation = spec.name, trigger = spec.trigger, "operation matched");
            (spec.handler)(data, instruction)
        }
        None => {
            tracing::debug!(instruction = instruction.raw(), "no operation matched");
            Ok(Outcome::Unrecognized { hint })
        }
    }
}

fn highest_salary(table: &Table, _: &Instruction<'_>) -> TaskResult<Outcome> {
    rows_at_extreme(table, SALARY, ReduceOp::Max, "Highest Salary Row(s)")
}

fn lowest_age(table: &Table, _: &Instruction<'_>) -> TaskResult<Outcome> {
    rows_at_extreme(table, AGE, ReduceOp::Min, "Lowest Age Row(s)")
}

fn sum_salary(table: &Table, _: &Instruction<'_>) -> TaskResult<Outcome> {
    let Some(idx) = table.schema.resolve(SALARY) else {
        return Ok(Outcome::MissingColumn { column: SALARY });
    };
    let value = reduce(table, &table.schema.fields[idx].name, ReduceOp::Sum)?.unwrap_or(Value::Null);
    Ok(Outcome::Scalar {
        label: "Sum of Salary",
        value,
    })
}

fn rows_at_extreme(
    table: &Table,
    column: &'static str,
    op: ReduceOp,
    label: &'static str,
) -> TaskResult<Outcome> {
    let Some(idx) = table.schema.resolve(column) else {
        return Ok(Outcome::MissingColumn { column });
    };
    let target = reduce(table, &table.schema.fields[idx].name, op)?.unwrap_or(Value::Null);
    let index = positions_equal_to(table, idx, &target);
    Ok(Outcome::Rows {
        label,
        table: table.select(&index),
        index,
    })
}

fn find_lines(text: &Text, instruction: &Instruction<'_>) -> TaskResult<Outcome> {
    let keyword = instruction.without_first(FIND).unwrap_or_default();
    let lines = search_lines(text, &keyword);
    Ok(Outcome::Lines { keyword, lines })
}
