//! Reduction operations for [`crate::types::Table`].

use crate::error::{TaskError, TaskResult};
use crate::types::{DataType, Table, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `Ok(None)` if `column` does not exist in the schema.
/// - For `Sum`, returns a zero of the column type if there are no non-null values.
/// - For `Min`/`Max`, returns `Some(Value::Null)` if there are no non-null values.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
/// - `Sum`/`Min`/`Max` over a column holding non-numeric values fail with
///   [`TaskError::NonNumeric`]; integer sums that overflow fail with [`TaskError::Overflow`].
pub fn reduce(table: &Table, column: &str, op: ReduceOp) -> TaskResult<Option<Value>> {
    let Some(idx) = table.schema.index_of(column) else {
        return Ok(None);
    };

    match op {
        ReduceOp::Count => Ok(Some(Value::Int64(table.row_count() as i64))),
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => {
            let data_type = table.schema.fields[idx].data_type;
            if data_type.is_numeric() {
                reduce_numeric(table, idx, column, data_type, op).map(Some)
            } else {
                reduce_non_numeric(table, idx, column, op).map(Some)
            }
        }
    }
}

fn reduce_numeric(
    table: &Table,
    idx: usize,
    column: &str,
    data_type: DataType,
    op: ReduceOp,
) -> TaskResult<Value> {
    match data_type {
        DataType::Int64 => {
            let mut acc: Option<i64> = None;
            for (row0, v) in table.column(idx).enumerate() {
                let v = match v {
                    Value::Null => continue,
                    Value::Int64(v) => *v,
                    other => return Err(non_numeric(column, row0, other)),
                };
                acc = Some(match (op, acc) {
                    (ReduceOp::Sum, Some(a)) => a.checked_add(v).ok_or_else(|| TaskError::Overflow {
                        column: column.to_owned(),
                    })?,
                    (ReduceOp::Min, Some(a)) => a.min(v),
                    (ReduceOp::Max, Some(a)) => a.max(v),
                    (_, None) => v,
                    (ReduceOp::Count, Some(a)) => a,
                });
            }
            Ok(match (op, acc) {
                (_, Some(a)) => Value::Int64(a),
                (ReduceOp::Sum, None) => Value::Int64(0),
                (_, None) => Value::Null,
            })
        }
        // Float64; non-numeric columns never reach this point.
        _ => {
            let mut values: Vec<f64> = Vec::with_capacity(table.row_count());
            for (row0, v) in table.column(idx).enumerate() {
                match v {
                    Value::Null => continue,
                    Value::Float64(v) => values.push(*v),
                    Value::Int64(v) => values.push(*v as f64),
                    other => return Err(non_numeric(column, row0, other)),
                }
            }
            let folded = match op {
                ReduceOp::Sum => return Ok(Value::Float64(exact_sum(&values))),
                ReduceOp::Min => values.iter().copied().reduce(f64::min),
                ReduceOp::Max => values.iter().copied().reduce(f64::max),
                ReduceOp::Count => None,
            };
            Ok(folded.map_or(Value::Null, Value::Float64))
        }
    }
}

/// Only a column of nulls can be aggregated; any other cell cannot be coerced.
fn reduce_non_numeric(table: &Table, idx: usize, column: &str, op: ReduceOp) -> TaskResult<Value> {
    match table
        .column(idx)
        .enumerate()
        .find(|(_, v)| !matches!(v, Value::Null))
    {
        Some((row0, v)) => Err(non_numeric(column, row0, v)),
        None if op == ReduceOp::Sum => Ok(Value::Int64(0)),
        None => Ok(Value::Null),
    }
}

/// Correctly rounded sum of `values` (Shewchuk's non-overlapping partials).
///
/// The result is the exact sum rounded once to the nearest `f64`, so it does not depend on the
/// order of `values`.
pub(crate) fn exact_sum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    let mut special = 0.0_f64;

    for &v in values {
        if !v.is_finite() {
            special += v;
            continue;
        }
        let mut x = v;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            if !hi.is_finite() {
                return hi;
            }
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    if special != 0.0 || special.is_nan() {
        return special;
    }

    let Some(mut n) = partials.len().checked_sub(1) else {
        return 0.0;
    };
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }
    // Round half-even across the remaining partials.
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }
    hi
}

fn non_numeric(column: &str, row0: usize, v: &Value) -> TaskError {
    TaskError::NonNumeric {
        column: column.to_owned(),
        row: row0 + 1,
        raw: v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{exact_sum, reduce, ReduceOp};
    use crate::error::TaskError;
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn numeric_table_with_nulls() -> Table {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("score", DataType::Float64),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Float64(10.0)],
            vec![Value::Int64(2), Value::Null],
            vec![Value::Int64(3), Value::Float64(5.5)],
        ];

        Table::new(schema, rows)
    }

    #[test]
    fn reduce_count_counts_rows() {
        let t = numeric_table_with_nulls();
        assert_eq!(reduce(&t, "score", ReduceOp::Count), Ok(Some(Value::Int64(3))));
    }

    #[test]
    fn reduce_sum_ignores_nulls_and_preserves_type() {
        let t = numeric_table_with_nulls();
        assert_eq!(reduce(&t, "score", ReduceOp::Sum), Ok(Some(Value::Float64(15.5))));
        assert_eq!(reduce(&t, "id", ReduceOp::Sum), Ok(Some(Value::Int64(6))));
    }

    #[test]
    fn reduce_min_max_ignore_nulls() {
        let t = numeric_table_with_nulls();
        assert_eq!(reduce(&t, "score", ReduceOp::Min), Ok(Some(Value::Float64(5.5))));
        assert_eq!(reduce(&t, "score", ReduceOp::Max), Ok(Some(Value::Float64(10.0))));
        assert_eq!(reduce(&t, "id", ReduceOp::Min), Ok(Some(Value::Int64(1))));
        assert_eq!(reduce(&t, "id", ReduceOp::Max), Ok(Some(Value::Int64(3))));
    }

    #[test]
    fn reduce_returns_none_for_missing_column() {
        let t = numeric_table_with_nulls();
        assert_eq!(reduce(&t, "missing", ReduceOp::Count), Ok(None));
        assert_eq!(reduce(&t, "missing", ReduceOp::Sum), Ok(None));
    }

    #[test]
    fn all_null_column_sums_to_zero_and_has_no_extreme() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let t = Table::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&t, "score", ReduceOp::Sum), Ok(Some(Value::Float64(0.0))));
        assert_eq!(reduce(&t, "score", ReduceOp::Min), Ok(Some(Value::Null)));
        assert_eq!(reduce(&t, "score", ReduceOp::Max), Ok(Some(Value::Null)));
    }

    #[test]
    fn text_column_is_not_numeric() {
        let schema = Schema::new(vec![Field::new("Salary", DataType::Utf8)]);
        let t = Table::new(
            schema,
            vec![vec![Value::Null], vec![Value::Utf8("lots".to_string())]],
        );
        assert_eq!(
            reduce(&t, "Salary", ReduceOp::Sum),
            Err(TaskError::NonNumeric {
                column: "Salary".to_string(),
                row: 2,
                raw: "lots".to_string(),
            })
        );
    }

    #[test]
    fn integer_overflow_is_reported() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let t = Table::new(schema, vec![vec![Value::Int64(i64::MAX)], vec![Value::Int64(1)]]);
        assert_eq!(
            reduce(&t, "n", ReduceOp::Sum),
            Err(TaskError::Overflow {
                column: "n".to_string()
            })
        );
    }

    #[test]
    fn float_sum_is_correctly_rounded_in_any_order() {
        let schema = Schema::new(vec![Field::new("Salary", DataType::Float64)]);
        let forward = Table::new(
            schema.clone(),
            vec![vec![Value::Float64(0.1)], vec![Value::Float64(0.2)], vec![Value::Float64(0.3)]],
        );
        let mut reversed = forward.clone();
        reversed.rows.reverse();

        assert_eq!(reduce(&forward, "Salary", ReduceOp::Sum), Ok(Some(Value::Float64(0.6))));
        assert_eq!(reduce(&reversed, "Salary", ReduceOp::Sum), Ok(Some(Value::Float64(0.6))));
    }

    #[test]
    fn exact_sum_keeps_small_terms_next_to_large_ones() {
        assert_eq!(exact_sum(&[1e100, 1.0, -1e100]), 1.0);
        assert_eq!(exact_sum(&[1e16, 1.0, 1e-16]), 10000000000000002.0);
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[f64::INFINITY, 1.0]), f64::INFINITY);
        assert!(exact_sum(&[f64::INFINITY, f64::NEG_INFINITY]).is_nan());
    }
}
