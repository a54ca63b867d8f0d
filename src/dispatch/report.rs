//! Plain-text rendering of tables for reports.

use crate::types::Table;

const GAP: &str = "  ";

/// Render `table` as right-aligned columns under a header line.
///
/// Row `i` is labelled `index[i]` (its position in the table it was selected from), or `i` when
/// `index` is shorter than the table.
pub fn render_table(table: &Table, index: &[usize]) -> String {
    let labels: Vec<String> = (0..table.row_count())
        .map(|i| index.get(i).copied().unwrap_or(i).to_string())
        .collect();
    let index_width = labels.iter().map(String::len).max().unwrap_or(1);

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(col, field)| {
            cells
                .iter()
                .filter_map(|row| row.get(col))
                .map(|c| c.chars().count())
                .chain(std::iter::once(field.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);

    let mut header = " ".repeat(index_width);
    for (field, width) in table.schema.fields.iter().zip(&widths) {
        header.push_str(GAP);
        push_right_aligned(&mut header, &field.name, *width);
    }
    lines.push(header);

    for (label, row) in labels.iter().zip(&cells) {
        let mut line = String::new();
        push_right_aligned(&mut line, label, index_width);
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(GAP);
            push_right_aligned(&mut line, cell, *width);
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn push_right_aligned(out: &mut String, s: &str, width: usize) {
    let len = s.chars().count();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out.push_str(s);
}

#[cfg(test)]
mod tests {
    use super::render_table;
    use crate::types::{DataType, Field, Schema, Table, Value};

    #[test]
    fn columns_are_right_aligned_under_headers() {
        let t = Table::new(
            Schema::new(vec![
                Field::new("Name", DataType::Utf8),
                Field::new("Salary", DataType::Int64),
            ]),
            vec![
                vec![Value::Utf8("B".to_string()), Value::Int64(200)],
                vec![Value::Utf8("B2".to_string()), Value::Int64(200)],
            ],
        );
        assert_eq!(
            render_table(&t, &[1, 2]),
            "   Name  Salary\n1     B     200\n2    B2     200"
        );
        assert_eq!(
            render_table(&t, &[]),
            "   Name  Salary\n0     B     200\n1    B2     200"
        );
    }

    #[test]
    fn nulls_and_floats_render_like_a_dataframe() {
        let t = Table::new(
            Schema::new(vec![Field::new("x", DataType::Float64)]),
            vec![vec![Value::Float64(2.0)], vec![Value::Null]],
        );
        assert_eq!(render_table(&t, &[9, 10]), "      x\n 9  2.0\n10  NaN");
    }
}
