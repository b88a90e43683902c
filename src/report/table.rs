use std::fmt::Write;

use crate::models::ClassificationResult;
use crate::report::rows::select_rows;
use crate::report::OutputConfig;

const COLUMN_GAP: &str = "  ";

/// Render the classified records as a left-aligned text table.
///
/// Each column is as wide as its longest cell, header included; cells are
/// padded with spaces and separated by two spaces. A row of dashes follows
/// the header and every line ends with `\n`. Without any rows the table has no
/// columns, leaving only the empty header and separator lines.
pub fn render(result: &ClassificationResult, config: &OutputConfig) -> String {
    let rows = select_rows(result, config);
    if rows.is_empty() {
        return "\n\n".to_string();
    }

    let headers: Vec<&str> = config.columns.iter().map(|c| c.label.as_str()).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str(COLUMN_GAP);
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:<width$}", cell.as_ref(), width = *width);
    }
    out.push('\n');
}
