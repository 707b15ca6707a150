use std::io::{self, Write};

use crate::aggregate::*;
use crate::util::*;

pub fn output_report(table: &AggregateTable, rows: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, table, rows)?;
    out.flush()
}

// Right aligned text table of the first `rows` rows, the row position leading each line
pub fn write_report<W: Write>(out: &mut W, table: &AggregateTable, rows: usize) -> io::Result<()> {
    let head = table.head(rows);

    let cells: Vec<Vec<String>> = head
        .iter()
        .map(|r| r.values.iter().map(|v| format_float(*v)).collect())
        .collect();

    let label_width = head.iter().map(|r| r.label.to_string().len()).max().unwrap_or(0);

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.len()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut header = " ".repeat(label_width);
    for (col, &w) in table.columns.iter().zip(&widths) {
        header.push_str(&format!("  {col:>w$}"));
    }
    writeln!(out, "{}", header.trim_end())?;

    for (r, row) in head.iter().zip(&cells) {
        let mut line = format!("{:<label_width$}", r.label);
        for (cell, &w) in row.iter().zip(&widths) {
            line.push_str(&format!("  {cell:>w$}"));
        }
        writeln!(out, "{line}")?;
    }

    Ok(())
}
