use tracing::debug;

use crate::data_loader::*;
use crate::util::*;

/// One output row. `label` is the row's position inside each gameweek file,
/// so row 3 of every file in the window lands in the same group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub label: usize,
    pub contributors: usize,    // Number of files that had a row at this position
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    pub columns: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn head(&self, n: usize) -> &[AggregateRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    #[cfg(test)]
    pub fn value(&self, label: usize, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.iter().find(|r| r.label == label).map(|r| r.values[col])
    }
}

/*
    Stacks the window's tables (oldest first) and averages every numeric column per row position.
    Nothing checks that row N is the same player in every file. If the files have different lengths,
    the positions past the shortest file are just averaged over fewer rows.
*/
pub fn aggregate_window(tables: &[GameweekTable]) -> AggregateTable {
    // Columns are matched by name, in the order they're first seen
    let mut all_columns: Vec<&String> = Vec::new();
    for t in tables {
        for h in &t.headers {
            if !all_columns.contains(&h) { all_columns.push(h); }
        }
    }

    let mut columns: Vec<String> = Vec::new();
    for c in all_columns {
        if is_numeric_column(tables, c) {
            columns.push(c.clone());
        } else {
            debug!(column = %c, "dropping non-numeric column");
        }
    }

    let row_count = tables.iter().map(|t| t.rows.len()).max().unwrap_or(0);
    let mut groups: Vec<Vec<Vec<f64>>> = vec![vec![Vec::new(); columns.len()]; row_count];
    let mut contributors = vec![0; row_count];

    for t in tables {
        if t.rows.len() < row_count {
            debug!(gameweek = t.gameweek, rows = t.rows.len(), longest = row_count, "gameweek has fewer rows than the window");
        }

        let col_idx: Vec<Option<usize>> = columns.iter().map(|c| t.column_index(c)).collect();

        for (label, row) in t.rows.iter().enumerate() {
            contributors[label] += 1;

            for (out_col, idx) in col_idx.iter().enumerate() {
                let Some(idx) = idx else { continue; }; // Column not in this file

                if let Some(v) = row[*idx].as_number() {
                    groups[label][out_col].push(v);
                }
            }
        }
    }

    let rows = groups
        .iter()
        .zip(contributors)
        .enumerate()
        .map(|(label, (group, contributors))| AggregateRow {
            label,
            contributors,
            values: group.iter().map(|vals| mean(vals)).collect(),
        })
        .collect();

    AggregateTable { columns, rows }
}

// A column survives only if every cell it has, in every file, is a number, a bool or empty
fn is_numeric_column(tables: &[GameweekTable], column: &str) -> bool {
    tables.iter().all(|t| match t.column_index(column) {
        Some(idx) => t.rows.iter().all(|row| row[idx].is_numeric()),
        None => true,
    })
}
