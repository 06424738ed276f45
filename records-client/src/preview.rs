//! Tabular preview of decoded rows
//!
//! Columns come from the keys of the first row only; a key that first
//! appears in a later row is not shown.

use std::fmt;

use serde_json::Value;

use crate::decoder::DecodedRow;

/// Maximum number of rows shown in a preview
pub const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    /// At most [`PREVIEW_LIMIT`] rows, one cell per header
    pub rows: Vec<Vec<String>>,
    /// Number of decoded rows the preview was built from
    pub total_rows: usize,
}

impl Preview {
    pub fn from_rows(rows: &[DecodedRow]) -> Self {
        let Some(first) = rows.first() else {
            return Self::default();
        };

        let headers: Vec<String> = first.keys().cloned().collect();
        let rows_shown = rows
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|row| {
                headers
                    .iter()
                    .map(|h| row.get(h).map(cell_display).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            headers,
            rows: rows_shown,
            total_rows: rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Rows decoded but not shown
    pub fn hidden_rows(&self) -> usize {
        self.total_rows.saturating_sub(self.rows.len())
    }
}

fn cell_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let write_line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())
        };

        write_line(f, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write_line(f, row)?;
        }

        if self.hidden_rows() > 0 {
            writeln!(f, "... {} more row(s)", self.hidden_rows())?;
        }
        Ok(())
    }
}
