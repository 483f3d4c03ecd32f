use crate::errors::QueryError;
use rusqlite::types::Value;

/// Runs one SQL statement. Faults come back as [`QueryError`] values so a
/// bad case never stops a sweep.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, sql: &str) -> Result<ResultSet, QueryError>;
}

/// Tabular output of a single query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed-width text table: header line then one line per row, columns
    /// right-aligned.
    pub fn to_text(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(render_value).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{:>width$}", v, width = *w))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(&self.columns)];
        if cells.is_empty() {
            out.push("(no rows)".to_string());
        }
        out.extend(cells.iter().map(|r| line(r)));
        out.join("\n")
    }
}

pub fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
