use crate::model::BenchmarkResult;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Column order of the persisted benchmark table.
pub const COLUMNS: [&str; 8] = [
    "model",
    "prompt_type",
    "question",
    "sql",
    "success",
    "rows",
    "error",
    "latency_sec",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    model: &'a str,
    prompt_type: &'a str,
    question: &'a str,
    sql: &'a str,
    success: bool,
    rows: usize,
    error: Option<&'a str>,
    latency_sec: f64,
}

impl<'a> From<&'a BenchmarkResult> for CsvRow<'a> {
    fn from(r: &'a BenchmarkResult) -> Self {
        Self {
            model: &r.model,
            prompt_type: &r.prompt_type,
            question: &r.question,
            sql: &r.generated_sql,
            success: r.success,
            rows: r.row_count,
            error: r.error.as_deref(),
            latency_sec: round_millis(r.latency_seconds),
        }
    }
}

fn round_millis(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

/// Writes the result table, replacing any previous file at `out`.
pub fn write_csv(results: &[BenchmarkResult], out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(out)?;
    write_to(results, file)
}

pub fn write_to<W: Write>(results: &[BenchmarkResult], w: W) -> anyhow::Result<()> {
    let mut writer = ::csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record(COLUMNS)?;
    for r in results {
        writer.serialize(CsvRow::from(r))?;
    }
    writer.flush()?;
    Ok(())
}
