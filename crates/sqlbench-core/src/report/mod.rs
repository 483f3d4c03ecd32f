use crate::errors::FailureKind;
use crate::model::BenchmarkResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod console;
pub mod csv;
pub mod json;
pub mod junit;

/// Everything a completed run produced, in case order.
#[derive(Debug, Clone, Serialize)]
pub struct RunArtifacts {
    pub started_at: DateTime<Utc>,
    pub config_fingerprint: String,
    pub results: Vec<BenchmarkResult>,
}

impl RunArtifacts {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn failed_by(&self, kind: FailureKind) -> usize {
        self.results
            .iter()
            .filter(|r| r.failure == Some(kind))
            .count()
    }
}
