use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// The store could not be opened or its catalog could not be read.
///
/// This is the only error that terminates a benchmark run: no question can be
/// answered without a schema.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to read store catalog: {0}")]
    Catalog(#[from] rusqlite::Error),
    #[error("store connection lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown prompt template '{name}' (expected one of: {expected})")]
    UnknownTemplate { name: String, expected: String },
    #[error("{0}")]
    Invalid(String),
}

/// Failure talking to a model backend. Every variant carries the raw
/// diagnostic so it can be recorded verbatim in a result row.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("response missing choices[0].message.content")]
    MissingContent,
    #[error("missing API key: environment variable {0} is not set")]
    MissingCredentials(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("empty SQL statement")]
    Empty,
    #[error("sql error: {0}")]
    Sql(String),
}

impl From<rusqlite::Error> for QueryError {
    fn from(e: rusqlite::Error) -> Self {
        QueryError::Sql(e.to_string())
    }
}

/// Everything that can go wrong for a single benchmark case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("query error: {0}")]
    Query(#[from] QueryError),
}

impl CaseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CaseError::Config(_) => FailureKind::Config,
            CaseError::Gateway(_) => FailureKind::Gateway,
            CaseError::Query(_) => FailureKind::Query,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Config,
    Gateway,
    Query,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Config => "config",
            FailureKind::Gateway => "gateway",
            FailureKind::Query => "query",
        }
    }
}
