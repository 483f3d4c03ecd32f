//! End-to-end benchmark runs against a real SQLite store and a canned gateway.

use sqlbench_core::errors::{FailureKind, GatewayError, QueryError};
use sqlbench_core::model::{Backend, BenchConfig};
use sqlbench_core::providers::llm::FakeGateway;
use sqlbench_core::report::csv::write_to;
use sqlbench_core::storage::{QueryExecutor, ResultSet, Store};
use sqlbench_core::engine::Runner;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const GDP_SQL: &str =
    "```sql\nSELECT value FROM gdp WHERE country='India' AND time_period='2020';\n```";

fn gdp_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("imf_data.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE gdp(country TEXT, time_period TEXT, value REAL);
         INSERT INTO gdp VALUES ('India', '2020', 2900.0);",
    )
    .unwrap();
    drop(conn);
    let store = Store::open(&path).unwrap();
    (dir, store)
}

fn runner(store: &Store, gateway: Arc<FakeGateway>) -> Runner {
    let schema = store.describe().unwrap();
    Runner::new(Arc::new(store.clone()), schema, gateway)
}

fn config(models: &[&str], prompts: &[&str], questions: &[&str]) -> BenchConfig {
    BenchConfig {
        models: models.iter().map(|m| Backend::ollama(m)).collect(),
        prompts: prompts.iter().map(|p| p.to_string()).collect(),
        questions: questions.iter().map(|q| q.to_string()).collect(),
        ..BenchConfig::default()
    }
}

/// Counts executions so tests can prove a case never reached the store.
struct CountingExecutor {
    inner: Store,
    calls: AtomicUsize,
}

impl QueryExecutor for CountingExecutor {
    fn execute(&self, sql: &str) -> Result<ResultSet, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(sql)
    }
}

#[tokio::test]
async fn single_case_against_gdp_table() {
    let (_dir, store) = gdp_store();
    let mut runner = runner(&store, Arc::new(FakeGateway::fixed(GDP_SQL)));

    let cfg = config(&["llama3.1:latest"], &["schema_aware"], &["India GDP 2020?"]);
    let artifacts = runner.run_suite(&cfg).await.unwrap();

    assert_eq!(artifacts.results.len(), 1);
    let row = &artifacts.results[0];
    assert!(row.success);
    assert_eq!(row.row_count, 1);
    assert_eq!(row.error, None);
    assert_eq!(
        row.generated_sql,
        "SELECT value FROM gdp WHERE country='India' AND time_period='2020';"
    );
    assert!(row.latency_seconds >= 0.0);
}

#[tokio::test]
async fn every_case_yields_exactly_one_row() {
    let (_dir, store) = gdp_store();
    // a mix of outcomes: good SQL, bad SQL, and a backend that is down
    let gateway = FakeGateway::fixed(GDP_SQL)
        .respond_for("qwen2:7b", Ok("SELECT nonsense FROM nowhere".into()))
        .respond_for(
            "phi3:latest",
            Err(GatewayError::Transport("connection refused".into())),
        );
    let mut runner = runner(&store, Arc::new(gateway));

    let cfg = config(
        &["llama3.1:latest", "qwen2:7b", "phi3:latest"],
        &["minimal", "schema_aware", "guardrails", "few_shot"],
        &["q1", "q2", "q3", "q4", "q5"],
    );
    let artifacts = runner.run_suite(&cfg).await.unwrap();

    assert_eq!(artifacts.results.len(), 3 * 4 * 5);

    for r in &artifacts.results {
        assert_eq!(r.success, r.error.is_none(), "{r:?}");
        if !r.success {
            assert_eq!(r.row_count, 0, "{r:?}");
        }
    }

    // nested order: models outer, prompts middle, questions inner
    let keys: Vec<_> = artifacts
        .results
        .iter()
        .map(|r| (r.model.as_str(), r.prompt_type.as_str(), r.question.as_str()))
        .collect();
    let expected: Vec<_> = cfg
        .cases()
        .map(|c| (c.model().to_string(), c.prompt_type, c.question))
        .collect();
    for (k, e) in keys.iter().zip(&expected) {
        assert_eq!((k.0, k.1, k.2), (e.0.as_str(), e.1.as_str(), e.2.as_str()));
    }
    assert_eq!(keys[0], ("llama3.1:latest", "minimal", "q1"));
    assert_eq!(keys[5], ("llama3.1:latest", "schema_aware", "q1"));
    assert_eq!(keys[20], ("qwen2:7b", "minimal", "q1"));

    assert_eq!(artifacts.succeeded(), 20);
    assert_eq!(artifacts.failed_by(FailureKind::Query), 20);
    assert_eq!(artifacts.failed_by(FailureKind::Gateway), 20);
}

#[tokio::test]
async fn gateway_failure_never_reaches_the_executor() {
    let (_dir, store) = gdp_store();
    let schema = store.describe().unwrap();
    let executor = Arc::new(CountingExecutor {
        inner: store,
        calls: AtomicUsize::new(0),
    });
    let gateway = Arc::new(FakeGateway::failing(GatewayError::Status {
        status: 500,
        body: "model 'ghost' not found".into(),
    }));
    let mut runner = Runner::new(executor.clone(), schema, gateway.clone());

    let cfg = config(&["ghost"], &["minimal", "few_shot"], &["q1"]);
    let artifacts = runner.run_suite(&cfg).await.unwrap();

    assert_eq!(artifacts.results.len(), 2);
    for r in &artifacts.results {
        assert_eq!(r.generated_sql, "");
        assert!(!r.success);
        assert_eq!(r.row_count, 0);
        let err = r.error.as_deref().unwrap();
        assert!(err.contains("HTTP 500"), "{err}");
        assert!(err.contains("model 'ghost' not found"), "{err}");
    }
    assert_eq!(gateway.calls(), 2);
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn reruns_are_identical_except_latency() {
    let (_dir, store) = gdp_store();
    let cfg = config(
        &["llama3.1:latest", "mistral-nemo:latest"],
        &["minimal", "guardrails"],
        &["India GDP 2020?", "Brazil, inflation?"],
    );
    let gateway = || {
        Arc::new(
            FakeGateway::fixed(GDP_SQL)
                .respond_for("mistral-nemo:latest", Ok("SELECT * FROM cpi".into())),
        )
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    let a = runner(&store, gateway()).run_suite(&cfg).await.unwrap();
    let b = runner(&store, gateway()).run_suite(&cfg).await.unwrap();
    write_to(&a.results, &mut first).unwrap();
    write_to(&b.results, &mut second).unwrap();

    let latency = regex::Regex::new(r"(?m),[0-9.]+$").unwrap();
    let mask = |bytes: Vec<u8>| {
        let text = String::from_utf8(bytes).unwrap();
        latency.replace_all(&text, ",<latency>").to_string()
    };

    let first = mask(first);
    assert_eq!(first, mask(second));
    assert_eq!(first.lines().count(), 1 + 8);
    assert_eq!(a.config_fingerprint, b.config_fingerprint);
}
