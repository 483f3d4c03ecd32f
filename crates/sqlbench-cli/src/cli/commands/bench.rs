use super::{exit_codes, load_or_default};
use crate::cli::args::BenchArgs;
use sqlbench_core::engine::Runner;
use sqlbench_core::providers::llm::HttpGateway;
use sqlbench_core::report;
use sqlbench_core::storage::Store;
use std::sync::Arc;

pub async fn run(args: BenchArgs) -> anyhow::Result<i32> {
    let mut cfg = load_or_default(&args.config, args.strict)?;

    if let Some(db) = args.db {
        cfg.settings.database = db;
    }
    if let Some(out) = args.out {
        cfg.settings.output = out;
    }
    if !args.prompts.is_empty() {
        cfg.prompts = args.prompts;
    }
    cfg.retain_models(&args.models);
    if cfg.models.is_empty() {
        eprintln!(
            "config error: no configured model matches --model {}",
            args.models.join(", ")
        );
        return Ok(exit_codes::CONFIG_ERROR);
    }

    let store = Store::open(&cfg.settings.database)?;
    let schema = store.describe()?;
    tracing::info!(
        event = "run_start",
        database = %cfg.settings.database.display(),
        tables = schema.tables.len(),
        cases = cfg.case_count(),
    );

    let mut runner = Runner::new(Arc::new(store), schema, Arc::new(HttpGateway::new()));
    let artifacts = runner.run_suite(&cfg).await?;

    report::csv::write_csv(&artifacts.results, &cfg.settings.output)?;
    if let Some(path) = &args.json {
        report::json::write_json(&artifacts, path)?;
    }
    if let Some(path) = &args.junit {
        report::junit::write_junit("sqlbench", &artifacts.results, path)?;
    }

    report::console::print_summary(&artifacts);
    eprintln!(
        "wrote {} rows to {}",
        artifacts.results.len(),
        cfg.settings.output.display()
    );
    if artifacts.results.is_empty() {
        return Ok(exit_codes::NO_RESULTS);
    }
    Ok(exit_codes::OK)
}
