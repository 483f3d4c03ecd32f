use super::{exit_codes, load_or_default};
use crate::cli::args::AskArgs;
use sqlbench_core::engine::Answerer;
use sqlbench_core::prompts::PromptTemplate;
use sqlbench_core::providers::llm::HttpGateway;
use sqlbench_core::storage::Store;
use std::sync::Arc;

pub async fn run(args: AskArgs) -> anyhow::Result<i32> {
    let mut cfg = load_or_default(&args.config, false)?;
    if let Some(db) = args.db {
        cfg.settings.database = db;
    }

    let template: PromptTemplate = args.prompt.parse()?;

    let backend = match &args.model {
        Some(id) => cfg
            .models
            .iter()
            .find(|b| b.model() == id)
            .cloned()
            .unwrap_or_else(|| sqlbench_core::model::Backend::ollama(id)),
        None => match cfg.models.first() {
            Some(b) => b.clone(),
            None => anyhow::bail!("config has no models"),
        },
    };

    let store = Store::open(&cfg.settings.database)?;
    let answerer = Answerer {
        schema: store.describe()?,
        executor: Arc::new(store),
        client: Arc::new(HttpGateway::new()),
        backend,
        template,
        settings: cfg.settings.clone(),
        explain: !args.no_explain,
    };

    let answer = match answerer.ask(&args.question).await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("gateway error: {e}");
            return Ok(exit_codes::NO_RESULTS);
        }
    };

    println!("SQL:\n{}\n", answer.sql);
    let code = match &answer.result {
        Ok(rs) => {
            println!("{}", rs.to_text());
            if rs.is_empty() {
                exit_codes::NO_RESULTS
            } else {
                exit_codes::OK
            }
        }
        Err(e) => {
            println!("query error: {e}");
            exit_codes::NO_RESULTS
        }
    };

    match answer.summary {
        Some(Ok(text)) => println!("\n{}", text.trim()),
        Some(Err(e)) => eprintln!("explanation unavailable: {e}"),
        None => {}
    }
    Ok(code)
}
