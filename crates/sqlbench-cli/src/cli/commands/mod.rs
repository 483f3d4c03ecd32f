use crate::cli::args::{Cli, Command};
use sqlbench_core::config::load_config;
use sqlbench_core::model::BenchConfig;
use std::path::Path;

pub mod ask;
pub mod bench;
pub mod init;
pub mod schema;

pub mod exit_codes {
    pub const OK: i32 = 0;
    /// The command ran but produced no usable answer.
    pub const NO_RESULTS: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Bench(args) => bench::run(args).await,
        Command::Ask(args) => ask::run(args).await,
        Command::Schema(args) => schema::run(args),
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Loads `path`, or the built-in defaults when no such file exists.
fn load_or_default(path: &Path, strict: bool) -> anyhow::Result<BenchConfig> {
    if !path.exists() {
        tracing::info!(
            event = "config_defaults",
            config = %path.display(),
            "config not found, using built-in defaults"
        );
        return Ok(BenchConfig::default());
    }
    load_config(path, strict).map_err(|e| anyhow::anyhow!("config error: {}", e))
}
