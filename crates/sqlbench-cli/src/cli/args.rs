use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sqlbench",
    version,
    about = "Ask questions of a SQLite database in plain English, and benchmark which models do it best"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log filter directive (e.g. `info`, `sqlbench_core=debug`)
    #[arg(long, global = true, env = "SQLBENCH_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sweep models × prompt templates × questions and write a results table
    Bench(BenchArgs),
    /// Answer one question end to end
    Ask(AskArgs),
    /// Print the schema description the models are shown
    Schema(SchemaArgs),
    /// Write a sample sqlbench.yaml
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct BenchArgs {
    /// Benchmark config; built-in defaults are used when the file is absent
    #[arg(long, default_value = "sqlbench.yaml")]
    pub config: PathBuf,

    #[arg(long, env = "SQLBENCH_DB")]
    pub db: Option<PathBuf>,

    /// CSV output path (overrides settings.output)
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub json: Option<PathBuf>,

    #[arg(long)]
    pub junit: Option<PathBuf>,

    /// Only run these model identifiers (repeatable)
    #[arg(long = "model")]
    pub models: Vec<String>,

    /// Replace the configured prompt templates (repeatable)
    #[arg(long = "prompt")]
    pub prompts: Vec<String>,

    /// Reject unknown config keys instead of warning
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AskArgs {
    pub question: String,

    #[arg(long, default_value = "sqlbench.yaml")]
    pub config: PathBuf,

    #[arg(long, env = "SQLBENCH_DB")]
    pub db: Option<PathBuf>,

    /// Model identifier; defaults to the first configured backend
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, default_value = "analyst")]
    pub prompt: String,

    /// Print the SQL and result table without a plain-English summary
    #[arg(long, default_value_t = false)]
    pub no_explain: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(long, env = "SQLBENCH_DB", default_value = "imf_data.db")]
    pub db: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "sqlbench.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
