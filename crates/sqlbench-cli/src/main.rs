use clap::Parser;

mod cli;
mod logging;

use cli::args::Cli;
use cli::commands::{dispatch, exit_codes};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}
