use super::exit_codes;
use crate::cli::args::SchemaArgs;
use sqlbench_core::storage::Store;

pub fn run(args: SchemaArgs) -> anyhow::Result<i32> {
    let store = Store::open(&args.db)?;
    print!("{}", store.describe()?.render());
    Ok(exit_codes::OK)
}
