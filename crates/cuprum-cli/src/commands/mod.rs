mod extract;
mod insights;
mod run;
mod status;
mod transform;

use std::str::FromStr;

use cuprum_core::{Lookback, Symbol};
use cuprum_warehouse::{PriceStore, StoreConfig};
use serde_json::Value;

use crate::cli::{Cli, Command, FetchArgs};
use crate::error::CliError;

/// Output of one command: the machine-readable payload plus text lines.
pub struct CommandView {
    pub data: Value,
    pub lines: Vec<String>,
}

pub fn run(cli: &Cli) -> Result<CommandView, CliError> {
    match &cli.command {
        Command::Run(args) => run::run(cli, args),
        Command::Extract(args) => extract::run(cli, args),
        Command::Transform => transform::run(cli),
        Command::Insights => insights::run(cli),
        Command::Status => status::run(cli),
    }
}

fn open_store(cli: &Cli) -> Result<PriceStore, CliError> {
    Ok(PriceStore::open(&StoreConfig {
        db_path: cli.db.clone(),
    })?)
}

fn parse_fetch(args: &FetchArgs) -> Result<(Symbol, Lookback), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let lookback = Lookback::from_str(&args.lookback)?;
    Ok((symbol, lookback))
}
