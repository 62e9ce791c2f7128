//! # paper-ledger CLI
//!
//! Runs invocations and queries against a file-backed ledger.
//!
//! ```text
//! paper-ledger init
//! paper-ledger invoke createAccounts 2
//! paper-ledger invoke transferPaper '{"cusip":"10000ACP", ...}'
//! paper-ledger query GetAllCPs
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use paper_ledger::{
    Ledger, LedgerConfig, infrastructure::persistence::FileLedgerStore, telemetry,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Commercial paper ledger
#[derive(Debug, Parser)]
#[command(name = "paper-ledger", version, about)]
struct Cli {
    /// Config file (defaults to ./paper-ledger.toml if present)
    #[arg(short, long, env = "LEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the snapshot file from the config
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reset all key registries
    Init,

    /// Execute a state-changing function
    Invoke {
        /// Function name, e.g. `issueCommercialPaper`
        function: String,
        /// Function arguments
        args: Vec<String>,
    },

    /// Run a read-only query and print its result
    Query {
        /// Query name followed by its arguments, e.g. `GetCP 10000ACP`
        #[arg(required = true)]
        args: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config =
        LedgerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    telemetry::init_tracing(&config.log).context("failed to install tracing subscriber")?;

    let store = FileLedgerStore::open(&config.store_path)
        .with_context(|| format!("failed to open store {}", config.store_path.display()))?;
    info!(path = %config.store_path.display(), keys = store.len(), "store opened");
    let ledger = Ledger::new(store).with_initial_balance(config.initial_cash_balance);

    match cli.command {
        Command::Init => {
            let receipt = ledger.invoke("init", &[] as &[String])?;
            println!("{} ok ({} writes, tx {})", receipt.function, receipt.writes, receipt.tx_id);
        }
        Command::Invoke { function, args } => {
            let receipt = ledger.invoke(&function, args.as_slice())?;
            println!("{} ok ({} writes, tx {})", receipt.function, receipt.writes, receipt.tx_id);
        }
        Command::Query { args } => {
            let bytes = ledger.query(args.as_slice())?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
