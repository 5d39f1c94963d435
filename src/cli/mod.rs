mod session;

pub use session::*;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::BufReader;

use crate::application::{TransactionProcessor, render};
use crate::domain::{Ledger, TransactionKind};
use crate::io::{load_ledger, write_accounts_csv, write_accounts_json};

/// Teller - deposit and withdraw against a fixed set of accounts
#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "A minimal deposit/withdraw teller over an in-memory account ledger")]
#[command(version)]
pub struct Cli {
    /// Seed file with the starting accounts (.csv or .json)
    #[arg(short, long, env = "TELLER_ACCOUNTS", global = true)]
    pub accounts: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Session,

    /// Deposit into an account and print the receipt
    Deposit {
        /// Account number
        account: String,

        /// Amount to deposit (e.g., "50.00" or "50")
        amount: String,
    },

    /// Withdraw from an account and print the receipt
    Withdraw {
        /// Account number
        account: String,

        /// Amount to withdraw (e.g., "50.00" or "50")
        amount: String,
    },

    /// List the accounts
    Accounts {
        /// Output format: table, csv, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    /// Default log level for this invocation; `RUST_LOG` still wins.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    fn ledger(&self) -> Result<Ledger> {
        let mut ledger = match &self.accounts {
            Some(path) => load_ledger(path)?,
            None => Ledger::with_default_accounts(),
        };
        ledger.subscribe(|change| {
            info!(
                "balance updated for account {} ({})",
                change.account_number, change.kind
            );
        });
        Ok(ledger)
    }

    pub async fn run(self) -> Result<()> {
        let ledger = self.ledger()?;
        debug!("ledger ready with {} account(s)", ledger.len());

        match self.command.unwrap_or(Commands::Session) {
            Commands::Session => {
                let mut session = Session::new(TransactionProcessor::new(ledger));
                let stdin = BufReader::new(tokio::io::stdin());
                session.run(stdin, tokio::io::stdout()).await?;
            }

            Commands::Deposit { account, amount } => {
                run_transaction_command(ledger, &account, &amount, TransactionKind::Deposit);
            }

            Commands::Withdraw { account, amount } => {
                run_transaction_command(ledger, &account, &amount, TransactionKind::Withdrawal);
            }

            Commands::Accounts { format } => {
                run_accounts_command(&ledger, &format)?;
            }
        }

        Ok(())
    }
}

fn run_transaction_command(
    ledger: Ledger,
    account: &str,
    amount: &str,
    kind: TransactionKind,
) {
    let mut processor = TransactionProcessor::new(ledger);
    let result = processor.process(account, amount, kind);
    print!("{}", render(&result));
}

fn run_accounts_command(ledger: &Ledger, format: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format.to_lowercase().as_str() {
        "table" => write!(out, "{}", accounts_table(ledger))?,
        "csv" => {
            write_accounts_csv(ledger.accounts(), &mut out)?;
        }
        "json" => {
            write_accounts_json(ledger.accounts(), &mut out)?;
        }
        other => bail!("Unknown format '{}'. Use table, csv or json", other),
    }
    Ok(())
}
