use anyhow::{Context, Result, bail};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::domain::{Account, Ledger};
use crate::io::export::AccountRecord;

/// File formats understood for seed files and account listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Csv,
    Json,
}

impl SeedFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(SeedFormat::Csv),
            Some("json") => Ok(SeedFormat::Json),
            _ => bail!(
                "Unsupported seed file '{}': expected a .csv or .json extension",
                path.display()
            ),
        }
    }
}

/// Read accounts from CSV with an `account_number,holder_name,balance` header.
/// Stops at the first bad record.
pub fn load_accounts_csv<R: Read>(reader: R) -> Result<Vec<Account>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut accounts = Vec::new();

    for (line_num, result) in csv_reader.deserialize::<AccountRecord>().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing
        let record = result.with_context(|| format!("CSV parse error on line {}", line))?;
        let balance_text = record.balance.clone();
        let account = record.into_account().with_context(|| {
            format!("Invalid balance '{}' on line {}", balance_text, line)
        })?;
        accounts.push(account);
    }

    Ok(accounts)
}

/// Read accounts from a JSON array of account records.
pub fn load_accounts_json<R: Read>(reader: R) -> Result<Vec<Account>> {
    let records: Vec<AccountRecord> =
        serde_json::from_reader(reader).context("Failed to parse JSON account list")?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let balance_text = record.balance.clone();
            record.into_account().with_context(|| {
                format!("Invalid balance '{}' in record {}", balance_text, index)
            })
        })
        .collect()
}

/// Build a ledger from a seed file, choosing the parser by extension.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    let format = SeedFormat::from_path(path)?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open seed file '{}'", path.display()))?;
    let reader = BufReader::new(file);

    let accounts = match format {
        SeedFormat::Csv => load_accounts_csv(reader)?,
        SeedFormat::Json => load_accounts_json(reader)?,
    };
    debug!(
        "loaded {} account(s) from {}",
        accounts.len(),
        path.display()
    );

    Ledger::new(accounts).with_context(|| format!("Invalid seed file '{}'", path.display()))
}
