use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::{Account, ParseCentsError, format_cents, parse_cents};

/// One account as it appears in seed and listing files.
/// The balance is kept as decimal text ("10000.00") so files stay hand-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: String,
    pub holder_name: String,
    pub balance: String,
}

impl AccountRecord {
    pub fn from_account(account: &Account) -> Self {
        Self {
            account_number: account.number().to_string(),
            holder_name: account.holder().to_string(),
            balance: format_cents(account.balance()),
        }
    }

    pub fn into_account(self) -> Result<Account, ParseCentsError> {
        let balance = parse_cents(&self.balance)?;
        Ok(Account::new(self.account_number, self.holder_name, balance))
    }
}

/// Write accounts as CSV with an `account_number,holder_name,balance` header.
pub fn write_accounts_csv<W: Write>(accounts: &[Account], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header is written explicitly so an empty ledger still produces one
    csv_writer.write_record(["account_number", "holder_name", "balance"])?;
    for account in accounts {
        let record = AccountRecord::from_account(account);
        csv_writer.write_record([
            &record.account_number,
            &record.holder_name,
            &record.balance,
        ])?;
    }

    csv_writer.flush()?;
    Ok(accounts.len())
}

/// Write accounts as a pretty-printed JSON array.
pub fn write_accounts_json<W: Write>(accounts: &[Account], mut writer: W) -> Result<usize> {
    let records: Vec<AccountRecord> = accounts.iter().map(AccountRecord::from_account).collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    Ok(records.len())
}
