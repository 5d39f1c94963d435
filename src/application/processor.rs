use std::fmt;

use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::domain::{
    Account, Cents, Ledger, LedgerError, TransactionKind, format_cents, parse_cents,
};

use super::TellerError;

/// Source of the date printed on receipts.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Account details shown after a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub kind: TransactionKind,
    pub account_number: String,
    pub holder: String,
    pub balance: Cents,
    pub date: NaiveDate,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Account Holder Name: {}", self.holder)?;
        writeln!(f, "Balance: {}", format_cents(self.balance))?;
        writeln!(f, "Date of transaction: {}", self.date)
    }
}

/// Turns raw form input into deposits and withdrawals on the ledger it owns.
pub struct TransactionProcessor {
    ledger: Ledger,
    today: Clock,
}

impl TransactionProcessor {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            today: local_today,
        }
    }

    /// Replace the receipt clock, mostly so tests get a fixed date.
    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Validate the two input texts and apply the transaction.
    ///
    /// Checks run in a fixed order and stop at the first failure: missing
    /// input, unparsable or negative amount, unknown account, then the
    /// balance check for withdrawals. A deposit the balance cannot hold is
    /// refused by the ledger. A failed call never touches the ledger.
    pub fn process(
        &mut self,
        account_text: &str,
        amount_text: &str,
        kind: TransactionKind,
    ) -> Result<Receipt, TellerError> {
        let account_number = account_text.trim();
        let amount_text = amount_text.trim();
        if account_number.is_empty() || amount_text.is_empty() {
            return Err(TellerError::MissingInput);
        }

        let amount = parse_cents(amount_text)
            .map_err(|err| TellerError::invalid_amount(amount_text, err))?;
        if amount < 0 {
            return Err(TellerError::invalid_amount(
                amount_text,
                "amount must not be negative",
            ));
        }

        let account = self.ledger.find(account_number).ok_or_else(|| {
            debug!("no account matches '{}'", account_number);
            TellerError::AccountNotFound(account_number.to_string())
        })?;
        let unchanged = self.receipt(account, kind);

        if kind == TransactionKind::Withdrawal && amount > account.balance() {
            debug!(
                "refusing withdrawal of {} from {}: balance {}",
                format_cents(amount),
                account_number,
                format_cents(account.balance())
            );
            return Err(TellerError::InsufficientFunds { receipt: unchanged });
        }

        let applied = match kind {
            TransactionKind::Deposit => self.ledger.deposit(account_number, amount),
            TransactionKind::Withdrawal => self.ledger.withdraw(account_number, amount),
        };
        let change = applied.map_err(|err| match err {
            LedgerError::InsufficientFunds(_) => TellerError::InsufficientFunds {
                receipt: unchanged.clone(),
            },
            LedgerError::BalanceOverflow(_) => {
                TellerError::invalid_amount(amount_text, "balance would overflow")
            }
            _ => TellerError::AccountNotFound(account_number.to_string()),
        })?;

        info!(
            "{} of {} on account {}: {} -> {}",
            kind,
            format_cents(amount),
            change.account_number,
            format_cents(change.previous),
            format_cents(change.balance)
        );

        Ok(Receipt {
            balance: change.balance,
            ..unchanged
        })
    }

    fn receipt(&self, account: &Account, kind: TransactionKind) -> Receipt {
        Receipt {
            kind,
            account_number: account.number().to_string(),
            holder: account.holder().to_string(),
            balance: account.balance(),
            date: (self.today)(),
        }
    }
}

/// Text appended to the output display for a processed transaction.
pub fn render(result: &Result<Receipt, TellerError>) -> String {
    match result {
        Ok(receipt) => {
            let headline = match receipt.kind {
                TransactionKind::Deposit => "Deposit successful.",
                TransactionKind::Withdrawal => "Withdrawal successful.",
            };
            format!("{}\n{}\n", headline, receipt)
        }
        Err(err) => match err {
            TellerError::InsufficientFunds { receipt } => format!("{}\n{}\n", err, receipt),
            _ => format!("{}\n", err),
        },
    }
}
