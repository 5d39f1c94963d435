use std::fmt;

use super::{Cents, format_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emitted after every successful balance mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceChange {
    pub account_number: String,
    pub kind: TransactionKind,
    pub amount: Cents,
    pub previous: Cents,
    pub balance: Cents,
}

/// A withdrawal asked for more than the account holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientFunds {
    pub balance: Cents,
    pub requested: Cents,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient funds: balance {}, requested {}",
            format_cents(self.balance),
            format_cents(self.requested)
        )
    }
}

impl std::error::Error for InsufficientFunds {}

/// A deposit would push the balance past what `Cents` can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceOverflow {
    pub balance: Cents,
    pub amount: Cents,
}

impl fmt::Display for BalanceOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depositing {} would overflow balance {}",
            format_cents(self.amount),
            format_cents(self.balance)
        )
    }
}

impl std::error::Error for BalanceOverflow {}

/// A single customer account. Only the balance ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: String,
    holder: String,
    balance: Cents,
}

impl Account {
    pub fn new(number: impl Into<String>, holder: impl Into<String>, balance: Cents) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            balance,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// Add `amount` to the balance. Callers pass a non-negative amount.
    /// The balance is left untouched if the sum does not fit.
    ///
    /// The returned change is what the ledger hands to its listeners; an
    /// account on its own has nobody to notify.
    pub fn deposit(&mut self, amount: Cents) -> Result<BalanceChange, BalanceOverflow> {
        debug_assert!(amount >= 0, "deposit amount must not be negative");
        let previous = self.balance;
        self.balance = previous.checked_add(amount).ok_or(BalanceOverflow {
            balance: previous,
            amount,
        })?;
        Ok(self.change(TransactionKind::Deposit, amount, previous))
    }

    /// Subtract `amount` from the balance, or leave it untouched if the
    /// account cannot cover it.
    pub fn withdraw(&mut self, amount: Cents) -> Result<BalanceChange, InsufficientFunds> {
        debug_assert!(amount >= 0, "withdrawal amount must not be negative");
        if amount > self.balance {
            return Err(InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        let previous = self.balance;
        self.balance -= amount;
        Ok(self.change(TransactionKind::Withdrawal, amount, previous))
    }

    fn change(&self, kind: TransactionKind, amount: Cents, previous: Cents) -> BalanceChange {
        BalanceChange {
            account_number: self.number.clone(),
            kind,
            amount,
            previous,
            balance: self.balance,
        }
    }
}
