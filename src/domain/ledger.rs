use std::collections::HashSet;
use std::fmt;

use super::{Account, BalanceChange, BalanceOverflow, Cents, InsufficientFunds};

/// Callback run after every balance change.
pub type Listener = Box<dyn FnMut(&BalanceChange)>;

/// The six accounts every run starts with unless a seed file says otherwise.
pub fn default_accounts() -> Vec<Account> {
    vec![
        Account::new("123456", "Alex Doe", 1_000_000),
        Account::new("111213", "Tristain Doe", 500_000),
        Account::new("141516", "Christian Alonso", 200_000),
        Account::new("171819", "Stella Chan", 100_000),
        Account::new("202122", "Josh Chan", 5_200_000),
        Account::new("232425", "Zade Rei", 2_500_000),
    ]
}

/// Fixed set of accounts held for the lifetime of the process.
///
/// Membership never changes after construction: lookups are a linear scan,
/// which is all a handful of records needs. Balances change only through
/// [`Ledger::deposit`] and [`Ledger::withdraw`], and every change is handed
/// to the registered listeners in registration order.
pub struct Ledger {
    accounts: Vec<Account>,
    listeners: Vec<Listener>,
}

impl Ledger {
    /// Build a ledger, rejecting blank or duplicate account numbers and
    /// negative opening balances.
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::new();
        for account in &accounts {
            if account.number().trim().is_empty() {
                return Err(LedgerError::EmptyAccountNumber);
            }
            if !seen.insert(account.number()) {
                return Err(LedgerError::DuplicateAccount(account.number().to_string()));
            }
            if account.balance() < 0 {
                return Err(LedgerError::NegativeOpeningBalance {
                    account_number: account.number().to_string(),
                    balance: account.balance(),
                });
            }
        }

        Ok(Self {
            accounts,
            listeners: Vec::new(),
        })
    }

    pub fn with_default_accounts() -> Self {
        Self {
            accounts: default_accounts(),
            listeners: Vec::new(),
        }
    }

    /// Accounts in display order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Exact-match lookup by account number.
    pub fn find(&self, number: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    /// Register a callback for balance changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&BalanceChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn deposit(&mut self, number: &str, amount: Cents) -> Result<BalanceChange, LedgerError> {
        let change = self
            .find_mut(number)?
            .deposit(amount)
            .map_err(LedgerError::BalanceOverflow)?;
        self.notify(&change);
        Ok(change)
    }

    pub fn withdraw(&mut self, number: &str, amount: Cents) -> Result<BalanceChange, LedgerError> {
        let change = self
            .find_mut(number)?
            .withdraw(amount)
            .map_err(LedgerError::InsufficientFunds)?;
        self.notify(&change);
        Ok(change)
    }

    fn find_mut(&mut self, number: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .iter_mut()
            .find(|a| a.number() == number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))
    }

    fn notify(&mut self, change: &BalanceChange) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_default_accounts()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("accounts", &self.accounts)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    EmptyAccountNumber,
    DuplicateAccount(String),
    NegativeOpeningBalance {
        account_number: String,
        balance: Cents,
    },
    AccountNotFound(String),
    InsufficientFunds(InsufficientFunds),
    BalanceOverflow(BalanceOverflow),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::EmptyAccountNumber => write!(f, "account number must not be empty"),
            LedgerError::DuplicateAccount(number) => {
                write!(f, "account number {} appears more than once", number)
            }
            LedgerError::NegativeOpeningBalance {
                account_number,
                balance,
            } => write!(
                f,
                "account {} has a negative opening balance ({} cents)",
                account_number, balance
            ),
            LedgerError::AccountNotFound(number) => write!(f, "account {} not found", number),
            LedgerError::InsufficientFunds(err) => write!(f, "{}", err),
            LedgerError::BalanceOverflow(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LedgerError {}
