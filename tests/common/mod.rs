// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use teller::application::TransactionProcessor;
use teller::domain::{Account, BalanceChange, Ledger};

/// Date stamped on every receipt produced by the test processors.
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Processor over the six default accounts with a fixed receipt date.
pub fn test_processor() -> TransactionProcessor {
    TransactionProcessor::new(Ledger::with_default_accounts()).with_clock(fixed_date)
}

/// Processor over a single account.
pub fn single_account_processor(number: &str, holder: &str, balance: i64) -> TransactionProcessor {
    let ledger = Ledger::new(vec![Account::new(number, holder, balance)]).unwrap();
    TransactionProcessor::new(ledger).with_clock(fixed_date)
}

/// Subscribe a recorder to the processor's ledger and hand back what it sees.
pub fn record_changes(processor: &mut TransactionProcessor) -> Rc<RefCell<Vec<BalanceChange>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    processor
        .ledger_mut()
        .subscribe(move |change| sink.borrow_mut().push(change.clone()));
    seen
}

/// Snapshot of every (number, balance) pair, for "nothing changed" checks.
pub fn balances(processor: &TransactionProcessor) -> Vec<(String, i64)> {
    processor
        .ledger()
        .accounts()
        .iter()
        .map(|a| (a.number().to_string(), a.balance()))
        .collect()
}
