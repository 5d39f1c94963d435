mod common;

use std::fs;

use anyhow::Result;
use common::fixed_date;
use teller::application::TransactionProcessor;
use teller::domain::{Ledger, TransactionKind};
use teller::io::{load_ledger, write_accounts_csv, write_accounts_json};
use tempfile::TempDir;

#[test]
fn test_load_ledger_from_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("accounts.csv");
    fs::write(
        &path,
        "account_number,holder_name,balance\n\
         900001,Ada Byron,250.75\n\
         900002,Grace Hopper,0\n",
    )?;

    let ledger = load_ledger(&path)?;

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.find("900001").unwrap().balance(), 25_075);
    assert_eq!(ledger.find("900002").unwrap().holder(), "Grace Hopper");
    assert!(ledger.find("123456").is_none());

    Ok(())
}

#[test]
fn test_seeded_ledger_drives_transactions() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("accounts.json");
    fs::write(
        &path,
        r#"[{"account_number": "42", "holder_name": "Deep Thought", "balance": "100"}]"#,
    )?;

    let mut processor = TransactionProcessor::new(load_ledger(&path)?).with_clock(fixed_date);
    let receipt = processor
        .process("42", "58", TransactionKind::Withdrawal)
        .unwrap();

    assert_eq!(receipt.balance, 4_200);
    assert_eq!(receipt.holder, "Deep Thought");

    Ok(())
}

#[test]
fn test_listing_round_trips_as_seed_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let original = Ledger::with_default_accounts();

    let csv_path = temp_dir.path().join("listing.csv");
    write_accounts_csv(original.accounts(), fs::File::create(&csv_path)?)?;
    let json_path = temp_dir.path().join("listing.json");
    write_accounts_json(original.accounts(), fs::File::create(&json_path)?)?;

    assert_eq!(load_ledger(&csv_path)?.accounts(), original.accounts());
    assert_eq!(load_ledger(&json_path)?.accounts(), original.accounts());

    Ok(())
}

#[test]
fn test_duplicate_accounts_are_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("accounts.csv");
    fs::write(
        &path,
        "account_number,holder_name,balance\n\
         1,A,1\n\
         1,B,2\n",
    )?;

    let err = load_ledger(&path).unwrap_err();

    assert!(err.to_string().starts_with("Invalid seed file"));
    assert_eq!(
        err.root_cause().to_string(),
        "account number 1 appears more than once"
    );

    Ok(())
}

#[test]
fn test_negative_opening_balance_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("accounts.csv");
    fs::write(&path, "account_number,holder_name,balance\n1,A,-5\n")?;

    assert!(load_ledger(&path).is_err());

    Ok(())
}

#[test]
fn test_missing_and_unsupported_files() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("nope.csv");
    let err = load_ledger(&missing).unwrap_err();
    assert!(err.to_string().starts_with("Failed to open seed file"));

    let unsupported = temp_dir.path().join("accounts.yaml");
    fs::write(&unsupported, "").unwrap();
    assert!(load_ledger(&unsupported).is_err());
}
