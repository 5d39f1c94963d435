use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::{TransactionProcessor, render};
use crate::domain::{Ledger, TransactionKind, format_cents};

const HELP: &str = "\
Commands:
  deposit <account> <amount>    (d)     add money to an account
  withdraw <account> <amount>   (w)     take money from an account
  accounts                      (ls)    list all accounts
  help                          (?)     show this text
  quit                          (exit)  leave the session

End of input also leaves the session.
";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Transaction {
        kind: TransactionKind,
        account: String,
        amount: String,
    },
    Accounts,
    Help,
    Quit,
    Blank,
    Unknown(String),
}

impl SessionCommand {
    /// Missing words become empty strings, the same as an empty form field.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return SessionCommand::Blank;
        };

        let kind = match verb.to_lowercase().as_str() {
            "deposit" | "d" => TransactionKind::Deposit,
            "withdraw" | "w" => TransactionKind::Withdrawal,
            "accounts" | "ls" => return SessionCommand::Accounts,
            "help" | "?" => return SessionCommand::Help,
            "quit" | "exit" => return SessionCommand::Quit,
            _ => return SessionCommand::Unknown(verb.to_string()),
        };

        let account = words.next().unwrap_or_default().to_string();
        let amount = words.collect::<Vec<_>>().join(" ");
        SessionCommand::Transaction {
            kind,
            account,
            amount,
        }
    }
}

/// Interactive stand-in for the teller form: reads commands line by line and
/// appends the outcome of each to the output.
pub struct Session {
    processor: TransactionProcessor,
}

impl Session {
    pub fn new(processor: TransactionProcessor) -> Self {
        Self { processor }
    }

    pub fn ledger(&self) -> &Ledger {
        self.processor.ledger()
    }

    /// Handle lines until `quit` or end of input. Each line is processed to
    /// completion before the next is read, so the ledger only ever sees one
    /// operation at a time.
    ///
    /// Lines are read as raw bytes; invalid UTF-8 is replaced rather than
    /// ending the session, and then fails like any other bad input.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let command = SessionCommand::parse(&line);
            if command == SessionCommand::Quit {
                break;
            }
            let output = self.handle(command);
            writer.write_all(output.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok(())
    }

    /// Text produced by a single command.
    pub fn handle(&mut self, command: SessionCommand) -> String {
        match command {
            SessionCommand::Transaction {
                kind,
                account,
                amount,
            } => render(&self.processor.process(&account, &amount, kind)),
            SessionCommand::Accounts => accounts_table(self.ledger()),
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Unknown(verb) => format!(
                "Unknown command '{}'. Type 'help' for a list of commands.\n",
                verb
            ),
            SessionCommand::Blank | SessionCommand::Quit => String::new(),
        }
    }
}

/// Fixed-width account listing.
pub fn accounts_table(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let mut out = format!("{:<10} {:<24} {:>14}\n", "ACCOUNT", "HOLDER", "BALANCE");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for account in ledger.accounts() {
        out.push_str(&format!(
            "{:<10} {:<24} {:>14}\n",
            account.number(),
            account.holder(),
            format_cents(account.balance())
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(kind: TransactionKind, account: &str, amount: &str) -> SessionCommand {
        SessionCommand::Transaction {
            kind,
            account: account.into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn test_parse_transactions() {
        assert_eq!(
            SessionCommand::parse("deposit 123456 500"),
            transaction(TransactionKind::Deposit, "123456", "500")
        );
        assert_eq!(
            SessionCommand::parse("  W   123456   20.5 "),
            transaction(TransactionKind::Withdrawal, "123456", "20.5")
        );
    }

    #[test]
    fn test_parse_missing_words_become_empty() {
        assert_eq!(
            SessionCommand::parse("deposit 123456"),
            transaction(TransactionKind::Deposit, "123456", "")
        );
        assert_eq!(
            SessionCommand::parse("withdraw"),
            transaction(TransactionKind::Withdrawal, "", "")
        );
    }

    #[test]
    fn test_parse_extra_words_stay_in_amount() {
        // "5 0" must fail as an amount rather than silently become 5
        assert_eq!(
            SessionCommand::parse("d 123456 5 0"),
            transaction(TransactionKind::Deposit, "123456", "5 0")
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(SessionCommand::parse("ls"), SessionCommand::Accounts);
        assert_eq!(SessionCommand::parse("HELP"), SessionCommand::Help);
        assert_eq!(SessionCommand::parse("exit"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("   "), SessionCommand::Blank);
        assert_eq!(
            SessionCommand::parse("transfer 1 2"),
            SessionCommand::Unknown("transfer".into())
        );
    }

    #[test]
    fn test_help_lists_every_verb() {
        let mut session = Session::new(TransactionProcessor::new(Ledger::with_default_accounts()));
        let help = session.handle(SessionCommand::Help);

        for verb in ["deposit", "withdraw", "accounts", "help", "quit", "exit"] {
            assert!(help.contains(verb), "help text is missing '{}'", verb);
        }
        assert!(help.contains("End of input"));
    }

    #[test]
    fn test_accounts_table() {
        let ledger = Ledger::new(vec![crate::domain::Account::new("1", "Ann", 1234)]).unwrap();
        let table = accounts_table(&ledger);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ACCOUNT"));
        assert!(lines[2].starts_with("1 "));
        assert!(lines[2].ends_with("12.34"));
    }

    #[test]
    fn test_accounts_table_empty() {
        let ledger = Ledger::new(Vec::new()).unwrap();
        assert_eq!(accounts_table(&ledger), "No accounts found.\n");
    }
}
