use thiserror::Error;

use super::Receipt;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TellerError {
    #[error("Please enter both account number and amount.")]
    MissingInput,

    #[error("Invalid amount '{text}': {reason}")]
    InvalidAmount { text: String, reason: String },

    #[error("Account not found.")]
    AccountNotFound(String),

    /// The receipt shows the balance the withdrawal left untouched.
    #[error("Insufficient balance. Account details are not changed")]
    InsufficientFunds { receipt: Receipt },
}

impl TellerError {
    pub(crate) fn invalid_amount(text: &str, reason: impl ToString) -> Self {
        TellerError::InvalidAmount {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}
