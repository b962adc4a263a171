use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    /// Expense amount is zero or negative
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Expense has no participants
    #[error("Participant set is empty")]
    EmptyParticipants,

    /// Same user listed twice in the participant set
    #[error("Duplicate participant {0}")]
    DuplicateParticipant(Uuid),

    /// Currency code is not a plausible ISO 4217 code
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// One ledger run saw transactions in more than one currency
    #[error("Mixed currencies in ledger: {0} and {1}")]
    CurrencyMismatch(String, String),

    /// Obligation with given ID not found
    #[error("Obligation {0} not found")]
    ObligationNotFound(Uuid),

    /// Another actor already settled this obligation; the caller's view is
    /// stale and must refresh before re-showing the action
    #[error("Obligation {0} already settled")]
    SettlementConflict(Uuid),

    /// Transient failure talking to the durable store
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl LedgerError {
    /// Malformed-input errors, never worth retrying.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::NonPositiveAmount(_)
                | LedgerError::EmptyParticipants
                | LedgerError::DuplicateParticipant(_)
                | LedgerError::InvalidCurrency(_)
                | LedgerError::CurrencyMismatch(_, _)
        )
    }
}
