use thiserror::Error;

/// Failures surfaced by a [`crate::Ledger`] implementation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The store is not reachable or not initialized.
    #[error("ledger is not available")]
    Unavailable,

    /// The user declined to sign the transaction in their wallet.
    #[error("transaction rejected by the user")]
    Rejected,

    /// Any other failure, carrying the underlying error text.
    #[error("ledger call failed: {0}")]
    Call(String),
}

/// Failures surfaced by [`crate::TwinStore`] operations.
///
/// Malformed stored JSON is deliberately absent: corrupt blobs are recovered
/// locally (logged and treated as empty or absent), never raised. No
/// operation retries; every failure is terminal for the triggering action.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("ledger is not available")]
    LedgerUnavailable,

    #[error("twin {0} not found")]
    TwinNotFound(String),

    /// Distinct from other failures so the UI can phrase it differently.
    #[error("transaction rejected by the user")]
    TransactionRejected,

    #[error("ledger call failed: {0}")]
    Ledger(String),

    #[error("failed to encode twin record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unavailable => ClientError::LedgerUnavailable,
            LedgerError::Rejected => ClientError::TransactionRejected,
            LedgerError::Call(text) => ClientError::Ledger(text),
        }
    }
}
