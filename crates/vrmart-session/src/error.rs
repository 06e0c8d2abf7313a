//! Session error types.

use thiserror::Error;
use vrmart_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl SessionError {
    /// The underlying ledger error.
    pub fn ledger(&self) -> &LedgerError {
        match self {
            Self::Ledger(e) => e,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
