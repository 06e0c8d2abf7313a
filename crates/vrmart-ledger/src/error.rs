//! Ledger error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// No session or actor handle.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A session exists but its principal could not be resolved.
    #[error("No principal found")]
    NoIdentity,

    /// The ledger answered with an explicit error payload.
    #[error("{0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::NoIdentity => "no_identity",
            Self::Rejected(_) => "rejected",
            Self::Transport(_) => "transport",
            Self::Identity(_) => "identity",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
