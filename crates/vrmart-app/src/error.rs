//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] vrmart_core::CoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] vrmart_catalog::CatalogError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] vrmart_ledger::LedgerError),

    #[error("Session error: {0}")]
    Session(#[from] vrmart_session::SessionError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] vrmart_telemetry::TelemetryError),

    /// Form input rejected before any remote call.
    #[error("{0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
