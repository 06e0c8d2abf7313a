//! Tagged result shapes returned by the ledger.
//!
//! `createAsset` answers `{"ok": id}` or `{"err": message}`; `purchaseAsset`
//! answers `{"success": message}` or `{"error": message}`. Both unwrap into
//! a plain `Result`, carrying the remote message verbatim on failure.

use serde::{Deserialize, Serialize};
use vrmart_core::AssetId;

use crate::error::{LedgerError, LedgerResult};

/// Result of `createAsset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateAssetResult {
    Ok(AssetId),
    Err(String),
}

impl CreateAssetResult {
    pub fn into_result(self) -> LedgerResult<AssetId> {
        match self {
            Self::Ok(id) => Ok(id),
            Self::Err(message) => Err(LedgerError::Rejected(message)),
        }
    }
}

/// Result of `purchaseAsset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseResult {
    Success(String),
    Error(String),
}

impl PurchaseResult {
    pub fn into_result(self) -> LedgerResult<String> {
        match self {
            Self::Success(message) => Ok(message),
            Self::Error(message) => Err(LedgerError::Rejected(message)),
        }
    }
}
