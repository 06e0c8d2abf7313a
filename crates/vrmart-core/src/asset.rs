//! Remote ledger records.
//!
//! These mirror the wire shapes of the asset ledger service. Field names
//! are camelCase on the wire.

use crate::amount::{e8s_to_icp, E8s, Icp};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset identifier assigned by the ledger.
pub type AssetId = u64;

/// Opaque identity handle of an authenticated ledger user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Text form of the principal.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Principal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(CoreError::InvalidPrincipal("empty principal".to_string()));
        }
        if text.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidPrincipal(format!(
                "principal contains whitespace: {text}"
            )));
        }
        Ok(Self(text.to_string()))
    }
}

/// Asset record owned by the remote ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in e8s.
    pub price: E8s,
    pub creator: Principal,
    /// Creation time in nanoseconds since the Unix epoch.
    pub created_at: i64,
    pub likes: u64,
    pub views: u64,
    pub model_url: String,
    pub rating: f64,
    pub reviews: u64,
}

impl Asset {
    /// Price converted to whole ICP.
    pub fn price_icp(&self) -> Icp {
        e8s_to_icp(self.price)
    }

    /// Creation timestamp as UTC.
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.created_at)
    }
}

/// Payload for minting a new asset on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: E8s,
    pub model_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_asset() -> Asset {
        Asset {
            id: 7,
            title: "Duck".to_string(),
            description: "A rubber duck".to_string(),
            category: "Object/Prop".to_string(),
            price: E8s(800_000_000),
            creator: "aaaaa-aa".parse().unwrap(),
            created_at: 1_700_000_000_000_000_000,
            likes: 3,
            views: 10,
            model_url: "/models/Duck.glb".to_string(),
            rating: 4.5,
            reviews: 2,
        }
    }

    #[test]
    fn test_asset_wire_names() {
        let json = serde_json::to_value(sample_asset()).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_000_000i64);
        assert_eq!(json["modelUrl"], "/models/Duck.glb");
        assert_eq!(json["creator"], "aaaaa-aa");
        assert_eq!(json["price"], 800_000_000u64);
    }

    #[test]
    fn test_asset_price_and_time() {
        let asset = sample_asset();
        assert_eq!(asset.price_icp(), Icp::new(dec!(8)));
        assert_eq!(asset.created_at_utc().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_principal_parse() {
        let p: Principal = " rdmx6-jaaaa ".parse().unwrap();
        assert_eq!(p.as_str(), "rdmx6-jaaaa");
        assert!("".parse::<Principal>().is_err());
        assert!("two words".parse::<Principal>().is_err());
    }
}
