//! Core domain types for the vrmart marketplace.
//!
//! This crate provides the types shared by every other vrmart crate:
//! - `MarketplaceItem`, `ItemId`, `Category`: the local storefront catalog
//! - `Asset`, `CreateAssetRequest`, `Principal`: remote ledger records
//! - `Icp`, `E8s`: precision-safe currency amounts
//! - `ModelDisplay`: declared viewer metadata for 3D models

pub mod amount;
pub mod asset;
pub mod display;
pub mod error;
pub mod item;

pub use amount::{e8s_to_icp, icp_to_e8s, E8s, Icp, E8S_PER_ICP};
pub use asset::{Asset, AssetId, CreateAssetRequest, Principal};
pub use display::{BoundingBox, ModelDisplay, ViewerPlacement, DEFAULT_MODEL_SCALE};
pub use error::{CoreError, Result};
pub use item::{Category, ItemId, MarketplaceItem, NewMarketplaceItem};
