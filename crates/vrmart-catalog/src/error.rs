//! Catalog error types.

use thiserror::Error;
use vrmart_core::ItemId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
