//! Local marketplace catalog for vrmart.
//!
//! Holds the storefront's item list independently of the remote ledger.
//! The catalog is append-only for the lifetime of the process: items are
//! added and their like/view counters move, nothing is removed.

pub mod error;
pub mod filter;
pub mod seed;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use filter::CatalogFilter;
pub use seed::seed_items;
pub use store::CatalogStore;
