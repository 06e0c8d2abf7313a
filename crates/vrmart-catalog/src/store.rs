//! Catalog store.
//!
//! The store is the single source of truth for the locally displayed item
//! list. Listing order is insertion order. Ids are `max(existing) + 1`, so
//! they strictly increase and are never reused.

use crate::error::{CatalogError, CatalogResult};
use crate::filter::CatalogFilter;
use crate::seed::seed_items;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info};
use vrmart_core::{ItemId, MarketplaceItem, NewMarketplaceItem};

/// Append-only in-memory catalog.
pub struct CatalogStore {
    items: RwLock<Vec<MarketplaceItem>>,
    /// Publishes the item count after every append.
    len_tx: watch::Sender<usize>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty catalog.
    pub fn new() -> Self {
        let (len_tx, _) = watch::channel(0);
        Self {
            items: RwLock::new(Vec::new()),
            len_tx,
        }
    }

    /// Create a catalog holding the startup seed list (ids 1..=8).
    pub fn seeded() -> Self {
        let store = Self::new();
        for item in seed_items() {
            store.add_item(item);
        }
        info!(items = store.len(), "Catalog seeded");
        store
    }

    /// Snapshot of all items in listing order.
    pub fn items(&self) -> Vec<MarketplaceItem> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<MarketplaceItem> {
        self.items.read().iter().find(|item| item.id == id).cloned()
    }

    /// Id the next `add_item` will assign.
    pub fn next_id(&self) -> ItemId {
        Self::next_id_of(&self.items.read())
    }

    fn next_id_of(items: &[MarketplaceItem]) -> ItemId {
        items
            .iter()
            .map(|item| item.id)
            .max()
            .unwrap_or(ItemId(0))
            .next()
    }

    /// Append an item and assign it a fresh id.
    ///
    /// Field contents are not validated. Returns the assigned id.
    pub fn add_item(&self, item: NewMarketplaceItem) -> ItemId {
        let (id, len) = {
            let mut items = self.items.write();
            // id and push under one write guard so concurrent adds cannot collide
            let id = Self::next_id_of(&items);
            items.push(item.into_item(id));
            (id, items.len())
        };

        debug!(id = %id, items = len, "Catalog item added");
        self.len_tx.send_replace(len);
        id
    }

    /// Items matching a filter, in listing order.
    pub fn search(&self, filter: &CatalogFilter) -> Vec<MarketplaceItem> {
        self.items
            .read()
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Increment an item's like counter, returning the new count.
    pub fn like(&self, id: ItemId) -> CatalogResult<u64> {
        self.bump(id, |item| {
            item.likes += 1;
            item.likes
        })
    }

    /// Increment an item's view counter, returning the new count.
    pub fn record_view(&self, id: ItemId) -> CatalogResult<u64> {
        self.bump(id, |item| {
            item.views += 1;
            item.views
        })
    }

    fn bump(&self, id: ItemId, f: impl FnOnce(&mut MarketplaceItem) -> u64) -> CatalogResult<u64> {
        let mut items = self.items.write();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CatalogError::ItemNotFound(id))?;
        Ok(f(item))
    }

    /// Subscribe to item-count changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.len_tx.subscribe()
    }
}
