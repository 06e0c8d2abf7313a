//! Marketplace listing page.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use vrmart_catalog::{CatalogFilter, CatalogResult, CatalogStore};
use vrmart_core::{Category, ItemId, MarketplaceItem};

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRow {
    pub id: ItemId,
    pub title: String,
    pub category: &'static str,
    pub price: String,
    pub likes: u64,
    pub views: u64,
    pub liked: bool,
}

/// Filterable listing over the local catalog.
///
/// The liked marker is per view; the store only ever counts likes up.
pub struct CatalogView {
    store: Arc<CatalogStore>,
    filter: CatalogFilter,
    liked: HashSet<ItemId>,
}

impl CatalogView {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            filter: CatalogFilter::all(),
            liked: HashSet::new(),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// `None` shows all categories.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Rows matching the current filter, in listing order.
    pub fn rows(&self) -> Vec<CatalogRow> {
        self.store
            .search(&self.filter)
            .into_iter()
            .map(|item| self.row(item))
            .collect()
    }

    fn row(&self, item: MarketplaceItem) -> CatalogRow {
        CatalogRow {
            id: item.id,
            title: item.title,
            category: item.category.label(),
            price: item.price,
            likes: item.likes,
            views: item.views,
            liked: self.liked.contains(&item.id),
        }
    }

    pub fn is_liked(&self, id: ItemId) -> bool {
        self.liked.contains(&id)
    }

    /// Flip the liked marker. Liking also bumps the item's counter.
    ///
    /// Returns the new marker state.
    pub fn toggle_like(&mut self, id: ItemId) -> CatalogResult<bool> {
        if self.liked.remove(&id) {
            return Ok(false);
        }
        self.store.like(id)?;
        self.liked.insert(id);
        Ok(true)
    }
}
