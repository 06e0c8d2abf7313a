//! Storefront search and category filtering.

use vrmart_core::{Category, MarketplaceItem};

/// Listing filter.
///
/// An empty search term and no category ("All") match every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive title substring.
    pub search: String,
    /// Required category, `None` for all.
    pub category: Option<Category>,
}

impl CatalogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, item: &MarketplaceItem) -> bool {
        let matches_search = self.search.is_empty()
            || item
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let matches_category = self.category.map_or(true, |c| item.category == c);
        matches_search && matches_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrmart_core::{ItemId, NewMarketplaceItem};

    fn desk() -> MarketplaceItem {
        NewMarketplaceItem::new("Aesthetic Desk", "/models/desk.glb", Category::Furniture, "45 ICP")
            .into_item(ItemId(1))
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(CatalogFilter::all().matches(&desk()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert!(CatalogFilter::all().with_search("DESK").matches(&desk()));
        assert!(!CatalogFilter::all().with_search("chair").matches(&desk()));
    }

    #[test]
    fn test_category_and_search_combine() {
        let filter = CatalogFilter::all()
            .with_search("desk")
            .with_category(Category::Decor);
        assert!(!filter.matches(&desk()));

        let filter = CatalogFilter::all()
            .with_search("desk")
            .with_category(Category::Furniture);
        assert!(filter.matches(&desk()));
    }
}
