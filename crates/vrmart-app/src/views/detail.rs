//! Product detail page.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use vrmart_catalog::CatalogStore;
use vrmart_core::{AssetId, ItemId, MarketplaceItem};
use vrmart_session::{SessionContext, SessionResult};

/// What the 3D viewer needs to show a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSettings {
    pub model_path: String,
    pub scale: f32,
    pub position: [f32; 3],
}

impl ViewerSettings {
    pub fn for_item(item: &MarketplaceItem) -> Self {
        let placement = item.display.placement();
        Self {
            model_path: item.model_path.clone(),
            scale: placement.scale,
            position: placement.position,
        }
    }
}

/// One catalog item opened for viewing.
#[derive(Debug, Clone)]
pub struct DetailView {
    item: MarketplaceItem,
    viewer: ViewerSettings,
    liked: bool,
}

impl DetailView {
    /// Open an item and count the view.
    ///
    /// Returns `None` for an unknown id ("Product Not Found").
    pub fn load(store: &CatalogStore, id: ItemId) -> Option<Self> {
        if store.record_view(id).is_err() {
            debug!(id = %id, "Product not found");
            return None;
        }
        let item = store.get(id)?;
        let viewer = ViewerSettings::for_item(&item);
        Some(Self {
            item,
            viewer,
            liked: false,
        })
    }

    pub fn item(&self) -> &MarketplaceItem {
        &self.item
    }

    pub fn viewer(&self) -> &ViewerSettings {
        &self.viewer
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Flip the like button. Purely local to this page.
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }

    /// Buy a ledger asset for the signed-in user.
    pub async fn buy(session: &SessionContext, asset_id: AssetId) -> SessionResult<String> {
        session.purchase_asset(asset_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrmart_core::{BoundingBox, Category, ModelDisplay, NewMarketplaceItem};

    #[test]
    fn test_load_records_view() {
        let store = CatalogStore::seeded();
        let view = DetailView::load(&store, ItemId(4)).unwrap();

        assert_eq!(view.item().title, "Duck");
        assert_eq!(view.item().views, 8901);
        assert_eq!(store.get(ItemId(4)).unwrap().views, 8901);
        assert_eq!(view.viewer().scale, 4.0);
        assert_eq!(view.viewer().position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_item_is_none() {
        let store = CatalogStore::seeded();
        assert!(DetailView::load(&store, ItemId(42)).is_none());
    }

    #[test]
    fn test_fitted_model_is_centered() {
        let store = CatalogStore::new();
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let id = store.add_item(
            NewMarketplaceItem::new("Crate", "/models/crate.glb", Category::Props, "3 ICP")
                .with_display(ModelDisplay::fitted(bounds)),
        );

        let view = DetailView::load(&store, id).unwrap();
        assert_eq!(view.viewer().scale, 1.5);
        assert_eq!(view.viewer().position, [-1.5, -0.75, -0.75]);
    }

    #[test]
    fn test_like_button_toggles() {
        let store = CatalogStore::seeded();
        let mut view = DetailView::load(&store, ItemId(1)).unwrap();
        assert!(view.toggle_like());
        assert!(!view.toggle_like());
    }
}
